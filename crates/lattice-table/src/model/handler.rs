//! The application-supplied handler contract.

use std::sync::Arc;

use crate::value::{CellValue, ColumnType};

use super::table_model::TableModel;

/// Source of truth for a [`TableModel`].
///
/// The application implements this trait over its own storage. Tables never
/// cache what it returns across draws: every visible cell is fetched afresh on
/// each draw pass, so implementations must tolerate repeated queries for the
/// same cell.
///
/// All methods are called on the GUI thread. The model is passed in so that a
/// handler may issue notifications (for example from
/// [`set_cell_value`](ModelHandler::set_cell_value)) without holding its own
/// reference to it. No table or model lock is held while a handler method
/// runs.
///
/// # Row count ordering
///
/// [`num_rows`](ModelHandler::num_rows) must already report the new count by
/// the time the application calls
/// [`TableModel::notify_row_inserted`] or [`TableModel::notify_row_deleted`].
///
/// # Example
///
/// ```
/// use lattice_table::model::{ModelHandler, TableModel};
/// use lattice_table::{CellValue, ColumnType};
///
/// struct Names(Vec<String>);
///
/// impl ModelHandler for Names {
///     fn num_columns(&self, _model: &TableModel) -> usize {
///         1
///     }
///
///     fn column_type(&self, _model: &TableModel, _column: usize) -> ColumnType {
///         ColumnType::String
///     }
///
///     fn num_rows(&self, _model: &TableModel) -> usize {
///         self.0.len()
///     }
///
///     fn cell_value(&self, _model: &TableModel, row: usize, _column: usize) -> CellValue {
///         CellValue::from(self.0[row].as_str())
///     }
///
///     fn set_cell_value(&self, _model: &TableModel, _row: usize, _column: usize, _value: CellValue) {
///         // read-only
///     }
/// }
///
/// let model = TableModel::new(Names(vec!["Ada".into()]));
/// assert_eq!(model.num_rows(), 1);
/// ```
pub trait ModelHandler: Send + Sync {
    /// Number of model columns.
    fn num_columns(&self, model: &TableModel) -> usize;

    /// Declared type of a model column.
    ///
    /// Used to validate parts when they are appended, never to dispatch
    /// rendering.
    fn column_type(&self, model: &TableModel, column: usize) -> ColumnType;

    /// Current number of rows.
    fn num_rows(&self, model: &TableModel) -> usize;

    /// Current value of a cell.
    fn cell_value(&self, model: &TableModel, row: usize, column: usize) -> CellValue;

    /// Applies an edit.
    ///
    /// May ignore or transform the value; the view re-reads the cell
    /// afterwards either way. Button clicks arrive as [`CellValue::Absent`].
    fn set_cell_value(&self, model: &TableModel, row: usize, column: usize, value: CellValue);
}

impl<T: ModelHandler + ?Sized> ModelHandler for Arc<T> {
    fn num_columns(&self, model: &TableModel) -> usize {
        (**self).num_columns(model)
    }

    fn column_type(&self, model: &TableModel, column: usize) -> ColumnType {
        (**self).column_type(model, column)
    }

    fn num_rows(&self, model: &TableModel) -> usize {
        (**self).num_rows(model)
    }

    fn cell_value(&self, model: &TableModel, row: usize, column: usize) -> CellValue {
        (**self).cell_value(model, row, column)
    }

    fn set_cell_value(&self, model: &TableModel, row: usize, column: usize, value: CellValue) {
        (**self).set_cell_value(model, row, column, value)
    }
}
