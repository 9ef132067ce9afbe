//! A ready-made handler storing rows of cell values in memory.

use parking_lot::RwLock;

use lattice_table_core::logging::targets;

use crate::value::{CellValue, ColumnType};

use super::handler::ModelHandler;
use super::table_model::TableModel;

/// A simple handler that stores data in a 2D vector.
///
/// Useful for small tables that don't need a custom row type. Share it with
/// the model through an `Arc` so the application can keep mutating it; the
/// mutators update storage first and then issue the matching notification.
///
/// Edits from views are accepted when the value's tag matches the column's
/// declared type; anything else, including button clicks, leaves the stored
/// value untouched.
///
/// ```
/// use std::sync::Arc;
/// use lattice_table::model::{SimpleModelHandler, TableModel};
/// use lattice_table::{CellValue, ColumnType};
///
/// let handler = Arc::new(SimpleModelHandler::new(vec![ColumnType::String, ColumnType::Int]));
/// let model = TableModel::new(handler.clone());
///
/// handler.push_row(&model, vec!["Alice".into(), 1.into()]);
/// assert_eq!(model.num_rows(), 1);
/// assert_eq!(model.cell_value(0, 0), CellValue::from("Alice"));
/// ```
pub struct SimpleModelHandler {
    column_types: Vec<ColumnType>,
    rows: RwLock<Vec<Vec<CellValue>>>,
}

impl SimpleModelHandler {
    /// Creates an empty handler with the given column types.
    pub fn new(column_types: Vec<ColumnType>) -> Self {
        Self {
            column_types,
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Creates a handler pre-populated with rows, before any model exists.
    pub fn from_rows(column_types: Vec<ColumnType>, rows: Vec<Vec<CellValue>>) -> Self {
        let handler = Self::new(column_types);
        for row in rows {
            handler.push_row_silently(row);
        }
        handler
    }

    pub(crate) fn push_row_silently(&self, row: Vec<CellValue>) {
        let row = self.normalize(row);
        self.rows.write().push(row);
    }

    fn normalize(&self, mut row: Vec<CellValue>) -> Vec<CellValue> {
        row.resize(self.column_types.len(), CellValue::Absent);
        row
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Returns `true` if no rows are stored.
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Appends a row and notifies the model.
    pub fn push_row(&self, model: &TableModel, row: Vec<CellValue>) {
        let index = self.len();
        self.insert_row(model, index, row);
    }

    /// Inserts a row at `index` and notifies the model.
    pub fn insert_row(&self, model: &TableModel, index: usize, row: Vec<CellValue>) {
        let row = self.normalize(row);
        self.rows.write().insert(index, row);
        model.notify_row_inserted(index);
    }

    /// Removes the row at `index`, notifies the model and returns the row.
    pub fn remove_row(&self, model: &TableModel, index: usize) -> Vec<CellValue> {
        let removed = self.rows.write().remove(index);
        model.notify_row_deleted(index);
        removed
    }

    /// Replaces one cell and notifies the model that its row changed.
    pub fn set_cell(&self, model: &TableModel, row: usize, column: usize, value: CellValue) {
        let stored = {
            let mut rows = self.rows.write();
            match rows.get_mut(row).and_then(|r| r.get_mut(column)) {
                Some(cell) => {
                    *cell = value;
                    true
                }
                None => false,
            }
        };
        if stored {
            model.notify_row_changed(row);
        }
    }

    /// Returns a copy of one stored cell.
    pub fn cell(&self, row: usize, column: usize) -> Option<CellValue> {
        self.rows.read().get(row).and_then(|r| r.get(column)).cloned()
    }
}

impl ModelHandler for SimpleModelHandler {
    fn num_columns(&self, _model: &TableModel) -> usize {
        self.column_types.len()
    }

    fn column_type(&self, _model: &TableModel, column: usize) -> ColumnType {
        self.column_types[column]
    }

    fn num_rows(&self, _model: &TableModel) -> usize {
        self.len()
    }

    fn cell_value(&self, _model: &TableModel, row: usize, column: usize) -> CellValue {
        self.cell(row, column).unwrap_or_default()
    }

    fn set_cell_value(&self, _model: &TableModel, row: usize, column: usize, value: CellValue) {
        let declared = self.column_types.get(column).copied();
        if value.column_type().is_none() || value.column_type() != declared {
            tracing::debug!(target: targets::MODEL, row, column, tag = value.tag(), "edit ignored");
            return;
        }
        if let Some(cell) = self.rows.write().get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_simple_handler_mutators() {
        let handler = Arc::new(SimpleModelHandler::new(vec![
            ColumnType::String,
            ColumnType::Int,
        ]));
        let model = TableModel::new(handler.clone());

        handler.push_row(&model, vec!["a".into(), 1.into()]);
        handler.push_row(&model, vec!["c".into()]);
        handler.insert_row(&model, 1, vec!["b".into(), 2.into()]);

        assert_eq!(model.num_rows(), 3);
        assert_eq!(model.cell_value(1, 0), CellValue::from("b"));
        // Short rows are padded with absent cells.
        assert_eq!(model.cell_value(2, 1), CellValue::Absent);

        let removed = handler.remove_row(&model, 0);
        assert_eq!(removed[0], CellValue::from("a"));
        assert_eq!(model.num_rows(), 2);
    }

    #[test]
    fn test_edits_must_match_declared_type() {
        let handler = SimpleModelHandler::from_rows(
            vec![ColumnType::String, ColumnType::Int],
            vec![vec!["x".into(), 0.into()]],
        );
        let model = TableModel::new(Arc::new(handler));

        model.set_cell_value(0, 0, CellValue::from("y"));
        model.set_cell_value(0, 1, CellValue::from("not an int"));
        model.set_cell_value(0, 1, CellValue::Absent);

        assert_eq!(model.cell_value(0, 0), CellValue::from("y"));
        assert_eq!(model.cell_value(0, 1), CellValue::Int(0));
    }
}
