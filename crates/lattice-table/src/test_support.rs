//! Recording handler shared by unit tests.

use parking_lot::Mutex;

use crate::model::{ModelHandler, TableModel};
use crate::value::{CellValue, ColumnType};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HandlerCall {
    CellValue { row: usize, column: usize },
    SetCellValue {
        row: usize,
        column: usize,
        value: CellValue,
    },
}

/// In-memory handler that logs every cell read and write.
///
/// Writes are stored as sent unless the handler is made read-only.
pub(crate) struct RecordingHandler {
    column_types: Vec<ColumnType>,
    rows: Mutex<Vec<Vec<CellValue>>>,
    calls: Mutex<Vec<HandlerCall>>,
    read_only: Mutex<bool>,
}

impl RecordingHandler {
    pub(crate) fn new(column_types: Vec<ColumnType>) -> Self {
        Self {
            column_types,
            rows: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            read_only: Mutex::new(false),
        }
    }

    pub(crate) fn push_row_silently(&self, mut row: Vec<CellValue>) {
        row.resize(self.column_types.len(), CellValue::Absent);
        self.rows.lock().push(row);
    }

    pub(crate) fn insert_row_silently(&self, index: usize, mut row: Vec<CellValue>) {
        row.resize(self.column_types.len(), CellValue::Absent);
        self.rows.lock().insert(index, row);
    }

    pub(crate) fn remove_row_silently(&self, index: usize) {
        self.rows.lock().remove(index);
    }

    pub(crate) fn store(&self, row: usize, column: usize, value: CellValue) {
        self.rows.lock()[row][column] = value;
    }

    pub(crate) fn set_read_only(&self, read_only: bool) {
        *self.read_only.lock() = read_only;
    }

    pub(crate) fn calls(&self) -> Vec<HandlerCall> {
        self.calls.lock().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub(crate) fn set_calls(&self) -> Vec<HandlerCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, HandlerCall::SetCellValue { .. }))
            .collect()
    }
}

impl ModelHandler for RecordingHandler {
    fn num_columns(&self, _model: &TableModel) -> usize {
        self.column_types.len()
    }

    fn column_type(&self, _model: &TableModel, column: usize) -> ColumnType {
        self.column_types[column]
    }

    fn num_rows(&self, _model: &TableModel) -> usize {
        self.rows.lock().len()
    }

    fn cell_value(&self, _model: &TableModel, row: usize, column: usize) -> CellValue {
        self.calls.lock().push(HandlerCall::CellValue { row, column });
        self.rows.lock()[row][column].clone()
    }

    fn set_cell_value(&self, _model: &TableModel, row: usize, column: usize, value: CellValue) {
        self.calls.lock().push(HandlerCall::SetCellValue {
            row,
            column,
            value: value.clone(),
        });
        if *self.read_only.lock() || value.is_absent() {
            return;
        }
        self.rows.lock()[row][column] = value;
    }
}

/// Installs a test subscriber so `RUST_LOG` surfaces library logs.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
