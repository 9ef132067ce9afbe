//! Error types for the table binding layer.
//!
//! Only programming errors of the embedding application surface here, as
//! checked errors returned from the composition API. Native platform failures
//! are logged and swallowed (see [`BackendError`]); missing optional data is
//! never an error.

use thiserror::Error;

use crate::column::PartKind;
use crate::value::ColumnType;

/// Errors returned by table and model operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// The table behind a column handle has been destroyed.
    #[error("table has been destroyed")]
    Destroyed,

    /// A model column index is past the handler's column count.
    #[error("model column {column} out of range (model has {num_columns} columns)")]
    ColumnOutOfRange { column: usize, num_columns: usize },

    /// A table column index does not exist.
    #[error("table column {column} out of range (table has {columns} columns)")]
    TableColumnOutOfRange { column: usize, columns: usize },

    /// The handler declares a column type that does not fit its use.
    #[error("model column {column} is declared {actual}, expected {expected}")]
    TypeMismatch {
        column: usize,
        expected: ColumnType,
        actual: ColumnType,
    },

    /// A row index is past the table's current row count.
    #[error("row {row} out of range (table has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    /// A part index does not exist in the column.
    #[error("part {part} out of range (column has {parts} parts)")]
    PartOutOfRange { part: usize, parts: usize },

    /// The backend reported that it cannot provide a feature.
    #[error("unsupported by the active backend: {0}")]
    Unsupported(&'static str),

    /// A commit gesture arrived for a part that is not editable at that row.
    #[error("part {part} of column {column} is not editable at row {row}")]
    NotEditable {
        row: usize,
        column: usize,
        part: usize,
    },

    /// A gesture or setting addressed a part of a different kind.
    #[error("expected a {expected:?} part, found {actual:?}")]
    PartKindMismatch { expected: PartKind, actual: PartKind },

    /// A model was freed while views were still bound to it.
    #[error("model still has {views} bound views")]
    ModelInUse { views: usize },
}

/// A specialized Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// A failure reported by the native toolkit.
///
/// Tables never hand these to the application: there is no recovery path at
/// this layer, so they are logged and the operation is treated as done.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The native widget rejected an operation.
    #[error("native call {operation} rejected: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },
}

impl BackendError {
    /// Convenience constructor for [`BackendError::Rejected`].
    pub fn rejected(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Rejected {
            operation,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TableError::TypeMismatch {
            column: 3,
            expected: ColumnType::Int,
            actual: ColumnType::String,
        };
        assert_eq!(err.to_string(), "model column 3 is declared string, expected int");

        let err = BackendError::rejected("set_item_count", "list view refused");
        assert_eq!(
            err.to_string(),
            "native call set_item_count rejected: list view refused"
        );
    }
}
