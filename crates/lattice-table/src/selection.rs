//! Row selection state for tables.
//!
//! The model has no notion of selection; each table keeps its own. Because
//! selection is keyed by row index, it has to move with the rows when the
//! model reports insertions and deletions.

use std::collections::BTreeSet;

/// Selection behavior mode for tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionMode {
    /// No rows can be selected.
    NoSelection,
    /// Only one row can be selected at a time (default).
    #[default]
    SingleSelection,
    /// Any number of rows can be selected.
    MultiSelection,
}

/// Tracks which rows of a table are selected.
#[derive(Debug, Clone, Default)]
pub struct RowSelection {
    mode: SelectionMode,
    rows: BTreeSet<usize>,
}

impl RowSelection {
    /// Creates an empty selection with the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            rows: BTreeSet::new(),
        }
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.mode
    }

    /// Selects a row. Returns `true` if the selection changed.
    pub fn select_row(&mut self, row: usize) -> bool {
        match self.mode {
            SelectionMode::NoSelection => false,
            SelectionMode::SingleSelection => {
                if self.rows.len() == 1 && self.rows.contains(&row) {
                    return false;
                }
                self.rows.clear();
                self.rows.insert(row)
            }
            SelectionMode::MultiSelection => self.rows.insert(row),
        }
    }

    /// Deselects a row. Returns `true` if the selection changed.
    pub fn deselect_row(&mut self, row: usize) -> bool {
        self.rows.remove(&row)
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn is_row_selected(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    pub fn has_selection(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Selected rows in ascending order.
    pub fn selected_rows(&self) -> Vec<usize> {
        self.rows.iter().copied().collect()
    }

    /// A row was inserted at `index`: selected rows at or after it move down.
    pub fn row_inserted(&mut self, index: usize) {
        self.rows = self
            .rows
            .iter()
            .map(|&row| if row >= index { row + 1 } else { row })
            .collect();
    }

    /// The row at `index` was deleted: it is deselected and rows after it
    /// move up.
    pub fn row_deleted(&mut self, index: usize) {
        self.rows = self
            .rows
            .iter()
            .filter(|&&row| row != index)
            .map(|&row| if row > index { row - 1 } else { row })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_selection() {
        let mut selection = RowSelection::new(SelectionMode::SingleSelection);
        assert!(selection.select_row(2));
        assert!(selection.select_row(4));
        assert_eq!(selection.selected_rows(), vec![4]);
        assert!(!selection.select_row(4));
    }

    #[test]
    fn test_multi_selection() {
        let mut selection = RowSelection::new(SelectionMode::MultiSelection);
        selection.select_row(1);
        selection.select_row(3);
        assert_eq!(selection.selected_rows(), vec![1, 3]);

        assert!(selection.deselect_row(1));
        assert!(!selection.deselect_row(1));
        assert_eq!(selection.selected_rows(), vec![3]);
    }

    #[test]
    fn test_no_selection_mode() {
        let mut selection = RowSelection::new(SelectionMode::NoSelection);
        assert!(!selection.select_row(0));
        assert!(!selection.has_selection());
    }

    #[test]
    fn test_insert_shifts_rows_at_or_after_index() {
        let mut selection = RowSelection::new(SelectionMode::MultiSelection);
        selection.select_row(0);
        selection.select_row(2);
        selection.select_row(5);

        selection.row_inserted(2);
        assert_eq!(selection.selected_rows(), vec![0, 3, 6]);
    }

    #[test]
    fn test_delete_drops_row_and_shifts_rest() {
        let mut selection = RowSelection::new(SelectionMode::MultiSelection);
        selection.select_row(1);
        selection.select_row(2);
        selection.select_row(4);

        selection.row_deleted(2);
        assert_eq!(selection.selected_rows(), vec![1, 3]);
    }
}
