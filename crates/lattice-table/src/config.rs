//! Table configuration and builder.
//!
//! This module provides `TableConfig`, a builder for the presentation options
//! a table hands to its backend when it is created.

use crate::selection::SelectionMode;

/// Configuration for creating a table.
///
/// # Example
///
/// ```
/// use lattice_table::{SelectionMode, TableConfig};
///
/// let config = TableConfig::new()
///     .with_selection_mode(SelectionMode::MultiSelection)
///     .with_default_column_width(160)
///     .with_header_visible(false);
///
/// assert_eq!(config.default_column_width(), 160);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableConfig {
    /// How rows may be selected.
    selection_mode: SelectionMode,
    /// Whether clicking any cell highlights the whole row.
    full_row_select: bool,
    /// Whether truncated cell text shows a tooltip with the full text.
    label_tips: bool,
    /// Initial width of new columns, in logical pixels.
    default_column_width: u32,
    /// Minimum size (width, height) in dialog units.
    minimum_size: (u32, u32),
    /// Whether the column header row is shown.
    header_visible: bool,
    /// Whether the user can resize columns.
    resizable_columns: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TableConfig {
    /// Default width for new columns.
    pub const DEFAULT_COLUMN_WIDTH: u32 = 120;

    /// Default minimum size: a header plus roughly two lines.
    pub const DEFAULT_MINIMUM_SIZE: (u32, u32) = (107, 14 * 3);

    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            selection_mode: SelectionMode::SingleSelection,
            full_row_select: true,
            label_tips: true,
            default_column_width: Self::DEFAULT_COLUMN_WIDTH,
            minimum_size: Self::DEFAULT_MINIMUM_SIZE,
            header_visible: true,
            resizable_columns: true,
        }
    }

    /// Set the selection mode.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Set whether clicking a cell selects its whole row.
    pub fn with_full_row_select(mut self, enabled: bool) -> Self {
        self.full_row_select = enabled;
        self
    }

    /// Set whether truncated labels show a tooltip.
    pub fn with_label_tips(mut self, enabled: bool) -> Self {
        self.label_tips = enabled;
        self
    }

    /// Set the initial width of new columns.
    pub fn with_default_column_width(mut self, width: u32) -> Self {
        self.default_column_width = width;
        self
    }

    /// Set the minimum size in dialog units.
    pub fn with_minimum_size(mut self, width: u32, height: u32) -> Self {
        self.minimum_size = (width, height);
        self
    }

    /// Set whether the header row is visible.
    pub fn with_header_visible(mut self, visible: bool) -> Self {
        self.header_visible = visible;
        self
    }

    /// Set whether columns can be resized by the user.
    pub fn with_resizable_columns(mut self, resizable: bool) -> Self {
        self.resizable_columns = resizable;
        self
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    pub fn full_row_select(&self) -> bool {
        self.full_row_select
    }

    pub fn label_tips(&self) -> bool {
        self.label_tips
    }

    pub fn default_column_width(&self) -> u32 {
        self.default_column_width
    }

    pub fn minimum_size(&self) -> (u32, u32) {
        self.minimum_size
    }

    pub fn header_visible(&self) -> bool {
        self.header_visible
    }

    pub fn resizable_columns(&self) -> bool {
        self.resizable_columns
    }
}
