//! Prelude module for Lattice Table.
//!
//! ```
//! use lattice_table::prelude::*;
//! ```

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{ModelHandler, SimpleModelHandler, TableModel};
pub use crate::value::{CellValue, Color, ColumnType, Image};

// ============================================================================
// Views
// ============================================================================

pub use crate::column::{Editability, PartKind, TextPartParams};
pub use crate::config::TableConfig;
pub use crate::selection::SelectionMode;
pub use crate::table::{Table, TableColumn};

// ============================================================================
// Rendering
// ============================================================================

pub use crate::render::{CellRendering, ColorOverride, PartContent, PartRendering, Progress};

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::TableError;
