//! Lattice Table - model-bound table views.
//!
//! A [`TableModel`] wraps an application-supplied [`ModelHandler`] and fans
//! row-mutation notifications out to every [`Table`] bound to it. Tables
//! describe their columns as sequences of typed *parts* (text, image,
//! checkbox, progress bar, button), render cells lazily from the model on
//! every draw, and route edit gestures back to the handler.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lattice_table::prelude::*;
//!
//! let handler = Arc::new(SimpleModelHandler::new(vec![ColumnType::String, ColumnType::Int]));
//! let model = TableModel::new(handler.clone());
//!
//! let table = Table::new(&model);
//! table.append_text_column("Name", 0, Editability::Always, TextPartParams::default()).unwrap();
//! table.append_progress_bar_column("Progress", 1).unwrap();
//!
//! handler.push_row(&model, vec!["download".into(), 40.into()]);
//!
//! let cell = table.render_cell(0, 1).unwrap();
//! assert_eq!(cell.parts[0].content, PartContent::ProgressBar(Progress::Value(40)));
//! ```
//!
//! # Threading
//!
//! Models and tables belong to the GUI thread that created them. Debug builds
//! assert this on every operation; see
//! [`lattice_table_core::set_thread_checks_enabled`].

pub mod backend;
pub mod column;
pub mod config;
pub mod error;
pub mod model;
pub mod prelude;
pub mod render;
pub mod selection;
pub mod table;
pub mod value;

#[cfg(test)]
mod test_support;

pub use backend::{
    BackendCall, BackendCapabilities, BackendResult, ColumnHeader, HeadlessBackend, PartKindSet,
    TableBackend,
};
pub use column::{ColumnSpec, Editability, Part, PartKind, TextPartParams};
pub use config::TableConfig;
pub use error::{BackendError, Result, TableError};
pub use model::{ModelHandler, SimpleModelHandler, TableId, TableModel};
pub use render::{
    CellRendering, ColorOverride, IconMetrics, PartBinding, PartContent, PartRendering, Progress,
};
pub use selection::{RowSelection, SelectionMode};
pub use table::{Table, TableColumn};
pub use value::{CellValue, Color, ColumnType, Image};
