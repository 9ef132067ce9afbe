//! Model side of the table binding protocol.
//!
//! - [`ModelHandler`]: the contract the application implements over its data
//! - [`TableModel`]: wraps a handler and fans row mutations out to every
//!   bound [`Table`](crate::Table)
//! - [`SimpleModelHandler`]: an in-memory handler for simple tables
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────┐ notify_row_*  ┌──────────────┐  row_* (snapshot)  ┌─────────┐
//! │ Application  │──────────────>│  TableModel  │───────────────────>│ Table N │
//! └──────────────┘               └──────────────┘                    └─────────┘
//!        ^                              │  ^                              │
//!        │        ModelHandler          │  │  cell_value / set_cell_value │
//!        └──────────────────────────────┘  └──────────────────────────────┘
//! ```
//!
//! Views never keep their own copy of the data: the row count is re-read
//! from the handler at every notification and cells are fetched on every
//! draw.

mod handler;
mod simple;
mod table_model;

pub use handler::ModelHandler;
pub use simple::SimpleModelHandler;
pub use table_model::{TableId, TableModel};

pub(crate) use table_model::RowObserver;
