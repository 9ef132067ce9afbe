//! Core systems for Lattice Table.
//!
//! This crate holds the infrastructure shared by the table widget layer:
//!
//! - **Logging**: `tracing` target and span names used across the workspace
//! - **Thread checks**: [`ThreadAffinity`], which turns the single-threaded
//!   GUI contract into a fail-fast assertion
//!
//! Nothing here knows about models or tables; see the `lattice-table` crate
//! for the binding protocol itself.
//!
//! # Example
//!
//! ```
//! use lattice_table_core::ThreadAffinity;
//!
//! let affinity = ThreadAffinity::current();
//! affinity.check_same_thread("table operation");
//! ```

pub mod logging;
pub mod thread_check;

pub use logging::PerfSpan;
pub use thread_check::{are_thread_checks_enabled, set_thread_checks_enabled, ThreadAffinity};
