//! Logging facilities for Lattice Table.
//!
//! Lattice Table uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("lattice_table::model=debug")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Use the constants in [`targets`] to build filter directives for a single
//! subsystem.

/// Span names used throughout Lattice Table for tracing.
pub mod span_names {
    /// Fan-out of one row-mutation notification to every bound view.
    pub const NOTIFY: &str = "lattice_table::notify";
    /// Commit of one in-place edit gesture.
    pub const EDIT_COMMIT: &str = "lattice_table::edit_commit";
    /// Rendering of a single cell.
    pub const RENDER: &str = "lattice_table::render";
}

/// Target names for log filtering.
pub mod targets {
    /// Core infrastructure target.
    pub const CORE: &str = "lattice_table_core";
    /// Model and notification fan-out target.
    pub const MODEL: &str = "lattice_table::model";
    /// Table lifecycle and column composition target.
    pub const TABLE: &str = "lattice_table::table";
    /// Per-cell rendering target.
    pub const RENDER: &str = "lattice_table::render";
    /// Native backend calls target.
    pub const BACKEND: &str = "lattice_table::backend";
}

/// A guard that records the duration of an operation as a tracing span.
///
/// The span stays entered until the guard is dropped.
///
/// ```
/// use lattice_table_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("reindex");
///     // ... work ...
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "lattice_table::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_share_prefix() {
        for target in [targets::MODEL, targets::TABLE, targets::RENDER, targets::BACKEND] {
            assert!(target.starts_with("lattice_table::"));
        }
        assert_eq!(targets::CORE, "lattice_table_core");
    }

    #[test]
    fn test_perf_span_with_subscriber() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let _span = PerfSpan::new("test_operation");
    }
}
