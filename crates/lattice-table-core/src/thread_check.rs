//! GUI-thread affinity for models and tables.
//!
//! Models, tables and column handles are only ever driven from the thread
//! running the GUI event loop. Each object remembers the thread it was
//! created on in a [`ThreadAffinity`] and checks it on entry to every public
//! operation, so a stray call from a worker thread fails loudly instead of
//! racing a redraw.
//!
//! ```
//! use lattice_table_core::ThreadAffinity;
//!
//! let owner = ThreadAffinity::current();
//! owner.check_same_thread("TableModel::notify_row_changed");
//! ```
//!
//! [`ThreadAffinity::check_same_thread`] honors a process-wide switch that
//! defaults to on in debug builds; [`ThreadAffinity::assert_same_thread`]
//! always checks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, ThreadId};

use static_assertions::assert_impl_all;

use crate::logging::targets;

static CHECKS_ENABLED: AtomicBool = AtomicBool::new(cfg!(debug_assertions));

/// Turns the [`check_same_thread`](ThreadAffinity::check_same_thread)
/// assertions on or off for the whole process.
pub fn set_thread_checks_enabled(enabled: bool) {
    CHECKS_ENABLED.store(enabled, Ordering::SeqCst);
}

/// Whether [`check_same_thread`](ThreadAffinity::check_same_thread) currently
/// asserts anything.
#[inline]
pub fn are_thread_checks_enabled() -> bool {
    CHECKS_ENABLED.load(Ordering::Relaxed)
}

/// The thread an object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    owner: ThreadId,
}

assert_impl_all!(ThreadAffinity: Send, Sync, Copy);

impl ThreadAffinity {
    /// Affinity to the calling thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            owner: thread::current().id(),
        }
    }

    /// The owning thread.
    pub fn thread_id(&self) -> ThreadId {
        self.owner
    }

    #[inline]
    pub fn is_same_thread(&self) -> bool {
        thread::current().id() == self.owner
    }

    /// Panics unless called on the owning thread.
    pub fn assert_same_thread(&self, operation: &str) {
        if !self.is_same_thread() {
            self.violation(operation);
        }
    }

    /// Like [`assert_same_thread`](Self::assert_same_thread), but only while
    /// thread checks are enabled.
    #[inline]
    pub fn check_same_thread(&self, operation: &str) {
        if are_thread_checks_enabled() {
            self.assert_same_thread(operation);
        }
    }

    #[cold]
    #[inline(never)]
    fn violation(&self, operation: &str) -> ! {
        let caller = thread::current();
        let caller_name = caller.name().unwrap_or("<unnamed>");

        tracing::error!(
            target: targets::CORE,
            operation,
            owner = ?self.owner,
            caller = ?caller.id(),
            "called off the GUI thread"
        );

        panic!(
            "{operation} called from thread \"{caller_name}\" ({:?}), but the object belongs \
             to thread {:?}; post the call to the GUI thread instead",
            caller.id(),
            self.owner
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_thread_passes() {
        let affinity = ThreadAffinity::current();
        assert!(affinity.is_same_thread());
        assert_eq!(affinity.thread_id(), thread::current().id());
        affinity.assert_same_thread("TableModel::num_rows");
    }

    #[test]
    fn test_other_thread_is_detected() {
        let affinity = ThreadAffinity::current();
        let seen_same = thread::spawn(move || affinity.is_same_thread())
            .join()
            .unwrap();
        assert!(!seen_same);
    }

    #[test]
    fn test_assert_panics_off_thread() {
        let affinity = ThreadAffinity::current();
        let outcome = thread::Builder::new()
            .name("worker".into())
            .spawn(move || affinity.assert_same_thread("Table::render_cell"))
            .unwrap()
            .join();

        let payload = outcome.unwrap_err();
        let message = payload
            .downcast_ref::<String>()
            .cloned()
            .unwrap_or_default();
        assert!(message.contains("Table::render_cell"));
        assert!(message.contains("\"worker\""));
    }
}
