//! The model hub: handler indirection plus fan-out to bound views.
//!
//! A [`TableModel`] wraps one application handler and keeps the ordered set
//! of tables currently displaying it. The application reports every row
//! mutation through the `notify_*` methods; each call is delivered
//! synchronously to every bound table before it returns.

use std::fmt;
use std::sync::{Arc, Weak};

use lattice_table_core::logging::{span_names, targets};
use lattice_table_core::ThreadAffinity;
use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};
use static_assertions::assert_impl_all;

use crate::error::{Result, TableError};
use crate::value::{CellValue, ColumnType};

use super::handler::ModelHandler;

new_key_type! {
    /// Identifies a table within the model it is bound to.
    pub struct TableId;
}

/// Receiver side of the row-mutation fan-out, implemented by tables.
pub(crate) trait RowObserver: Send + Sync {
    /// A row was inserted at `index`; the model now has `row_count` rows.
    fn row_inserted(&self, index: usize, row_count: usize);

    /// Row `index` changed in place.
    fn row_changed(&self, index: usize);

    /// The row formerly at `index` was deleted; the model now has
    /// `row_count` rows.
    fn row_deleted(&self, index: usize, row_count: usize);
}

#[derive(Default)]
struct BoundViews {
    slots: SlotMap<TableId, Weak<dyn RowObserver>>,
    /// Bind order; fan-out follows it.
    order: Vec<TableId>,
}

struct ModelInner {
    handler: Box<dyn ModelHandler>,
    views: Mutex<BoundViews>,
    affinity: ThreadAffinity,
}

/// A handle to a table model.
///
/// Cloning the handle is cheap and yields another handle to the same model;
/// tables keep one for as long as they live, which is how the model outlives
/// every view bound to it.
#[derive(Clone)]
pub struct TableModel {
    inner: Arc<ModelInner>,
}

assert_impl_all!(TableModel: Send, Sync, Clone);

impl TableModel {
    /// Creates a model around an application handler.
    pub fn new<H: ModelHandler + 'static>(handler: H) -> Self {
        tracing::debug!(target: targets::MODEL, "creating table model");
        Self {
            inner: Arc::new(ModelInner {
                handler: Box::new(handler),
                views: Mutex::new(BoundViews::default()),
                affinity: ThreadAffinity::current(),
            }),
        }
    }

    /// Releases this handle to the model.
    ///
    /// Freeing a model that still has bound tables is a lifecycle error in
    /// the application: the tables must be destroyed first.
    pub fn free(self) -> Result<()> {
        self.check_thread("TableModel::free");
        let views = self.bound_view_count();
        if views > 0 {
            tracing::error!(target: targets::MODEL, views, "model freed while views are bound");
            return Err(TableError::ModelInUse { views });
        }
        tracing::debug!(target: targets::MODEL, "table model freed");
        Ok(())
    }

    /// Returns the application handler.
    pub fn handler(&self) -> &dyn ModelHandler {
        self.check_thread("TableModel::handler");
        self.inner.handler.as_ref()
    }

    /// Returns `true` if both handles refer to the same model.
    pub fn ptr_eq(&self, other: &TableModel) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // -------------------------------------------------------------------------
    // Handler indirection
    // -------------------------------------------------------------------------

    /// Number of model columns, as reported by the handler.
    pub fn num_columns(&self) -> usize {
        self.check_thread("TableModel::num_columns");
        self.inner.handler.num_columns(self)
    }

    /// Declared type of a model column.
    pub fn column_type(&self, column: usize) -> ColumnType {
        self.check_thread("TableModel::column_type");
        self.inner.handler.column_type(self, column)
    }

    /// Current row count, as reported by the handler.
    pub fn num_rows(&self) -> usize {
        self.check_thread("TableModel::num_rows");
        self.inner.handler.num_rows(self)
    }

    /// Current value of a cell.
    pub fn cell_value(&self, row: usize, column: usize) -> CellValue {
        self.check_thread("TableModel::cell_value");
        self.inner.handler.cell_value(self, row, column)
    }

    /// Forwards an edit to the handler.
    pub fn set_cell_value(&self, row: usize, column: usize, value: CellValue) {
        self.check_thread("TableModel::set_cell_value");
        self.inner.handler.set_cell_value(self, row, column, value)
    }

    // -------------------------------------------------------------------------
    // Bound views
    // -------------------------------------------------------------------------

    pub(crate) fn bind(&self, view: Weak<dyn RowObserver>) -> TableId {
        let mut views = self.inner.views.lock();
        let id = views.slots.insert(view);
        views.order.push(id);
        tracing::debug!(target: targets::MODEL, table = ?id, bound = views.order.len(), "view bound");
        id
    }

    pub(crate) fn unbind(&self, id: TableId) {
        let mut views = self.inner.views.lock();
        if views.slots.remove(id).is_some() {
            views.order.retain(|bound| *bound != id);
            tracing::debug!(target: targets::MODEL, table = ?id, bound = views.order.len(), "view unbound");
        }
    }

    /// Number of tables currently bound to this model.
    pub fn bound_view_count(&self) -> usize {
        self.check_thread("TableModel::bound_view_count");
        self.inner.views.lock().order.len()
    }

    /// Returns `true` if the table with this id is bound to this model.
    pub fn is_bound(&self, id: TableId) -> bool {
        self.check_thread("TableModel::is_bound");
        self.inner.views.lock().slots.contains_key(id)
    }

    #[inline]
    fn check_thread(&self, operation: &str) {
        self.inner.affinity.check_same_thread(operation);
    }

    /// Copies the live bound views so fan-out runs without the lock held.
    fn snapshot(&self) -> Vec<Arc<dyn RowObserver>> {
        let views = self.inner.views.lock();
        views
            .order
            .iter()
            .filter_map(|id| views.slots.get(*id))
            .filter_map(Weak::upgrade)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// Reports that a row was inserted at `new_index`.
    ///
    /// The handler must already report the post-insertion row count.
    ///
    /// # Panics
    ///
    /// Panics if `new_index` is not a valid row of the post-insertion model.
    pub fn notify_row_inserted(&self, new_index: usize) {
        self.check_thread("TableModel::notify_row_inserted");
        let row_count = self.num_rows();
        assert!(
            new_index < row_count,
            "notify_row_inserted({new_index}) but the handler reports {row_count} rows; \
             update the backing store before notifying"
        );

        let views = self.snapshot();
        let _span = tracing::debug_span!(target: targets::MODEL, span_names::NOTIFY, kind = "inserted", index = new_index).entered();
        tracing::debug!(target: targets::MODEL, row_count, views = views.len(), "row inserted");
        for view in views {
            view.row_inserted(new_index, row_count);
        }
    }

    /// Reports that row `index` changed in place.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid row.
    pub fn notify_row_changed(&self, index: usize) {
        self.check_thread("TableModel::notify_row_changed");
        let row_count = self.num_rows();
        assert!(
            index < row_count,
            "notify_row_changed({index}) but the handler reports {row_count} rows"
        );

        let views = self.snapshot();
        let _span = tracing::debug_span!(target: targets::MODEL, span_names::NOTIFY, kind = "changed", index).entered();
        tracing::debug!(target: targets::MODEL, views = views.len(), "row changed");
        for view in views {
            view.row_changed(index);
        }
    }

    /// Reports that the row formerly at `old_index` was deleted.
    ///
    /// The handler must already report the post-deletion row count.
    ///
    /// # Panics
    ///
    /// Panics if `old_index` could not have been a row of the pre-deletion
    /// model.
    pub fn notify_row_deleted(&self, old_index: usize) {
        self.check_thread("TableModel::notify_row_deleted");
        let row_count = self.num_rows();
        assert!(
            old_index <= row_count,
            "notify_row_deleted({old_index}) but the handler reports {row_count} rows \
             after deletion; update the backing store before notifying"
        );

        let views = self.snapshot();
        let _span = tracing::debug_span!(target: targets::MODEL, span_names::NOTIFY, kind = "deleted", index = old_index).entered();
        tracing::debug!(target: targets::MODEL, row_count, views = views.len(), "row deleted");
        for view in views {
            view.row_deleted(old_index, row_count);
        }
    }
}

impl fmt::Debug for TableModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableModel")
            .field("bound_views", &self.inner.views.lock().order.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SimpleModelHandler;

    #[derive(Default)]
    struct Probe {
        events: Mutex<Vec<(&'static str, usize, usize)>>,
    }

    impl RowObserver for Probe {
        fn row_inserted(&self, index: usize, row_count: usize) {
            self.events.lock().push(("inserted", index, row_count));
        }

        fn row_changed(&self, index: usize) {
            self.events.lock().push(("changed", index, 0));
        }

        fn row_deleted(&self, index: usize, row_count: usize) {
            self.events.lock().push(("deleted", index, row_count));
        }
    }

    fn model_with_rows(rows: usize) -> (Arc<SimpleModelHandler>, TableModel) {
        let handler = Arc::new(SimpleModelHandler::new(vec![ColumnType::String]));
        for i in 0..rows {
            handler.push_row_silently(vec![CellValue::from(format!("row {i}"))]);
        }
        let model = TableModel::new(handler.clone());
        (handler, model)
    }

    fn bind_probe(model: &TableModel) -> (Arc<Probe>, TableId) {
        let probe = Arc::new(Probe::default());
        let weak: Weak<dyn RowObserver> = Arc::downgrade(&probe) as Weak<dyn RowObserver>;
        let id = model.bind(weak);
        (probe, id)
    }

    #[test]
    fn test_bind_and_unbind() {
        let (_handler, model) = model_with_rows(0);
        let (_a, id_a) = bind_probe(&model);
        let (_b, id_b) = bind_probe(&model);

        assert_eq!(model.bound_view_count(), 2);
        assert!(model.is_bound(id_a));

        model.unbind(id_a);
        assert!(!model.is_bound(id_a));
        assert!(model.is_bound(id_b));
        assert_eq!(model.bound_view_count(), 1);

        // Removing twice is a no-op.
        model.unbind(id_a);
        assert_eq!(model.bound_view_count(), 1);
    }

    #[test]
    fn test_fan_out_reaches_every_view_with_current_count() {
        let (handler, model) = model_with_rows(2);
        let (a, _) = bind_probe(&model);
        let (b, _) = bind_probe(&model);

        handler.insert_row(&model, 1, vec![CellValue::from("new")]);
        model.notify_row_changed(0);

        for probe in [&a, &b] {
            let events = probe.events.lock();
            assert_eq!(*events, vec![("inserted", 1, 3), ("changed", 0, 0)]);
        }
    }

    #[test]
    fn test_dropped_views_are_skipped() {
        let (_handler, model) = model_with_rows(1);
        let (probe, _) = bind_probe(&model);
        drop(probe);

        // The weak entry no longer upgrades; fan-out must not panic.
        model.notify_row_changed(0);
    }

    #[test]
    #[should_panic(expected = "update the backing store")]
    fn test_insert_before_store_update_panics() {
        let (_handler, model) = model_with_rows(1);
        model.notify_row_inserted(1);
    }

    #[test]
    fn test_free_with_bound_views_fails() {
        let (_handler, model) = model_with_rows(0);
        let (_probe, id) = bind_probe(&model);

        let err = model.clone().free().unwrap_err();
        assert_eq!(err, TableError::ModelInUse { views: 1 });

        model.unbind(id);
        assert!(model.free().is_ok());
    }
}
