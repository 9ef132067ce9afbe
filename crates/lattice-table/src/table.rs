//! Tables: views bound to one model.
//!
//! A [`Table`] is created bound to a [`TableModel`] and stays bound until it
//! is destroyed. It owns its column descriptions and a [`TableBackend`], and
//! keeps its visible row count in step with the model purely through the
//! model's notifications.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lattice_table::model::{SimpleModelHandler, TableModel};
//! use lattice_table::{ColumnType, Editability, Table, TextPartParams};
//!
//! let handler = Arc::new(SimpleModelHandler::new(vec![ColumnType::String, ColumnType::Int]));
//! let model = TableModel::new(handler.clone());
//! let table = Table::new(&model);
//!
//! table
//!     .append_checkbox_text_column("Task", 1, Editability::Always, 0, Editability::Always, TextPartParams::default())
//!     .unwrap();
//!
//! handler.push_row(&model, vec!["Write docs".into(), 0.into()]);
//! assert_eq!(table.row_count(), 1);
//!
//! table.toggle_checkbox(0, 0, 0).unwrap();
//! assert_eq!(handler.cell(0, 1), Some(1.into()));
//!
//! table.destroy();
//! model.free().unwrap();
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use lattice_table_core::logging::{span_names, targets};
use lattice_table_core::{PerfSpan, ThreadAffinity};
use parking_lot::{Mutex, RwLock};
use static_assertions::assert_impl_all;

use crate::backend::{BackendCapabilities, BackendResult, ColumnHeader, HeadlessBackend, TableBackend};
use crate::column::{ColumnSpec, Editability, Part, PartKind, TextPartParams};
use crate::config::TableConfig;
use crate::error::{Result, TableError};
use crate::model::{RowObserver, TableId, TableModel};
use crate::render::{self, CellRendering, IconMetrics, PartBinding, PartRendering};
use crate::selection::RowSelection;
use crate::value::{CellValue, ColumnType};

struct TableState {
    columns: Vec<ColumnSpec>,
    background_column: Option<usize>,
    /// Last row count reported by the model.
    row_count: usize,
    selection: RowSelection,
}

impl TableState {
    /// Native position of `column`: the number of realized columns before it.
    fn native_index(&self, column: usize) -> usize {
        self.columns[..column.min(self.columns.len())]
            .iter()
            .filter(|spec| spec.is_realized())
            .count()
    }
}

pub(crate) struct TableShared {
    id: TableId,
    model: TableModel,
    affinity: ThreadAffinity,
    config: TableConfig,
    capabilities: BackendCapabilities,
    state: RwLock<TableState>,
    backend: Mutex<Box<dyn TableBackend>>,
    destroyed: AtomicBool,
}

/// A view bound to one [`TableModel`].
///
/// Dropping a table destroys it; [`destroy`](Table::destroy) does the same
/// explicitly.
pub struct Table {
    shared: Arc<TableShared>,
}

assert_impl_all!(Table: Send, Sync);

impl Table {
    /// Creates a table with the default configuration and a
    /// [`HeadlessBackend`].
    pub fn new(model: &TableModel) -> Self {
        Self::with_config(model, TableConfig::default())
    }

    /// Creates a table with a [`HeadlessBackend`].
    pub fn with_config(model: &TableModel, config: TableConfig) -> Self {
        Self::with_backend(model, config, HeadlessBackend::new())
    }

    /// Creates a table driving `backend`.
    ///
    /// The backend is configured, the initial row count is queried from the
    /// model, and the table is bound, all before this returns.
    pub fn with_backend<B: TableBackend + 'static>(
        model: &TableModel,
        config: TableConfig,
        backend: B,
    ) -> Self {
        let affinity = ThreadAffinity::current();
        let mut backend: Box<dyn TableBackend> = Box::new(backend);
        let capabilities = backend.capabilities();

        report_backend_failure(backend.configure(&config));
        let row_count = model.num_rows();
        report_backend_failure(backend.set_item_count(row_count));

        let selection = RowSelection::new(config.selection_mode());
        let shared = Arc::new_cyclic(|weak: &Weak<TableShared>| {
            let observer: Weak<dyn RowObserver> = weak.clone();
            TableShared {
                id: model.bind(observer),
                model: model.clone(),
                affinity,
                config,
                capabilities,
                state: RwLock::new(TableState {
                    columns: Vec::new(),
                    background_column: None,
                    row_count,
                    selection,
                }),
                backend: Mutex::new(backend),
                destroyed: AtomicBool::new(false),
            }
        });

        tracing::debug!(target: targets::TABLE, table = ?shared.id, row_count, "table created");
        Self { shared }
    }

    /// Destroys the table: unbinds it from its model and releases its
    /// columns. Column handles report [`TableError::Destroyed`] afterwards.
    pub fn destroy(self) {
        self.shared.affinity.check_same_thread("Table::destroy");
        self.shared.teardown();
    }

    /// Identifier of this table within its model.
    pub fn id(&self) -> TableId {
        self.shared.id
    }

    /// The model this table displays.
    pub fn model(&self) -> &TableModel {
        &self.shared.model
    }

    pub fn config(&self) -> &TableConfig {
        &self.shared.config
    }

    /// Capabilities reported by the backend at construction.
    pub fn capabilities(&self) -> BackendCapabilities {
        self.shared.capabilities
    }

    /// Number of rows the table currently displays.
    pub fn row_count(&self) -> usize {
        self.shared.affinity.check_same_thread("Table::row_count");
        self.shared.state.read().row_count
    }

    // -------------------------------------------------------------------------
    // Column composition
    // -------------------------------------------------------------------------

    /// Appends an empty column.
    ///
    /// The column gets its native counterpart when its first part is
    /// attached.
    pub fn append_column(&self, name: impl Into<String>) -> TableColumn {
        self.shared.affinity.check_same_thread("Table::append_column");
        let name = name.into();
        let index = {
            let mut state = self.shared.state.write();
            state.columns.push(ColumnSpec::new(name.clone()));
            state.columns.len() - 1
        };
        tracing::debug!(target: targets::TABLE, table = ?self.shared.id, column = index, %name, "column appended");
        TableColumn {
            table: Arc::downgrade(&self.shared),
            index,
        }
    }

    /// Handle to an existing column.
    pub fn column(&self, index: usize) -> Option<TableColumn> {
        self.shared.affinity.check_same_thread("Table::column");
        let columns = self.shared.state.read().columns.len();
        (index < columns).then(|| TableColumn {
            table: Arc::downgrade(&self.shared),
            index,
        })
    }

    pub fn column_count(&self) -> usize {
        self.shared.affinity.check_same_thread("Table::column_count");
        self.shared.state.read().columns.len()
    }

    /// Snapshot of every column description, in append order.
    pub fn column_specs(&self) -> Vec<ColumnSpec> {
        self.shared.affinity.check_same_thread("Table::column_specs");
        self.shared.state.read().columns.clone()
    }

    /// Native position of a column, or `None` if it has no parts yet.
    pub fn native_column_index(&self, column: usize) -> Option<usize> {
        self.shared.affinity.check_same_thread("Table::native_column_index");
        self.shared.native_column_index(column)
    }

    // Convenience composers. On error the column stays in place without the
    // rejected part.

    /// Appends a column with one text part.
    pub fn append_text_column(
        &self,
        name: impl Into<String>,
        text_column: usize,
        editability: Editability,
        params: TextPartParams,
    ) -> Result<TableColumn> {
        let column = self.append_column(name);
        column.append_text_part_with_params(text_column, editability, params)?;
        Ok(column)
    }

    /// Appends a column with one image part.
    pub fn append_image_column(
        &self,
        name: impl Into<String>,
        image_column: usize,
    ) -> Result<TableColumn> {
        let column = self.append_column(name);
        column.append_image_part(image_column, Editability::Never)?;
        Ok(column)
    }

    /// Appends an icon-with-label column.
    pub fn append_image_text_column(
        &self,
        name: impl Into<String>,
        image_column: usize,
        text_column: usize,
        editability: Editability,
        params: TextPartParams,
    ) -> Result<TableColumn> {
        let column = self.append_column(name);
        column.append_image_part(image_column, Editability::Never)?;
        column.append_text_part_with_params(text_column, editability, params)?;
        Ok(column)
    }

    /// Appends a column with one checkbox part.
    pub fn append_checkbox_column(
        &self,
        name: impl Into<String>,
        checkbox_column: usize,
        editability: Editability,
    ) -> Result<TableColumn> {
        let column = self.append_column(name);
        column.append_checkbox_part(checkbox_column, editability)?;
        Ok(column)
    }

    /// Appends a checkbox-with-label column.
    pub fn append_checkbox_text_column(
        &self,
        name: impl Into<String>,
        checkbox_column: usize,
        checkbox_editability: Editability,
        text_column: usize,
        text_editability: Editability,
        params: TextPartParams,
    ) -> Result<TableColumn> {
        let column = self.append_column(name);
        column.append_checkbox_part(checkbox_column, checkbox_editability)?;
        column.append_text_part_with_params(text_column, text_editability, params)?;
        Ok(column)
    }

    /// Appends a column with one progress bar.
    pub fn append_progress_bar_column(
        &self,
        name: impl Into<String>,
        progress_column: usize,
    ) -> Result<TableColumn> {
        let column = self.append_column(name);
        column.append_progress_bar_part(progress_column, Editability::Never)?;
        Ok(column)
    }

    /// Appends a column with one button.
    pub fn append_button_column(
        &self,
        name: impl Into<String>,
        button_column: usize,
        clickability: Editability,
    ) -> Result<TableColumn> {
        let column = self.append_column(name);
        column.append_button_part(button_column, clickability)?;
        Ok(column)
    }

    // -------------------------------------------------------------------------
    // Row background
    // -------------------------------------------------------------------------

    /// Sets or clears the model column supplying row background colors.
    ///
    /// Clearing always succeeds. Setting fails with
    /// [`TableError::Unsupported`] if the backend cannot paint backgrounds.
    pub fn set_row_background_color_model_column(&self, column: Option<usize>) -> Result<()> {
        let shared = &self.shared;
        shared
            .affinity
            .check_same_thread("Table::set_row_background_color_model_column");
        if let Some(column) = column {
            if !shared.capabilities.row_background {
                return shared.unsupported("row background color");
            }
            shared.check_model_column(column, ColumnType::Color)?;
        }

        shared.state.write().background_column = column;
        tracing::debug!(target: targets::TABLE, table = ?shared.id, ?column, "row background column set");
        shared.redraw_all();
        Ok(())
    }

    pub fn row_background_color_model_column(&self) -> Option<usize> {
        self.shared
            .affinity
            .check_same_thread("Table::row_background_color_model_column");
        self.shared.state.read().background_column
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// The binding record for one part, with the current background column.
    pub fn part_binding(&self, column: usize, part: usize) -> Result<PartBinding> {
        self.shared.affinity.check_same_thread("Table::part_binding");
        self.shared.binding(column, part)
    }

    /// Fetches and renders one part of one cell.
    pub fn render_part(&self, row: usize, column: usize, part: usize) -> Result<PartRendering> {
        let shared = &self.shared;
        shared.affinity.check_same_thread("Table::render_part");
        let binding = shared.binding(column, part)?;
        shared.check_row(row)?;
        Ok(render::render_part(&shared.model, row, &binding, shared.icon_metrics()))
    }

    /// Fetches and renders every part of one cell.
    pub fn render_cell(&self, row: usize, column: usize) -> Result<CellRendering> {
        let shared = &self.shared;
        shared.affinity.check_same_thread("Table::render_cell");
        let bindings = shared.bindings(column)?;
        shared.check_row(row)?;

        let _span = tracing::trace_span!(target: targets::RENDER, span_names::RENDER, row, column).entered();
        let icons = shared.icon_metrics();
        let parts = bindings
            .iter()
            .map(|binding| render::render_part(&shared.model, row, binding, icons))
            .collect();
        Ok(CellRendering { parts })
    }

    // -------------------------------------------------------------------------
    // Edit commits
    // -------------------------------------------------------------------------

    /// Commits confirmed text entry for a text part.
    ///
    /// Returns the part as re-rendered from the model afterwards, which
    /// reflects whatever the handler actually stored.
    pub fn commit_text_edit(
        &self,
        row: usize,
        column: usize,
        part: usize,
        text: impl Into<String>,
    ) -> Result<PartRendering> {
        self.shared.affinity.check_same_thread("Table::commit_text_edit");
        let text = text.into();
        self.shared
            .commit(row, column, part, PartKind::Text, move |_, _| CellValue::Text(text))
    }

    /// Toggles a checkbox part.
    ///
    /// The current state is read from the model at the moment of the toggle,
    /// never from an earlier rendering.
    pub fn toggle_checkbox(&self, row: usize, column: usize, part: usize) -> Result<PartRendering> {
        self.shared.affinity.check_same_thread("Table::toggle_checkbox");
        self.shared
            .commit(row, column, part, PartKind::Checkbox, move |model, binding| {
                let current = render::fetch_int(model, row, binding.value_column);
                CellValue::Int(i64::from(current == 0))
            })
    }

    /// Reports a click on a button part. The handler receives
    /// [`CellValue::Absent`].
    pub fn click_button(&self, row: usize, column: usize, part: usize) -> Result<PartRendering> {
        self.shared.affinity.check_same_thread("Table::click_button");
        self.shared
            .commit(row, column, part, PartKind::Button, |_, _| CellValue::Absent)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Selects a row. Returns `true` if the selection changed.
    pub fn select_row(&self, row: usize) -> Result<bool> {
        self.shared.affinity.check_same_thread("Table::select_row");
        self.shared.check_row(row)?;
        Ok(self
            .shared
            .change_selection(|selection| selection.select_row(row)))
    }

    /// Deselects a row. Returns `true` if the selection changed.
    pub fn deselect_row(&self, row: usize) -> bool {
        self.shared.affinity.check_same_thread("Table::deselect_row");
        self.shared
            .change_selection(|selection| selection.deselect_row(row))
    }

    pub fn clear_selection(&self) {
        self.shared.affinity.check_same_thread("Table::clear_selection");
        self.shared.change_selection(|selection| {
            let had_selection = selection.has_selection();
            selection.clear();
            had_selection
        });
    }

    pub fn is_row_selected(&self, row: usize) -> bool {
        self.shared.affinity.check_same_thread("Table::is_row_selected");
        self.shared.state.read().selection.is_row_selected(row)
    }

    /// Selected rows in ascending order.
    pub fn selected_rows(&self) -> Vec<usize> {
        self.shared.affinity.check_same_thread("Table::selected_rows");
        self.shared.state.read().selection.selected_rows()
    }
}

impl Drop for Table {
    fn drop(&mut self) {
        self.shared.teardown();
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.read();
        f.debug_struct("Table")
            .field("id", &self.shared.id)
            .field("row_count", &state.row_count)
            .field("columns", &state.columns.len())
            .field("background_column", &state.background_column)
            .finish_non_exhaustive()
    }
}

impl TableShared {
    fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Acquire)
    }

    fn teardown(&self) {
        if self.destroyed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.model.unbind(self.id);
        let mut state = self.state.write();
        state.columns.clear();
        state.selection.clear();
        tracing::debug!(target: targets::TABLE, table = ?self.id, "table destroyed");
    }

    /// Runs one backend call, logging a failure instead of returning it.
    fn backend_call(&self, call: impl FnOnce(&mut dyn TableBackend) -> BackendResult) {
        let mut backend = self.backend.lock();
        report_backend_failure(call(backend.as_mut()));
    }

    fn icon_metrics(&self) -> IconMetrics {
        let backend = self.backend.lock();
        IconMetrics {
            menu_icon: backend.menu_icon_size(),
            padding: backend.cell_padding(),
        }
    }

    fn redraw_all(&self) {
        let row_count = self.state.read().row_count;
        if row_count > 0 {
            self.backend_call(|backend| backend.redraw_items(0, row_count - 1));
        }
    }

    fn unsupported<T>(&self, feature: &'static str) -> Result<T> {
        tracing::warn!(target: targets::TABLE, table = ?self.id, feature, "not supported by the backend");
        Err(TableError::Unsupported(feature))
    }

    fn check_model_column(&self, column: usize, expected: ColumnType) -> Result<()> {
        let num_columns = self.model.num_columns();
        if column >= num_columns {
            return Err(TableError::ColumnOutOfRange {
                column,
                num_columns,
            });
        }
        let actual = self.model.column_type(column);
        if actual != expected {
            return Err(TableError::TypeMismatch {
                column,
                expected,
                actual,
            });
        }
        Ok(())
    }

    fn check_row(&self, row: usize) -> Result<()> {
        let rows = self.state.read().row_count;
        if row >= rows {
            return Err(TableError::RowOutOfRange { row, rows });
        }
        Ok(())
    }

    fn native_column_index(&self, column: usize) -> Option<usize> {
        let state = self.state.read();
        state
            .columns
            .get(column)
            .filter(|spec| spec.is_realized())
            .map(|_| state.native_index(column))
    }

    fn binding(&self, column: usize, part: usize) -> Result<PartBinding> {
        let state = self.state.read();
        let spec = state
            .columns
            .get(column)
            .ok_or(TableError::TableColumnOutOfRange {
                column,
                columns: state.columns.len(),
            })?;
        let found = spec.parts.get(part).ok_or(TableError::PartOutOfRange {
            part,
            parts: spec.parts.len(),
        })?;
        Ok(PartBinding::capture(column, part, found, state.background_column))
    }

    fn bindings(&self, column: usize) -> Result<Vec<PartBinding>> {
        let state = self.state.read();
        let spec = state
            .columns
            .get(column)
            .ok_or(TableError::TableColumnOutOfRange {
                column,
                columns: state.columns.len(),
            })?;
        Ok(spec
            .parts
            .iter()
            .enumerate()
            .map(|(index, part)| PartBinding::capture(column, index, part, state.background_column))
            .collect())
    }

    fn append_part(
        &self,
        column: usize,
        kind: PartKind,
        value_column: usize,
        editability: Editability,
        params: TextPartParams,
    ) -> Result<usize> {
        if !self.capabilities.supports(kind) {
            return self.unsupported(kind.name());
        }
        if params.color_model_column.is_some() && !self.capabilities.text_color {
            return self.unsupported("text color");
        }

        // Validation talks to the handler, so it runs before any lock is taken.
        self.check_model_column(value_column, kind.value_type())?;
        let editability = if kind.is_interactive() {
            editability
        } else {
            Editability::Never
        };
        if let Some(flag_column) = editability.model_column() {
            self.check_model_column(flag_column, ColumnType::Int)?;
        }
        if let Some(color_column) = params.color_model_column {
            self.check_model_column(color_column, ColumnType::Color)?;
        }

        let (index, realized, row_count) = {
            let mut state = self.state.write();
            let native_index = state.native_index(column);
            let row_count = state.row_count;
            let columns = state.columns.len();
            let spec = state
                .columns
                .get_mut(column)
                .ok_or(TableError::TableColumnOutOfRange { column, columns })?;
            if spec.is_realized() && !self.capabilities.multi_part_columns {
                return self.unsupported("multiple parts per column");
            }

            let mut part = Part::new(kind, value_column, editability);
            part.color_column = params.color_model_column;
            spec.parts.push(part);

            let index = spec.parts.len() - 1;
            let realized = (index == 0).then(|| {
                let header = ColumnHeader {
                    name: spec.name.clone(),
                    width: self.config.default_column_width(),
                    resizable: self.config.resizable_columns(),
                };
                (native_index, header)
            });
            (index, realized, row_count)
        };

        tracing::debug!(
            target: targets::TABLE,
            table = ?self.id,
            column,
            part = index,
            ?kind,
            value_column,
            ?editability,
            "part appended"
        );

        match realized {
            Some((native_index, header)) => {
                self.backend_call(|backend| backend.insert_column(native_index, &header));
            }
            None if row_count > 0 => {
                self.backend_call(|backend| backend.redraw_items(0, row_count - 1));
            }
            None => {}
        }
        Ok(index)
    }

    fn modify_part(
        &self,
        column: usize,
        part: usize,
        update: impl FnOnce(&mut Part) -> Result<()>,
    ) -> Result<()> {
        {
            let mut state = self.state.write();
            let columns = state.columns.len();
            let spec = state
                .columns
                .get_mut(column)
                .ok_or(TableError::TableColumnOutOfRange { column, columns })?;
            let parts = spec.parts.len();
            let target = spec
                .parts
                .get_mut(part)
                .ok_or(TableError::PartOutOfRange { part, parts })?;
            update(target)?;
        }
        self.redraw_all();
        Ok(())
    }

    fn change_selection(&self, change: impl FnOnce(&mut RowSelection) -> bool) -> bool {
        let (changed, before, after) = {
            let mut state = self.state.write();
            let before = state.selection.selected_rows();
            let changed = change(&mut state.selection);
            (changed, before, state.selection.selected_rows())
        };
        if changed {
            let mut rows: Vec<usize> = before
                .iter()
                .filter(|row| !after.contains(row))
                .chain(after.iter().filter(|row| !before.contains(row)))
                .copied()
                .collect();
            rows.sort_unstable();
            for row in rows {
                self.backend_call(|backend| backend.update_item(row));
            }
        }
        changed
    }

    fn commit(
        &self,
        row: usize,
        column: usize,
        part: usize,
        expected: PartKind,
        value: impl FnOnce(&TableModel, &PartBinding) -> CellValue,
    ) -> Result<PartRendering> {
        let binding = self.binding(column, part)?;
        if binding.kind != expected {
            return Err(TableError::PartKindMismatch {
                expected,
                actual: binding.kind,
            });
        }
        self.check_row(row)?;

        let _span = tracing::debug_span!(
            target: targets::TABLE,
            span_names::EDIT_COMMIT,
            table = ?self.id,
            row,
            column,
            part,
            kind = ?expected
        )
        .entered();

        if !render::resolve_editable(&self.model, row, &binding) {
            tracing::debug!(target: targets::TABLE, "part not editable at this row");
            return Err(TableError::NotEditable { row, column, part });
        }

        let value = value(&self.model, &binding);
        tracing::debug!(target: targets::TABLE, value_column = binding.value_column, tag = value.tag(), "committing edit");
        self.model.set_cell_value(row, binding.value_column, value);

        // The handler may have deleted the row while applying the edit.
        self.check_row(row)?;
        let rendering = render::render_part(&self.model, row, &binding, self.icon_metrics());
        if let Some(native_column) = self.native_column_index(column) {
            self.backend_call(|backend| backend.update_part(row, native_column, part, &rendering));
        }
        Ok(rendering)
    }
}

impl RowObserver for TableShared {
    fn row_inserted(&self, index: usize, row_count: usize) {
        if self.is_destroyed() {
            return;
        }
        {
            let mut state = self.state.write();
            state.row_count = row_count;
            state.selection.row_inserted(index);
        }
        tracing::debug!(target: targets::TABLE, table = ?self.id, index, row_count, "row inserted");

        // Every row from the insertion point on moved down.
        self.backend_call(|backend| backend.set_item_count(row_count));
        self.backend_call(|backend| backend.redraw_items(index, row_count - 1));
        self.backend_call(|backend| backend.insert_item(index));
    }

    fn row_changed(&self, index: usize) {
        if self.is_destroyed() {
            return;
        }
        tracing::debug!(target: targets::TABLE, table = ?self.id, index, "row changed");
        self.backend_call(|backend| backend.update_item(index));
    }

    fn row_deleted(&self, index: usize, row_count: usize) {
        if self.is_destroyed() {
            return;
        }
        {
            let mut state = self.state.write();
            state.row_count = row_count;
            state.selection.row_deleted(index);
        }
        tracing::debug!(target: targets::TABLE, table = ?self.id, index, row_count, "row deleted");

        self.backend_call(|backend| backend.delete_item(index));
        self.backend_call(|backend| backend.set_item_count(row_count));
        if index < row_count {
            let _perf = PerfSpan::new("redraw_after_delete");
            self.backend_call(|backend| backend.redraw_items(index, row_count - 1));
        }
    }
}

fn report_backend_failure(result: BackendResult) {
    if let Err(err) = result {
        tracing::warn!(target: targets::BACKEND, error = %err, "native call failed");
    }
}

/// Handle to one column of a [`Table`].
///
/// Handles do not keep the table alive. Once the table is destroyed, every
/// operation returns [`TableError::Destroyed`].
#[derive(Clone)]
pub struct TableColumn {
    table: Weak<TableShared>,
    index: usize,
}

assert_impl_all!(TableColumn: Send, Sync, Clone);

impl TableColumn {
    fn shared(&self) -> Result<Arc<TableShared>> {
        self.table
            .upgrade()
            .filter(|shared| !shared.is_destroyed())
            .ok_or(TableError::Destroyed)
    }

    /// Position of the column in its table.
    pub fn index(&self) -> usize {
        self.index
    }

    fn read<T>(&self, operation: &str, view: impl FnOnce(&ColumnSpec) -> T) -> Result<T> {
        let shared = self.shared()?;
        shared.affinity.check_same_thread(operation);
        let state = shared.state.read();
        Ok(view(&state.columns[self.index]))
    }

    /// Snapshot of the column description.
    pub fn spec(&self) -> Result<ColumnSpec> {
        self.read("TableColumn::spec", ColumnSpec::clone)
    }

    pub fn name(&self) -> Result<String> {
        self.read("TableColumn::name", |spec| spec.name.clone())
    }

    pub fn part_count(&self) -> Result<usize> {
        self.read("TableColumn::part_count", |spec| spec.parts.len())
    }

    fn append(
        &self,
        operation: &str,
        kind: PartKind,
        value_column: usize,
        editability: Editability,
        params: TextPartParams,
    ) -> Result<usize> {
        let shared = self.shared()?;
        shared.affinity.check_same_thread(operation);
        shared.append_part(self.index, kind, value_column, editability, params)
    }

    /// Appends a text part. Returns the part's index within the column.
    pub fn append_text_part(&self, value_column: usize, editability: Editability) -> Result<usize> {
        self.append_text_part_with_params(value_column, editability, TextPartParams::default())
    }

    /// Appends a text part with optional settings.
    pub fn append_text_part_with_params(
        &self,
        value_column: usize,
        editability: Editability,
        params: TextPartParams,
    ) -> Result<usize> {
        self.append(
            "TableColumn::append_text_part",
            PartKind::Text,
            value_column,
            editability,
            params,
        )
    }

    /// Appends an image part. Images are never interactive; `editability`
    /// is ignored and the part records [`Editability::Never`].
    pub fn append_image_part(&self, value_column: usize, editability: Editability) -> Result<usize> {
        self.append(
            "TableColumn::append_image_part",
            PartKind::Image,
            value_column,
            editability,
            TextPartParams::default(),
        )
    }

    /// Appends a checkbox part.
    pub fn append_checkbox_part(&self, value_column: usize, editability: Editability) -> Result<usize> {
        self.append(
            "TableColumn::append_checkbox_part",
            PartKind::Checkbox,
            value_column,
            editability,
            TextPartParams::default(),
        )
    }

    /// Appends a progress bar part. Progress bars are never interactive;
    /// `editability` is ignored and the part records [`Editability::Never`].
    pub fn append_progress_bar_part(
        &self,
        value_column: usize,
        editability: Editability,
    ) -> Result<usize> {
        self.append(
            "TableColumn::append_progress_bar_part",
            PartKind::ProgressBar,
            value_column,
            editability,
            TextPartParams::default(),
        )
    }

    /// Appends a button part; `clickability` gates whether it is sensitive.
    pub fn append_button_part(&self, value_column: usize, clickability: Editability) -> Result<usize> {
        self.append(
            "TableColumn::append_button_part",
            PartKind::Button,
            value_column,
            clickability,
            TextPartParams::default(),
        )
    }

    /// Sets a static editability override on a part. It takes precedence
    /// over the part's [`Editability`].
    pub fn set_part_editable(&self, part: usize, editable: bool) -> Result<()> {
        let shared = self.shared()?;
        shared.affinity.check_same_thread("TableColumn::set_part_editable");
        shared.modify_part(self.index, part, |target| {
            target.editable_override = Some(editable);
            Ok(())
        })
    }

    /// Sets or clears the model column supplying a text part's foreground
    /// color.
    pub fn set_part_text_color(&self, part: usize, color_column: Option<usize>) -> Result<()> {
        let shared = self.shared()?;
        shared.affinity.check_same_thread("TableColumn::set_part_text_color");
        if let Some(column) = color_column {
            if !shared.capabilities.text_color {
                return shared.unsupported("text color");
            }
            shared.check_model_column(column, ColumnType::Color)?;
        }
        shared.modify_part(self.index, part, |target| {
            if target.kind != PartKind::Text {
                return Err(TableError::PartKindMismatch {
                    expected: PartKind::Text,
                    actual: target.kind,
                });
            }
            target.color_column = color_column;
            Ok(())
        })
    }
}

impl fmt::Debug for TableColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableColumn")
            .field("index", &self.index)
            .field("alive", &self.shared().is_ok())
            .finish()
    }
}
