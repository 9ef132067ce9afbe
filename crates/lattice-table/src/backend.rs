//! The native toolkit seam.
//!
//! A [`Table`](crate::Table) owns one [`TableBackend`] and drives it with
//! structural updates: item counts, column insertion, redraw requests. The
//! backend never calls back into the table from these methods. When the
//! native widget draws, it pulls renderings through
//! [`Table::render_cell`](crate::Table::render_cell) on its own schedule.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::column::PartKind;
use crate::config::TableConfig;
use crate::error::BackendError;
use crate::render::PartRendering;

/// Result type for backend calls.
pub type BackendResult = std::result::Result<(), BackendError>;

/// A set of part kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartKindSet(u8);

impl PartKindSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every part kind.
    pub fn all() -> Self {
        PartKind::ALL.into_iter().collect()
    }

    const fn bit(kind: PartKind) -> u8 {
        1 << kind as u8
    }

    /// Returns this set with `kind` added.
    pub fn with(self, kind: PartKind) -> Self {
        Self(self.0 | Self::bit(kind))
    }

    /// Returns this set with `kind` removed.
    pub fn without(self, kind: PartKind) -> Self {
        Self(self.0 & !Self::bit(kind))
    }

    pub fn contains(&self, kind: PartKind) -> bool {
        self.0 & Self::bit(kind) != 0
    }
}

impl FromIterator<PartKind> for PartKindSet {
    fn from_iter<I: IntoIterator<Item = PartKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// What a backend can render.
///
/// Tables query this once, at construction, and refuse composition requests
/// the backend cannot honor instead of silently ignoring them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendCapabilities {
    /// More than one part per column.
    pub multi_part_columns: bool,
    /// Row background colors from a model column.
    pub row_background: bool,
    /// Per-part text colors from a model column.
    pub text_color: bool,
    /// Part kinds the backend can draw.
    pub part_kinds: PartKindSet,
}

impl BackendCapabilities {
    /// Everything supported.
    pub fn full() -> Self {
        Self {
            multi_part_columns: true,
            row_background: true,
            text_color: true,
            part_kinds: PartKindSet::all(),
        }
    }

    pub fn supports(&self, kind: PartKind) -> bool {
        self.part_kinds.contains(kind)
    }
}

impl Default for BackendCapabilities {
    fn default() -> Self {
        Self::full()
    }
}

/// Header description handed to the backend when a column is realized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub name: String,
    pub width: u32,
    pub resizable: bool,
}

/// A native list/table widget.
///
/// Structural methods return a [`BackendError`] when the toolkit rejects the
/// call. Tables log those and carry on; nothing reaches the application.
pub trait TableBackend: Send {
    /// What this backend can render.
    fn capabilities(&self) -> BackendCapabilities;

    /// Applies presentation options. Called once, before anything else.
    fn configure(&mut self, config: &TableConfig) -> BackendResult;

    /// Creates the native column at `native_index`.
    fn insert_column(&mut self, native_index: usize, header: &ColumnHeader) -> BackendResult;

    /// Sets the number of rows the widget displays.
    fn set_item_count(&mut self, count: usize) -> BackendResult;

    /// Invalidates rows `first..=last`.
    fn redraw_items(&mut self, first: usize, last: usize) -> BackendResult;

    /// Invalidates a single row.
    fn update_item(&mut self, index: usize) -> BackendResult;

    /// Native bookkeeping for a row inserted at `index` (selection, focus).
    fn insert_item(&mut self, index: usize) -> BackendResult;

    /// Native bookkeeping for the row deleted at `index`.
    fn delete_item(&mut self, index: usize) -> BackendResult;

    /// Pushes a freshly fetched rendering for one part of one cell.
    fn update_part(
        &mut self,
        row: usize,
        native_column: usize,
        part: usize,
        rendering: &PartRendering,
    ) -> BackendResult;

    /// Current menu-icon size, if the platform reports one.
    fn menu_icon_size(&self) -> Option<(u32, u32)>;

    /// Renderer padding around cell content (horizontal, vertical).
    fn cell_padding(&self) -> (u32, u32);
}

/// A structural call received by a [`HeadlessBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Configure,
    InsertColumn { native_index: usize, name: String },
    SetItemCount(usize),
    RedrawItems { first: usize, last: usize },
    UpdateItem(usize),
    InsertItem(usize),
    DeleteItem(usize),
    UpdatePart {
        row: usize,
        native_column: usize,
        part: usize,
        rendering: PartRendering,
    },
}

impl BackendCall {
    fn operation(&self) -> &'static str {
        match self {
            BackendCall::Configure => "configure",
            BackendCall::InsertColumn { .. } => "insert_column",
            BackendCall::SetItemCount(_) => "set_item_count",
            BackendCall::RedrawItems { .. } => "redraw_items",
            BackendCall::UpdateItem(_) => "update_item",
            BackendCall::InsertItem(_) => "insert_item",
            BackendCall::DeleteItem(_) => "delete_item",
            BackendCall::UpdatePart { .. } => "update_part",
        }
    }
}

#[derive(Debug)]
struct HeadlessState {
    capabilities: BackendCapabilities,
    menu_icon_size: Option<(u32, u32)>,
    cell_padding: (u32, u32),
    config: Option<TableConfig>,
    columns: Vec<ColumnHeader>,
    item_count: usize,
    calls: Vec<BackendCall>,
    rejected: HashSet<&'static str>,
}

/// A backend without a native surface.
///
/// Keeps the item count and column headers a real widget would hold and
/// records every structural call. Clones share state, so one clone can be
/// handed to a table while another is kept for inspection.
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    state: Arc<Mutex<HeadlessState>>,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::with_capabilities(BackendCapabilities::full())
    }

    /// Creates a headless backend advertising reduced capabilities.
    pub fn with_capabilities(capabilities: BackendCapabilities) -> Self {
        Self {
            state: Arc::new(Mutex::new(HeadlessState {
                capabilities,
                menu_icon_size: None,
                cell_padding: (0, 0),
                config: None,
                columns: Vec::new(),
                item_count: 0,
                calls: Vec::new(),
                rejected: HashSet::new(),
            })),
        }
    }

    /// Sets the menu-icon size reported to tables.
    pub fn set_menu_icon_size(&self, size: Option<(u32, u32)>) {
        self.state.lock().menu_icon_size = size;
    }

    /// Sets the cell padding reported to tables.
    pub fn set_cell_padding(&self, horizontal: u32, vertical: u32) {
        self.state.lock().cell_padding = (horizontal, vertical);
    }

    /// Makes every later call of `operation` (a [`TableBackend`] method
    /// name) fail.
    pub fn reject(&self, operation: &'static str) {
        self.state.lock().rejected.insert(operation);
    }

    /// Number of rows currently displayed.
    pub fn item_count(&self) -> usize {
        self.state.lock().item_count
    }

    /// Header names of the realized columns, in native order.
    pub fn column_names(&self) -> Vec<String> {
        self.state
            .lock()
            .columns
            .iter()
            .map(|header| header.name.clone())
            .collect()
    }

    /// The configuration received, if any.
    pub fn config(&self) -> Option<TableConfig> {
        self.state.lock().config.clone()
    }

    /// All structural calls received so far.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.lock().calls.clone()
    }

    /// Returns and clears the call log.
    pub fn take_calls(&self) -> Vec<BackendCall> {
        std::mem::take(&mut self.state.lock().calls)
    }

    fn record(&self, call: BackendCall, apply: impl FnOnce(&mut HeadlessState)) -> BackendResult {
        let mut state = self.state.lock();
        let operation = call.operation();
        if state.rejected.contains(operation) {
            return Err(BackendError::rejected(operation, "rejected by headless backend"));
        }
        apply(&mut state);
        state.calls.push(call);
        Ok(())
    }
}

impl TableBackend for HeadlessBackend {
    fn capabilities(&self) -> BackendCapabilities {
        self.state.lock().capabilities
    }

    fn configure(&mut self, config: &TableConfig) -> BackendResult {
        self.record(BackendCall::Configure, |state| {
            state.config = Some(config.clone());
        })
    }

    fn insert_column(&mut self, native_index: usize, header: &ColumnHeader) -> BackendResult {
        let call = BackendCall::InsertColumn {
            native_index,
            name: header.name.clone(),
        };
        self.record(call, |state| {
            let index = native_index.min(state.columns.len());
            state.columns.insert(index, header.clone());
        })
    }

    fn set_item_count(&mut self, count: usize) -> BackendResult {
        self.record(BackendCall::SetItemCount(count), |state| {
            state.item_count = count;
        })
    }

    fn redraw_items(&mut self, first: usize, last: usize) -> BackendResult {
        self.record(BackendCall::RedrawItems { first, last }, |_| {})
    }

    fn update_item(&mut self, index: usize) -> BackendResult {
        self.record(BackendCall::UpdateItem(index), |_| {})
    }

    fn insert_item(&mut self, index: usize) -> BackendResult {
        self.record(BackendCall::InsertItem(index), |_| {})
    }

    fn delete_item(&mut self, index: usize) -> BackendResult {
        self.record(BackendCall::DeleteItem(index), |_| {})
    }

    fn update_part(
        &mut self,
        row: usize,
        native_column: usize,
        part: usize,
        rendering: &PartRendering,
    ) -> BackendResult {
        let call = BackendCall::UpdatePart {
            row,
            native_column,
            part,
            rendering: rendering.clone(),
        };
        self.record(call, |_| {})
    }

    fn menu_icon_size(&self) -> Option<(u32, u32)> {
        self.state.lock().menu_icon_size
    }

    fn cell_padding(&self) -> (u32, u32) {
        self.state.lock().cell_padding
    }
}
