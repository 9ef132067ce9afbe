//! Column and part descriptions.
//!
//! A table column is composed of one or more *parts*, each rendering one
//! facet of the cell from one model column: an icon followed by a label, a
//! checkbox followed by a label, and so on. Columns and parts are
//! append-only; once attached, a part's value column never changes.

use std::fmt;

use crate::value::ColumnType;

/// Whether a part accepts interactive edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Editability {
    /// Always editable, regardless of model content.
    Always,
    /// Never editable, regardless of model content.
    Never,
    /// Editable at a row iff the integer in this model column is nonzero.
    Column(usize),
}

impl Editability {
    /// The model column consulted per row, if any.
    pub fn model_column(&self) -> Option<usize> {
        match self {
            Editability::Column(column) => Some(*column),
            Editability::Always | Editability::Never => None,
        }
    }
}

/// The kind of a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PartKind {
    /// Text label, inline-editable.
    Text,
    /// Small icon.
    Image,
    /// Checkbox, clickable.
    Checkbox,
    /// Progress bar.
    ProgressBar,
    /// Push button, clickable.
    Button,
}

impl PartKind {
    /// All part kinds, in declaration order.
    pub const ALL: [PartKind; 5] = [
        PartKind::Text,
        PartKind::Image,
        PartKind::Checkbox,
        PartKind::ProgressBar,
        PartKind::Button,
    ];

    /// The column type a part of this kind reads its value from.
    pub fn value_type(&self) -> ColumnType {
        match self {
            PartKind::Text | PartKind::Button => ColumnType::String,
            PartKind::Image => ColumnType::Image,
            PartKind::Checkbox | PartKind::ProgressBar => ColumnType::Int,
        }
    }

    /// Whether parts of this kind react to user gestures.
    pub fn is_interactive(&self) -> bool {
        matches!(self, PartKind::Text | PartKind::Checkbox | PartKind::Button)
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            PartKind::Text => "text parts",
            PartKind::Image => "image parts",
            PartKind::Checkbox => "checkbox parts",
            PartKind::ProgressBar => "progress bar parts",
            PartKind::Button => "button parts",
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Optional settings for text parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextPartParams {
    /// Model column supplying the foreground color. Absent values fall back
    /// to the inherited foreground.
    pub color_model_column: Option<usize>,
}

/// One renderable facet of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub(crate) kind: PartKind,
    pub(crate) value_column: usize,
    pub(crate) editability: Editability,
    pub(crate) editable_override: Option<bool>,
    pub(crate) color_column: Option<usize>,
}

impl Part {
    pub(crate) fn new(kind: PartKind, value_column: usize, editability: Editability) -> Self {
        Self {
            kind,
            value_column,
            editability,
            editable_override: None,
            color_column: None,
        }
    }

    pub fn kind(&self) -> PartKind {
        self.kind
    }

    pub fn value_column(&self) -> usize {
        self.value_column
    }

    pub fn editability(&self) -> Editability {
        self.editability
    }

    /// The static editability override, if one was set.
    pub fn editable_override(&self) -> Option<bool> {
        self.editable_override
    }

    /// Foreground color column (text parts only).
    pub fn color_column(&self) -> Option<usize> {
        self.color_column
    }
}

/// Description of one visual column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub(crate) name: String,
    pub(crate) parts: Vec<Part>,
}

impl ColumnSpec {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
        }
    }

    /// Header text.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parts, in append order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// A column only exists natively once it has at least one part.
    pub fn is_realized(&self) -> bool {
        !self.parts.is_empty()
    }
}
