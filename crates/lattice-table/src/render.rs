//! Per-part rendering.
//!
//! Rendering is a pure function of the model's current content and a
//! [`PartBinding`], the small record describing where a part reads its data.
//! Nothing here is cached: the native toolkit asks for a cell every time it
//! draws one, and every call goes back to the handler.

use lattice_table_core::logging::targets;

use crate::column::{Editability, Part, PartKind};
use crate::model::TableModel;
use crate::value::{CellValue, Color, ColumnType, Image};

/// Everything needed to render one part, captured from its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartBinding {
    /// Table column the part belongs to.
    pub column: usize,
    /// Index of the part within its column.
    pub part: usize,
    pub kind: PartKind,
    pub value_column: usize,
    pub editability: Editability,
    pub editable_override: Option<bool>,
    pub color_column: Option<usize>,
    /// The table-wide row background column at the time of capture.
    pub background_column: Option<usize>,
}

impl PartBinding {
    pub(crate) fn capture(
        column: usize,
        index: usize,
        part: &Part,
        background_column: Option<usize>,
    ) -> Self {
        Self {
            column,
            part: index,
            kind: part.kind,
            value_column: part.value_column,
            editability: part.editability,
            editable_override: part.editable_override,
            color_column: part.color_column,
            background_column,
        }
    }
}

/// Icon metrics reported by the backend, read on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IconMetrics {
    /// Platform menu-icon size, if the platform reports one.
    pub menu_icon: Option<(u32, u32)>,
    /// Renderer padding (horizontal, vertical).
    pub padding: (u32, u32),
}

impl IconMetrics {
    /// Icon edge used when the platform reports no menu-icon size.
    pub const FALLBACK_ICON_SIZE: u32 = 16;

    /// Edge length of the square icon itself.
    pub fn icon_size(&self) -> u32 {
        self.menu_icon
            .map(|(w, h)| w.max(h))
            .unwrap_or(Self::FALLBACK_ICON_SIZE)
    }

    /// Size of the box an image part occupies, padding included.
    pub fn fixed_size(&self) -> (u32, u32) {
        let icon = self.icon_size();
        (icon + 2 * self.padding.0, icon + 2 * self.padding.1)
    }
}

/// How a rendering affects a color the toolkit would otherwise inherit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ColorOverride {
    /// Leave whatever the toolkit has; nothing is configured.
    #[default]
    Inherit,
    /// A color source is configured but has no value for this row: reset to
    /// the default.
    Default,
    /// Paint with this color.
    Color(Color),
}

impl ColorOverride {
    fn from_cell(value: Option<Color>) -> Self {
        match value {
            Some(color) => ColorOverride::Color(color),
            None => ColorOverride::Default,
        }
    }

    /// The color to paint with, if any.
    pub fn color(&self) -> Option<Color> {
        match self {
            ColorOverride::Color(color) => Some(*color),
            ColorOverride::Inherit | ColorOverride::Default => None,
        }
    }
}

/// Progress bar state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Percentage in `0..=100`.
    Value(u8),
    /// The model reported -1. How this is drawn is up to the backend.
    Indeterminate,
}

impl Progress {
    fn from_int(value: i64, row: usize, column: usize) -> Self {
        match value {
            -1 => Progress::Indeterminate,
            0..=100 => Progress::Value(value as u8),
            _ => {
                tracing::warn!(target: targets::RENDER, row, column, value, "progress value out of range, clamping");
                Progress::Value(value.clamp(0, 100) as u8)
            }
        }
    }
}

/// What a part should display.
#[derive(Debug, Clone, PartialEq)]
pub enum PartContent {
    Text {
        text: String,
        editable: bool,
        foreground: ColorOverride,
    },
    Image {
        image: Option<Image>,
        /// Index into `image`'s representations that best fits the icon edge.
        representation: Option<usize>,
        /// Box the image is drawn into.
        size: (u32, u32),
    },
    Checkbox {
        checked: bool,
        activatable: bool,
    },
    ProgressBar(Progress),
    Button {
        label: String,
        sensitive: bool,
    },
}

/// One rendered part.
#[derive(Debug, Clone, PartialEq)]
pub struct PartRendering {
    pub content: PartContent,
    pub background: ColorOverride,
}

impl PartRendering {
    /// Returns `true` if the part accepts edits or clicks at this row.
    pub fn is_interactive(&self) -> bool {
        match &self.content {
            PartContent::Text { editable, .. } => *editable,
            PartContent::Checkbox { activatable, .. } => *activatable,
            PartContent::Button { sensitive, .. } => *sensitive,
            PartContent::Image { .. } | PartContent::ProgressBar(_) => false,
        }
    }
}

/// All parts of one cell, in column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellRendering {
    pub parts: Vec<PartRendering>,
}

/// Renders one part of one row.
pub fn render_part(
    model: &TableModel,
    row: usize,
    binding: &PartBinding,
    icons: IconMetrics,
) -> PartRendering {
    let value_column = binding.value_column;
    let content = match binding.kind {
        PartKind::Text => {
            let text = fetch_text(model, row, value_column);
            let editable = resolve_editable(model, row, binding);
            let foreground = match binding.color_column {
                Some(column) => ColorOverride::from_cell(fetch_color(model, row, column)),
                None => ColorOverride::Inherit,
            };
            PartContent::Text {
                text,
                editable,
                foreground,
            }
        }
        PartKind::Image => {
            let image = fetch_image(model, row, value_column);
            let representation = image
                .as_ref()
                .and_then(|image| image.representation_index_for(icons.icon_size()));
            PartContent::Image {
                image,
                representation,
                size: icons.fixed_size(),
            }
        }
        PartKind::Checkbox => PartContent::Checkbox {
            checked: fetch_int(model, row, value_column) != 0,
            activatable: resolve_editable(model, row, binding),
        },
        PartKind::ProgressBar => {
            let value = fetch_int(model, row, value_column);
            PartContent::ProgressBar(Progress::from_int(value, row, value_column))
        }
        PartKind::Button => PartContent::Button {
            label: fetch_text(model, row, value_column),
            sensitive: resolve_editable(model, row, binding),
        },
    };

    let background = match binding.background_column {
        Some(column) => ColorOverride::from_cell(fetch_color(model, row, column)),
        None => ColorOverride::Inherit,
    };

    tracing::trace!(
        target: targets::RENDER,
        row,
        column = binding.column,
        part = binding.part,
        kind = ?binding.kind,
        "rendered part"
    );

    PartRendering {
        content,
        background,
    }
}

/// Resolves whether a part is editable (or clickable) at `row`.
///
/// A static override set on the part takes precedence over its
/// [`Editability`].
pub fn resolve_editable(model: &TableModel, row: usize, binding: &PartBinding) -> bool {
    if let Some(editable) = binding.editable_override {
        return editable;
    }
    match binding.editability {
        Editability::Always => true,
        Editability::Never => false,
        Editability::Column(column) => fetch_int(model, row, column) != 0,
    }
}

pub(crate) fn fetch_text(model: &TableModel, row: usize, column: usize) -> String {
    match model.cell_value(row, column) {
        CellValue::Text(text) => text,
        CellValue::Absent => String::new(),
        other => contract_violation(row, column, ColumnType::String, &other),
    }
}

pub(crate) fn fetch_int(model: &TableModel, row: usize, column: usize) -> i64 {
    match model.cell_value(row, column) {
        CellValue::Int(value) => value,
        CellValue::Absent => 0,
        other => contract_violation(row, column, ColumnType::Int, &other),
    }
}

pub(crate) fn fetch_color(model: &TableModel, row: usize, column: usize) -> Option<Color> {
    match model.cell_value(row, column) {
        CellValue::Color(color) => Some(color),
        CellValue::Absent => None,
        other => contract_violation(row, column, ColumnType::Color, &other),
    }
}

pub(crate) fn fetch_image(model: &TableModel, row: usize, column: usize) -> Option<Image> {
    match model.cell_value(row, column) {
        CellValue::Image(image) => Some(image),
        CellValue::Absent => None,
        other => contract_violation(row, column, ColumnType::Image, &other),
    }
}

#[cold]
#[track_caller]
fn contract_violation(row: usize, column: usize, expected: ColumnType, actual: &CellValue) -> ! {
    tracing::error!(
        target: targets::RENDER,
        row,
        column,
        %expected,
        actual = actual.tag(),
        "handler returned a value of the wrong type"
    );
    panic!(
        "cell ({row}, {column}) must hold {expected} or nothing, but the handler returned {}",
        actual.tag()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingHandler;
    use image::RgbaImage;
    use std::sync::Arc;

    const RED: Color = Color::from_rgb(1.0, 0.0, 0.0);

    fn binding(kind: PartKind, value_column: usize, editability: Editability) -> PartBinding {
        PartBinding {
            column: 0,
            part: 0,
            kind,
            value_column,
            editability,
            editable_override: None,
            color_column: None,
            background_column: None,
        }
    }

    fn fixture() -> (Arc<RecordingHandler>, TableModel) {
        // 0: text, 1: int, 2: color, 3: image, 4: int (editable flag)
        let handler = Arc::new(RecordingHandler::new(vec![
            ColumnType::String,
            ColumnType::Int,
            ColumnType::Color,
            ColumnType::Image,
            ColumnType::Int,
        ]));
        handler.push_row_silently(vec![
            "first".into(),
            1.into(),
            RED.into(),
            Image::new(16, 16).into(),
            0.into(),
        ]);
        handler.push_row_silently(vec![
            CellValue::Absent,
            (-1).into(),
            CellValue::Absent,
            CellValue::Absent,
            7.into(),
        ]);
        let model = TableModel::new(handler.clone());
        (handler, model)
    }

    #[test]
    fn test_icon_metrics() {
        let metrics = IconMetrics::default();
        assert_eq!(metrics.fixed_size(), (16, 16));

        let metrics = IconMetrics {
            menu_icon: Some((20, 24)),
            padding: (2, 1),
        };
        assert_eq!(metrics.icon_size(), 24);
        assert_eq!(metrics.fixed_size(), (28, 26));
    }

    #[test]
    fn test_text_part() {
        let (_handler, model) = fixture();
        let mut text = binding(PartKind::Text, 0, Editability::Column(4));
        text.color_column = Some(2);

        let first = render_part(&model, 0, &text, IconMetrics::default());
        assert_eq!(
            first.content,
            PartContent::Text {
                text: "first".into(),
                editable: false,
                foreground: ColorOverride::Color(RED),
            }
        );
        assert_eq!(first.background, ColorOverride::Inherit);

        let second = render_part(&model, 1, &text, IconMetrics::default());
        assert_eq!(
            second.content,
            PartContent::Text {
                text: String::new(),
                editable: true,
                foreground: ColorOverride::Default,
            }
        );
    }

    #[test]
    fn test_editability_override_wins() {
        let (_handler, model) = fixture();
        let mut text = binding(PartKind::Text, 0, Editability::Column(4));
        assert!(!resolve_editable(&model, 0, &text));

        text.editable_override = Some(true);
        assert!(resolve_editable(&model, 0, &text));

        text.editability = Editability::Always;
        text.editable_override = Some(false);
        assert!(!resolve_editable(&model, 1, &text));
    }

    #[test]
    fn test_progress_and_checkbox() {
        let (_handler, model) = fixture();
        let progress = binding(PartKind::ProgressBar, 1, Editability::Never);
        let checkbox = binding(PartKind::Checkbox, 1, Editability::Always);

        let rendered = render_part(&model, 1, &progress, IconMetrics::default());
        assert_eq!(rendered.content, PartContent::ProgressBar(Progress::Indeterminate));
        assert!(!rendered.is_interactive());

        let rendered = render_part(&model, 0, &checkbox, IconMetrics::default());
        assert_eq!(
            rendered.content,
            PartContent::Checkbox {
                checked: true,
                activatable: true,
            }
        );
    }

    #[test]
    fn test_progress_out_of_range_is_clamped() {
        assert_eq!(Progress::from_int(250, 0, 0), Progress::Value(100));
        assert_eq!(Progress::from_int(-7, 0, 0), Progress::Value(0));
        assert_eq!(Progress::from_int(42, 0, 0), Progress::Value(42));
    }

    #[test]
    fn test_image_part_uses_fixed_box() {
        let (_handler, model) = fixture();
        let image = binding(PartKind::Image, 3, Editability::Never);
        let metrics = IconMetrics {
            menu_icon: Some((16, 16)),
            padding: (1, 1),
        };

        match render_part(&model, 0, &image, metrics).content {
            PartContent::Image {
                image,
                representation,
                size,
            } => {
                assert!(image.is_some());
                // The fixture image has no pixel data at all.
                assert_eq!(representation, None);
                assert_eq!(size, (18, 18));
            }
            other => panic!("unexpected content {other:?}"),
        }

        match render_part(&model, 1, &image, metrics).content {
            PartContent::Image { image, .. } => assert!(image.is_none()),
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn test_image_part_picks_representation_for_icon_edge() {
        let handler = Arc::new(RecordingHandler::new(vec![ColumnType::Image]));
        let mut icon = Image::new(16, 16);
        icon.append(RgbaImage::new(16, 16));
        icon.append(RgbaImage::new(32, 32));
        handler.push_row_silently(vec![icon.clone().into()]);
        let model = TableModel::new(handler);
        let image = binding(PartKind::Image, 0, Editability::Never);

        let large = IconMetrics {
            menu_icon: Some((24, 24)),
            padding: (0, 0),
        };
        assert_eq!(
            render_part(&model, 0, &image, large).content,
            PartContent::Image {
                image: Some(icon.clone()),
                representation: Some(1),
                size: (24, 24),
            }
        );

        // Padding grows the box but not the icon edge.
        let padded = IconMetrics {
            menu_icon: Some((16, 16)),
            padding: (4, 4),
        };
        match render_part(&model, 0, &image, padded).content {
            PartContent::Image {
                representation,
                size,
                ..
            } => {
                assert_eq!(representation, Some(0));
                assert_eq!(size, (24, 24));
            }
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn test_background_rule() {
        let (_handler, model) = fixture();
        let mut button = binding(PartKind::Button, 0, Editability::Never);
        button.background_column = Some(2);

        let painted = render_part(&model, 0, &button, IconMetrics::default());
        assert_eq!(painted.background, ColorOverride::Color(RED));
        assert_eq!(painted.background.color(), Some(RED));

        let reset = render_part(&model, 1, &button, IconMetrics::default());
        assert_eq!(reset.background, ColorOverride::Default);
    }

    #[test]
    #[should_panic(expected = "must hold string or nothing")]
    fn test_wrong_tag_fails_fast() {
        let (_handler, model) = fixture();
        let text = binding(PartKind::Text, 1, Editability::Never);
        render_part(&model, 0, &text, IconMetrics::default());
    }
}
