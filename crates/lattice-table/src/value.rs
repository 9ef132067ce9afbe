//! Typed cell values crossing the handler boundary.
//!
//! Every cell a [`ModelHandler`](crate::model::ModelHandler) reports is a
//! [`CellValue`], a closed sum type. The [`ColumnType`] a handler declares
//! for a model column is only a validation hint checked when parts are
//! appended; rendering always dispatches on the value itself.

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

/// Static type of a model column, as declared by the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnType {
    /// Column holds text.
    String,
    /// Column holds image handles.
    Image,
    /// Column holds integers (checkbox state, progress, editability flags).
    Int,
    /// Column holds colors.
    Color,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Image => "image",
            Self::Int => "int",
            Self::Color => "color",
        })
    }
}

/// An RGBA color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color from RGBA components (0.0-1.0 range).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// A shared image handle with one or more pixel representations.
///
/// The same picture can be supplied at several scales (for example 16px and
/// 32px for standard and high-density displays). Cloning the handle is cheap;
/// equality is handle identity.
#[derive(Clone)]
pub struct Image {
    inner: Arc<ImageInner>,
}

#[derive(Clone)]
struct ImageInner {
    width: u32,
    height: u32,
    representations: Vec<RgbaImage>,
}

impl Image {
    /// Creates an image with the given nominal size and no representations.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            inner: Arc::new(ImageInner {
                width,
                height,
                representations: Vec::new(),
            }),
        }
    }

    /// Creates an image from a single representation, using its size as the
    /// nominal size.
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        let mut image = Self::new(pixels.width(), pixels.height());
        image.append(pixels);
        image
    }

    /// Adds a pixel representation.
    ///
    /// If other handles to this image exist, they keep the representations
    /// they already had.
    pub fn append(&mut self, pixels: RgbaImage) {
        Arc::make_mut(&mut self.inner).representations.push(pixels);
    }

    /// Nominal width in logical pixels.
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Nominal height in logical pixels.
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// All pixel representations, in append order.
    pub fn representations(&self) -> &[RgbaImage] {
        &self.inner.representations
    }

    /// Index of the representation best suited to a square box of `size`
    /// pixels.
    ///
    /// Returns the smallest representation whose larger side covers `size`,
    /// or the largest representation if none does.
    pub fn representation_index_for(&self, size: u32) -> Option<usize> {
        let reps = self.inner.representations.iter().enumerate();
        let extent = |rep: &RgbaImage| rep.width().max(rep.height());

        reps.clone()
            .filter(|(_, rep)| extent(rep) >= size)
            .min_by_key(|(_, rep)| extent(rep))
            .or_else(|| reps.max_by_key(|(_, rep)| extent(rep)))
            .map(|(index, _)| index)
    }

    /// The representation chosen by
    /// [`representation_index_for`](Self::representation_index_for).
    pub fn representation_for(&self, size: u32) -> Option<&RgbaImage> {
        self.representation_index_for(size)
            .map(|index| &self.inner.representations[index])
    }

    /// Returns `true` if both handles refer to the same image.
    pub fn ptr_eq(&self, other: &Image) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.inner.width)
            .field("height", &self.inner.height)
            .field("representations", &self.inner.representations.len())
            .finish()
    }
}

/// A single cell value as reported by, or sent to, a model handler.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value. Used for missing optional data and for button clicks.
    #[default]
    Absent,
    /// Text.
    Text(String),
    /// An image handle.
    Image(Image),
    /// An integer.
    Int(i64),
    /// A color.
    Color(Color),
}

impl CellValue {
    /// Returns `true` if this is `CellValue::Absent`.
    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    /// The column type this value belongs to, or `None` when absent.
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            CellValue::Absent => None,
            CellValue::Text(_) => Some(ColumnType::String),
            CellValue::Image(_) => Some(ColumnType::Image),
            CellValue::Int(_) => Some(ColumnType::Int),
            CellValue::Color(_) => Some(ColumnType::Color),
        }
    }

    /// Short name of the tag, for diagnostics.
    pub fn tag(&self) -> &'static str {
        match self {
            CellValue::Absent => "absent",
            CellValue::Text(_) => "string",
            CellValue::Image(_) => "image",
            CellValue::Int(_) => "int",
            CellValue::Color(_) => "color",
        }
    }

    /// Attempts to get the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the value as a color.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            CellValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Attempts to get the value as an image handle.
    pub fn as_image(&self) -> Option<&Image> {
        match self {
            CellValue::Image(img) => Some(img),
            _ => None,
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Int(n as i64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Int(b as i64)
    }
}

impl From<Color> for CellValue {
    fn from(c: Color) -> Self {
        CellValue::Color(c)
    }
}

impl From<Image> for CellValue {
    fn from(img: Image) -> Self {
        CellValue::Image(img)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(CellValue::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: u32) -> RgbaImage {
        RgbaImage::new(size, size)
    }

    #[test]
    fn test_cell_value_tags() {
        assert_eq!(CellValue::from("a").column_type(), Some(ColumnType::String));
        assert_eq!(CellValue::from(3).as_int(), Some(3));
        assert_eq!(CellValue::from(true).as_int(), Some(1));
        assert_eq!(CellValue::from(None::<Color>), CellValue::Absent);
        assert!(CellValue::Absent.column_type().is_none());
        assert_eq!(CellValue::Color(Color::from_rgb(0.0, 0.0, 1.0)).tag(), "color");
    }

    #[test]
    fn test_representation_selection() {
        let mut image = Image::new(16, 16);
        image.append(square(16));
        image.append(square(32));
        image.append(square(64));

        assert_eq!(image.representation_for(16).map(|r| r.width()), Some(16));
        assert_eq!(image.representation_for(20).map(|r| r.width()), Some(32));
        // Nothing covers 100px: fall back to the largest.
        assert_eq!(image.representation_for(100).map(|r| r.width()), Some(64));
        assert_eq!(image.representation_index_for(20), Some(1));
        assert!(Image::new(16, 16).representation_for(16).is_none());
    }

    #[test]
    fn test_image_handle_identity() {
        let image = Image::from_rgba(square(8));
        let same = image.clone();
        let other = Image::from_rgba(square(8));

        assert_eq!(image, same);
        assert_ne!(image, other);
        assert_eq!(CellValue::from(image.clone()).as_image(), Some(&image));
    }
}
