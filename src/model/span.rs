//! Span-level types.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in top-down page coordinates.
///
/// `y0` is the top edge and grows downward, so sorting by `y0` gives
/// top-to-bottom reading order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

bitflags! {
    /// Font flag bits as reported by text-extraction layers.
    ///
    /// Only [`SpanFlags::BOLD`] affects heading detection; it is folded into
    /// [`Span::bold`] when a span is built with [`Span::from_flags`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SpanFlags: u32 {
        const SUPERSCRIPT = 1;
        const ITALIC = 2;
        const SERIFED = 4;
        const MONOSPACED = 8;
        const BOLD = 16;
    }
}

/// A text run with uniform font, size and style.
///
/// `size` and `bold` are optional so that spans with missing metadata can
/// still flow through the pipeline; analysis substitutes the body text size
/// and `false` respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,
    /// Font name (e.g., "Helvetica-Bold"); empty when unknown
    pub font_name: String,
    /// Font size in points
    pub size: Option<f32>,
    /// Whether the font is bold
    pub bold: Option<bool>,
    /// Position on the page
    pub bbox: BBox,
}

impl Span {
    /// Create a span with full metadata.
    pub fn new(
        text: impl Into<String>,
        font_name: impl Into<String>,
        size: f32,
        bold: bool,
    ) -> Self {
        Self {
            text: text.into(),
            font_name: font_name.into(),
            size: Some(size),
            bold: Some(bold),
            bbox: BBox::default(),
        }
    }

    /// Create a span from a font-flags bitmask.
    pub fn from_flags(
        text: impl Into<String>,
        font_name: impl Into<String>,
        size: f32,
        flags: SpanFlags,
    ) -> Self {
        Self::new(text, font_name, size, flags.contains(SpanFlags::BOLD))
    }

    /// Create a span carrying only text.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_name: String::new(),
            size: None,
            bold: None,
            bbox: BBox::default(),
        }
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: BBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Whether the span is set in a bold face. Unknown counts as not bold.
    pub fn is_bold(&self) -> bool {
        self.bold.unwrap_or(false)
    }

    /// Font size, or `fallback` when the span has none.
    pub fn size_or(&self, fallback: f32) -> f32 {
        self.size.unwrap_or(fallback)
    }
}
