//! Page, block and line types.

use super::{BBox, Span};
use serde::{Deserialize, Serialize};

/// A single line of text: spans sharing a baseline, left to right.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Spans in reading order
    pub spans: Vec<Span>,
    /// Bounding box of the whole line
    pub bbox: BBox,
}

impl Line {
    /// Create a line whose bounding box covers all its spans.
    pub fn from_spans(spans: Vec<Span>) -> Self {
        let bbox = spans
            .iter()
            .map(|s| s.bbox)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        Self { spans, bbox }
    }

    /// Override the bounding box.
    pub fn with_bbox(mut self, bbox: BBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Span texts concatenated as-is, then trimmed.
    ///
    /// Word spacing is the reader's job: a span that starts a new word
    /// carries its own leading space.
    pub fn text(&self) -> String {
        let joined: String = self.spans.iter().map(|s| s.text.as_str()).collect();
        joined.trim().to_string()
    }

    /// The span that represents the line's style (the first one).
    pub fn first_span(&self) -> Option<&Span> {
        self.spans.first()
    }

    /// Top edge of the line.
    pub fn top(&self) -> f32 {
        self.bbox.y0
    }
}

/// A group of consecutive lines (roughly a paragraph).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub lines: Vec<Line>,
}

impl Block {
    /// Create a block from lines.
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }
}

/// A single page of extracted text geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Text blocks in reading order
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create an empty page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Create an empty US Letter page.
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// All lines on the page, block by block.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.blocks.iter().flat_map(|b| b.lines.iter())
    }

    /// All spans on the page, line by line.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.lines().flat_map(|l| l.spans.iter())
    }

    /// Check if the page has no text.
    pub fn is_empty(&self) -> bool {
        self.lines().all(|l| l.spans.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_text_joins_and_trims() {
        let line = Line::from_spans(vec![
            Span::new("  1.", "Arial", 12.0, true),
            Span::new(" Introduction ", "Arial", 12.0, true),
        ]);
        assert_eq!(line.text(), "1. Introduction");
    }

    #[test]
    fn test_line_bbox_covers_spans() {
        let line = Line::from_spans(vec![
            Span::new("a", "F", 10.0, false).with_bbox(BBox::new(72.0, 100.0, 80.0, 110.0)),
            Span::new("b", "F", 12.0, false).with_bbox(BBox::new(82.0, 98.0, 90.0, 111.0)),
        ]);
        assert_eq!(line.top(), 98.0);
        assert_eq!(line.bbox.x1, 90.0);
    }

    #[test]
    fn test_page_iterators() {
        let mut page = Page::letter(1);
        assert!(page.is_empty());
        page.add_block(Block::new(vec![
            Line::from_spans(vec![Span::text_only("one")]),
            Line::from_spans(vec![Span::text_only("two"), Span::text_only("three")]),
        ]));
        assert_eq!(page.lines().count(), 2);
        assert_eq!(page.spans().count(), 3);
        assert!(!page.is_empty());
    }
}
