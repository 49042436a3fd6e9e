//! Heading candidates and the final outline.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Title used when a document yields no heading candidates.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// A line whose heading score passed the candidate threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Trimmed line text
    pub text: String,
    /// Heuristic score
    pub score: u32,
    /// Font size of the line's first span
    pub size: f32,
    /// Page number (1-indexed)
    pub page: u32,
    /// Top edge of the line on its page
    pub y0: f32,
}

impl HeadingCandidate {
    /// Compare by reading order: page first, then vertical offset.
    pub fn reading_order(&self, other: &Self) -> Ordering {
        self.page
            .cmp(&other.page)
            .then_with(|| self.y0.total_cmp(&other.y0))
    }
}

/// Outline heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        };
        f.write_str(s)
    }
}

/// One heading in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Document title plus its ordered heading outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    pub title: String,
    #[serde(rename = "outline")]
    pub entries: Vec<OutlineEntry>,
}

impl Outline {
    /// Outline with no headings and the given title.
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Check if the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of headings at the given level.
    pub fn count_level(&self, level: HeadingLevel) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }
}

impl Default for Outline {
    fn default() -> Self {
        Self::empty(UNKNOWN_TITLE)
    }
}
