//! Extraction options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::model::UNKNOWN_TITLE;

/// Options for reading a PDF and building its outline.
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// Error handling mode while reading pages
    pub error_mode: ErrorMode,

    /// Which pages to read
    pub pages: PageSelection,

    /// Score cut-offs for candidates and levels
    pub thresholds: ScoreThresholds,

    /// Title used when no heading candidate is found
    pub fallback_title: String,
}

impl OutlineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip pages whose content cannot be decoded).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set score thresholds.
    pub fn with_thresholds(mut self, thresholds: ScoreThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the title used for documents without headings.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            pages: PageSelection::All,
            thresholds: ScoreThresholds::default(),
            fallback_title: UNKNOWN_TITLE.to_string(),
        }
    }
}

/// Error handling mode while reading pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page error
    #[default]
    Strict,
    /// Log the page error and treat the page as empty
    Lenient,
}

/// Score cut-offs used by the outline builder.
///
/// These were tuned by hand against a small set of reports and are meant to
/// be recalibrated per corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreThresholds {
    /// Minimum score for a line to become a candidate (inclusive)
    pub candidate_min: u32,
    /// Scores strictly above this are H1
    pub h1_above: u32,
    /// Scores strictly above this (and not H1) are H2
    pub h2_above: u32,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            candidate_min: 5,
            h1_above: 18,
            h2_above: 12,
        }
    }
}

/// Page selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed, sorted, unique)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.binary_search(&page).is_ok(),
        }
    }

    /// The first `n` pages.
    pub fn first(n: u32) -> Self {
        PageSelection::Range(1..=n)
    }

    /// Parse a page selection string (e.g., "all", "1-10", "1,3,5-7").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                return Ok(PageSelection::Range(parse_bounds(start, end, s)?));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            match part.split_once('-') {
                Some((start, end)) => pages.extend(parse_bounds(start, end, s)?),
                None => pages.push(parse_page(part, s)?),
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

fn parse_page(part: &str, whole: &str) -> Result<u32> {
    match part.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(whole.to_string())),
        Ok(n) => Ok(n),
    }
}

fn parse_bounds(start: &str, end: &str, whole: &str) -> Result<RangeInclusive<u32>> {
    let start = parse_page(start, whole)?;
    let end = parse_page(end, whole)?;
    if start > end {
        return Err(Error::InvalidPageRange(whole.to_string()));
    }
    Ok(start..=end)
}
