//! Line-by-line scoring dump for threshold calibration.

use std::fmt;
use std::io;

use serde::Serialize;

use crate::model::Page;

use super::profile::StyleProfile;
use super::scorer::scorer_for;

/// Pages inspected when no limit is given.
pub const DEFAULT_PAGE_LIMIT: usize = 3;

/// Longest text prefix kept per row, in characters.
const TEXT_PREVIEW_CHARS: usize = 50;

/// One scored line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionRow {
    pub page: u32,
    /// First 50 characters of the line text
    pub text: String,
    pub size: f32,
    pub bold: bool,
    pub score: u32,
}

/// Rows collected from the inspected pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionReport {
    pub body_text_size: f32,
    pub has_font_info: bool,
    /// Scoring policy in use
    pub scorer: &'static str,
    /// Page numbers that were inspected, in order
    pub pages: Vec<u32>,
    pub rows: Vec<InspectionRow>,
}

impl InspectionReport {
    /// Rows belonging to one page.
    pub fn rows_for(&self, page: u32) -> impl Iterator<Item = &InspectionRow> {
        self.rows.iter().filter(move |r| r.page == page)
    }

    /// Write the report as plain text.
    pub fn write_to<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl fmt::Display for InspectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Document Inspector ---")?;
        writeln!(f, "Body Text Size Determined: {}pt", self.body_text_size)?;
        writeln!(f, "Rich Font Info Detected: {}", self.has_font_info)?;
        writeln!(f, "Scoring Policy: {}", self.scorer)?;
        writeln!(f)?;
        writeln!(f, "--- Sample Spans and Scores ---")?;
        for &page in &self.pages {
            writeln!(f)?;
            writeln!(f, "--- Page {} ---", page)?;
            for row in self.rows_for(page) {
                writeln!(
                    f,
                    "Text: '{}...' | Size: {:.1} | Bold: {} | Score: {}",
                    row.text, row.size, row.bold, row.score
                )?;
            }
        }
        writeln!(f)?;
        writeln!(f, "--- End of Inspection ---")
    }
}

/// Re-scores lines of the first pages without affecting extraction.
#[derive(Debug, Clone, Copy)]
pub struct Inspector<'p> {
    profile: &'p StyleProfile,
    page_limit: usize,
}

impl<'p> Inspector<'p> {
    pub fn new(profile: &'p StyleProfile) -> Self {
        Self {
            profile,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Number of leading pages to inspect.
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = limit;
        self
    }

    /// Inspect pages.
    pub fn inspect(&self, pages: &[Page]) -> InspectionReport {
        let scorer = scorer_for(self.profile);
        let body = self.profile.body_text_size();
        let mut report = InspectionReport {
            body_text_size: body,
            has_font_info: self.profile.has_font_info(),
            scorer: scorer.name(),
            pages: Vec::new(),
            rows: Vec::new(),
        };

        for page in pages.iter().take(self.page_limit) {
            report.pages.push(page.number);
            for line in page.lines() {
                let text = line.text();
                let Some(span) = line.first_span() else {
                    continue;
                };
                if text.is_empty() {
                    continue;
                }

                let score = scorer.score(span, &text);
                let size = span.size_or(body);
                let bold = span.is_bold();
                if score > 0 || bold || size > body {
                    report.rows.push(InspectionRow {
                        page: page.number,
                        text: text.chars().take(TEXT_PREVIEW_CHARS).collect(),
                        size,
                        bold,
                        score,
                    });
                }
            }
        }

        report
    }
}
