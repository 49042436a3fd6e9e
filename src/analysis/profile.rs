//! Document-wide style statistics.

use indexmap::IndexMap;

use crate::model::{Page, Span};

/// Body text size assumed for documents without any sized span.
pub const DEFAULT_BODY_TEXT_SIZE: f32 = 10.0;

/// Font statistics for one document.
///
/// Built once by [`StyleProfiler`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleProfile {
    size_counts: IndexMap<i32, usize>,
    font_counts: IndexMap<String, usize>,
    body_text_size: f32,
    has_font_info: bool,
}

impl StyleProfile {
    /// Profile every span of every page.
    pub fn from_pages(pages: &[Page]) -> Self {
        let mut profiler = StyleProfiler::new();
        for page in pages {
            profiler.add_page(page);
        }
        profiler.finish()
    }

    /// Most frequent rounded font size, or 10.0 for an empty document.
    pub fn body_text_size(&self) -> f32 {
        self.body_text_size
    }

    /// False when every span reports the same degenerate size (0 or 1),
    /// which is what rasterized pages look like.
    pub fn has_font_info(&self) -> bool {
        self.has_font_info
    }

    /// Occurrences per rounded font size, in first-seen order.
    pub fn size_counts(&self) -> &IndexMap<i32, usize> {
        &self.size_counts
    }

    /// Occurrences per font name, in first-seen order.
    pub fn font_counts(&self) -> &IndexMap<String, usize> {
        &self.font_counts
    }
}

/// Accumulates span statistics and derives a [`StyleProfile`].
#[derive(Debug, Default)]
pub struct StyleProfiler {
    size_counts: IndexMap<i32, usize>,
    font_counts: IndexMap<String, usize>,
}

impl StyleProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one span.
    pub fn add_span(&mut self, span: &Span) {
        if !span.font_name.is_empty() {
            *self.font_counts.entry(span.font_name.clone()).or_insert(0) += 1;
        }
        if let Some(size) = span.size {
            *self.size_counts.entry(round_size(size)).or_insert(0) += 1;
        }
    }

    /// Record every span on a page.
    pub fn add_page(&mut self, page: &Page) {
        for span in page.spans() {
            self.add_span(span);
        }
    }

    /// Derive body size and font-info signal.
    pub fn finish(self) -> StyleProfile {
        // Strict `>` keeps the first-seen size on ties.
        let mut body: Option<(i32, usize)> = None;
        for (&size, &count) in &self.size_counts {
            if body.map(|(_, best)| count > best).unwrap_or(true) {
                body = Some((size, count));
            }
        }
        let body_text_size = body
            .map(|(size, _)| size as f32)
            .unwrap_or(DEFAULT_BODY_TEXT_SIZE);

        let degenerate = self.size_counts.len() <= 1
            && (self.size_counts.contains_key(&0) || self.size_counts.contains_key(&1));
        let has_font_info = !degenerate;

        log::debug!(
            "Style profile: {} sizes, {} fonts, body size {}",
            self.size_counts.len(),
            self.font_counts.len(),
            body_text_size
        );
        if !has_font_info {
            log::info!("Document looks scanned: no usable font size information");
        }

        StyleProfile {
            size_counts: self.size_counts,
            font_counts: self.font_counts,
            body_text_size,
            has_font_info,
        }
    }
}

/// Round a font size to the nearest integer, ties to even.
fn round_size(size: f32) -> i32 {
    size.round_ties_even() as i32
}
