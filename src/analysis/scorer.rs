//! Heading scoring policies.
//!
//! Two independent strategies: [`FontMetadataScorer`] for digitally authored
//! documents and [`TextOnlyScorer`] for documents whose spans carry no usable
//! size information. [`scorer_for`] picks one per document.

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::Span;

use super::profile::StyleProfile;

lazy_static! {
    // Section numbering such as "2 " or "3.1 ". A trailing dot ("1. ") does not count.
    static ref NUMBERED: Regex = Regex::new(r"^\d+(\.\d+)*\s").unwrap();
    static ref LETTERED: Regex = Regex::new(r"^[A-Z]\.\s").unwrap();
}

/// Scores a line for how heading-like it is.
pub trait HeadingScorer {
    /// Score a line given its representative span and joined text.
    fn score(&self, span: &Span, text: &str) -> u32;

    /// Short policy name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Size, weight, numbering and length heuristics.
#[derive(Debug, Clone, Copy)]
pub struct FontMetadataScorer<'p> {
    profile: &'p StyleProfile,
}

impl<'p> FontMetadataScorer<'p> {
    pub fn new(profile: &'p StyleProfile) -> Self {
        Self { profile }
    }
}

impl HeadingScorer for FontMetadataScorer<'_> {
    fn score(&self, span: &Span, text: &str) -> u32 {
        let body = self.profile.body_text_size() as f64;
        let size = span.size_or(self.profile.body_text_size()) as f64;
        let mut score = 0;

        if size > body * 1.4 {
            score += 15;
        } else if size > body * 1.1 {
            score += 8;
        }
        if span.is_bold() {
            score += 7;
        }
        if is_numbered(text) {
            score += 8;
        }
        if word_count(text) < 10 {
            score += 4;
        }

        score
    }

    fn name(&self) -> &'static str {
        "font-metadata"
    }
}

/// Text pattern heuristics for scanned documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOnlyScorer;

impl HeadingScorer for TextOnlyScorer {
    fn score(&self, _span: &Span, text: &str) -> u32 {
        let words = word_count(text);
        let mut score = 0;

        if is_numbered(text) || LETTERED.is_match(text) {
            score += 20;
        }
        if is_upper_case(text) && words < 10 {
            score += 10;
        }
        if words < 8 {
            score += 5;
        }

        score
    }

    fn name(&self) -> &'static str {
        "text-only"
    }
}

/// Pick the scoring policy for a document.
pub fn scorer_for(profile: &StyleProfile) -> Box<dyn HeadingScorer + '_> {
    if profile.has_font_info() {
        Box::new(FontMetadataScorer::new(profile))
    } else {
        Box::new(TextOnlyScorer)
    }
}

/// Whether the text starts with a section number.
pub fn is_numbered(text: &str) -> bool {
    NUMBERED.is_match(text)
}

/// Whitespace separated word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// At least one cased character and no lowercase or titlecase ones.
pub fn is_upper_case(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() || is_titlecase(c) {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Titlecase letters such as `ǅ` are neither upper nor lower case but
/// still have a lowercase mapping.
fn is_titlecase(c: char) -> bool {
    !c.is_uppercase() && !c.is_lowercase() && c.to_lowercase().next() != Some(c)
}
