//! Title selection and level assignment.

use crate::model::{HeadingCandidate, HeadingLevel, Outline, OutlineEntry, UNKNOWN_TITLE};
use crate::options::ScoreThresholds;

/// Turns scored candidates into a title and a leveled outline.
///
/// Candidates are put into reading order first, the earliest one becomes the
/// title and every other one gets a level from its score alone.
#[derive(Debug, Clone)]
pub struct OutlineBuilder {
    thresholds: ScoreThresholds,
    fallback_title: String,
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new(ScoreThresholds::default())
    }
}

impl OutlineBuilder {
    pub fn new(thresholds: ScoreThresholds) -> Self {
        Self {
            thresholds,
            fallback_title: UNKNOWN_TITLE.to_string(),
        }
    }

    /// Title to use when there are no candidates.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }

    /// Level for a candidate score.
    pub fn level_for(&self, score: u32) -> HeadingLevel {
        if score > self.thresholds.h1_above {
            HeadingLevel::H1
        } else if score > self.thresholds.h2_above {
            HeadingLevel::H2
        } else {
            HeadingLevel::H3
        }
    }

    /// Build the outline.
    pub fn build(&self, mut candidates: Vec<HeadingCandidate>) -> Outline {
        if candidates.is_empty() {
            return Outline::empty(self.fallback_title.clone());
        }

        // Stable, so equal positions keep encounter order.
        candidates.sort_by(|a, b| a.reading_order(b));

        let mut iter = candidates.into_iter();
        let title = iter.next().map(|c| c.text).unwrap_or_default();
        let entries = iter
            .map(|c| OutlineEntry::new(self.level_for(c.score), c.text, c.page))
            .collect();

        Outline { title, entries }
    }
}
