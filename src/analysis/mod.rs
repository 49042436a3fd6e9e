//! Heading analysis: style profiling, scoring, outline building and inspection.

mod builder;
mod inspect;
mod profile;
mod scorer;

pub use builder::OutlineBuilder;
pub use inspect::{InspectionReport, InspectionRow, Inspector, DEFAULT_PAGE_LIMIT};
pub use profile::{StyleProfile, StyleProfiler, DEFAULT_BODY_TEXT_SIZE};
pub use scorer::{
    is_numbered, is_upper_case, scorer_for, word_count, FontMetadataScorer, HeadingScorer,
    TextOnlyScorer,
};
