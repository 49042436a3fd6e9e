//! Document model types.
//!
//! The page side (`Page` → `Block` → `Line` → `Span`) is what the reader
//! produces and the heading analysis consumes. The outline side
//! (`HeadingCandidate`, `Outline`) is what the analysis produces.

mod outline;
mod page;
mod span;

pub use outline::{HeadingCandidate, HeadingLevel, Outline, OutlineEntry, UNKNOWN_TITLE};
pub use page::{Block, Line, Page};
pub use span::{BBox, Span, SpanFlags};
