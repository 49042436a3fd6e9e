//! PDF reading: backend access, layout analysis and the page reader.

pub mod backend;
mod layout;
mod reader;

pub use backend::{BackendFontInfo, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue};
pub use layout::{group_lines_into_blocks, group_runs_into_lines, LayoutAnalyzer, TextRun};
pub use reader::PdfReader;
