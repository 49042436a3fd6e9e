//! # pdf-outline
//!
//! Heuristic title and heading outline extraction for PDF documents.
//!
//! Every line of text is scored on font size relative to the document's body
//! text, weight, section numbering and length. The earliest heading-like line
//! becomes the title and the rest form an H1/H2/H3 outline. Documents without
//! usable font sizes (scanned pages) fall back to text-only scoring.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outline::{extract_outline_from_file, render};
//!
//! fn main() -> pdf_outline::Result<()> {
//!     let outline = extract_outline_from_file("document.pdf")?;
//!
//!     println!("{}", outline.title);
//!     for entry in &outline.entries {
//!         println!("{} {} (page {})", entry.level, entry.text, entry.page);
//!     }
//!
//!     let json = render::to_json(&outline, render::JsonFormat::Pretty)?;
//!     std::fs::write("document.json", json)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two scoring policies**: font metadata for authored PDFs, text
//!   patterns for scanned ones
//! - **Tunable thresholds**: candidate cut-off and level boundaries
//! - **Batch mode**: one JSON file per PDF, optionally in parallel
//! - **Inspector**: per-line scores for calibrating thresholds

pub mod analysis;
pub mod batch;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod options;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use analysis::{
    HeadingScorer, InspectionReport, Inspector, OutlineBuilder, StyleProfile, StyleProfiler,
};
pub use batch::{BatchProcessor, BatchReport};
pub use detect::{has_pdf_extension, is_pdf_bytes, sniff_bytes, sniff_path, PdfHeader};
pub use error::{Error, Result};
pub use extract::OutlineExtractor;
pub use model::{
    BBox, Block, HeadingCandidate, HeadingLevel, Line, Outline, OutlineEntry, Page, Span,
    SpanFlags,
};
pub use options::{ErrorMode, OutlineOptions, PageSelection, ScoreThresholds};
pub use parser::PdfReader;
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Extract the title and outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::extract_outline_from_file;
///
/// let outline = extract_outline_from_file("document.pdf").unwrap();
/// println!("{} headings", outline.entries.len());
/// ```
pub fn extract_outline_from_file<P: AsRef<Path>>(path: P) -> Result<Outline> {
    OutlineExtractor::default().extract_file(path)
}

/// Extract with custom options.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::{extract_outline_with_options, OutlineOptions, PageSelection};
///
/// let options = OutlineOptions::new()
///     .lenient()
///     .with_pages(PageSelection::Range(1..=10));
/// let outline = extract_outline_with_options("document.pdf", options).unwrap();
/// ```
pub fn extract_outline_with_options<P: AsRef<Path>>(
    path: P,
    options: OutlineOptions,
) -> Result<Outline> {
    OutlineExtractor::new(options).extract_file(path)
}

/// Extract from PDF bytes.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::extract_outline_from_bytes;
///
/// let data = std::fs::read("document.pdf").unwrap();
/// let outline = extract_outline_from_bytes(&data).unwrap();
/// ```
pub fn extract_outline_from_bytes(data: &[u8]) -> Result<Outline> {
    OutlineExtractor::default().extract_bytes(data)
}

/// Extract from a reader.
pub fn extract_outline_from_reader<R: Read>(reader: R) -> Result<Outline> {
    OutlineExtractor::default().extract_reader(reader)
}

/// Extract from pages produced by another PDF layer.
///
/// # Example
///
/// ```
/// use pdf_outline::{extract_outline_from_pages, Block, Line, Page, Span};
///
/// let mut page = Page::letter(1);
/// page.add_block(Block::new(vec![
///     Line::from_spans(vec![Span::new("Annual Report", "Helvetica-Bold", 24.0, true)]),
///     Line::from_spans(vec![Span::new(
///         "plain body text that runs for well over ten words on this line",
///         "Helvetica",
///         11.0,
///         false,
///     )]),
/// ]));
///
/// let outline = extract_outline_from_pages(&[page]);
/// assert_eq!(outline.title, "Annual Report");
/// ```
pub fn extract_outline_from_pages(pages: &[Page]) -> Outline {
    OutlineExtractor::default().extract_pages(pages)
}

/// Extract a file and render it as pretty JSON.
pub fn outline_json<P: AsRef<Path>>(path: P) -> Result<String> {
    let outline = extract_outline_from_file(path)?;
    render::to_json(&outline, JsonFormat::Pretty)
}
