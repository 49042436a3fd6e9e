//! Error types for pdf-outline.

use std::io;
use thiserror::Error;

/// Result type alias for pdf-outline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading a PDF or building its outline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header carries a version we cannot interpret.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The PDF layer could not open or parse the document.
    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// A page's content stream could not be decoded.
    #[error("Failed to decode page {page}: {reason}")]
    PageDecode {
        /// 1-indexed page number
        page: u32,
        /// Reason reported by the PDF layer
        reason: String,
    },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error while serializing an outline.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::UnreadableDocument(err.to_string()),
        }
    }
}
