//! PDF document reader.

use std::io::Read;
use std::path::Path;

use crate::detect::sniff_path;
use crate::error::{Error, Result};
use crate::model::Page;
use crate::options::{ErrorMode, PageSelection};

use super::backend::{LopdfBackend, PdfBackend};
use super::layout::LayoutAnalyzer;

/// Reads a PDF into the page structure used by heading analysis.
pub struct PdfReader<B: PdfBackend = LopdfBackend> {
    backend: B,
    error_mode: ErrorMode,
    pages: PageSelection,
}

impl PdfReader<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        sniff_path(path)?;
        Ok(Self::with_backend(LopdfBackend::load_file(path)?))
    }

    /// Read a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        crate::detect::sniff_bytes(data)?;
        Ok(Self::with_backend(LopdfBackend::load_bytes(data)?))
    }

    /// Read a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }
}

impl<B: PdfBackend> PdfReader<B> {
    /// Wrap an already opened backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            error_mode: ErrorMode::Strict,
            pages: PageSelection::All,
        }
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Restrict reading to the selected pages.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Read the selected pages in page order.
    pub fn read_pages(&self) -> Result<Vec<Page>> {
        let analyzer = LayoutAnalyzer::new(&self.backend);
        let mut pages = Vec::new();

        for (number, page_id) in self.backend.pages() {
            if !self.pages.includes(number) {
                continue;
            }

            match analyzer.analyze_page(number, page_id) {
                Ok(page) => pages.push(page),
                Err(e) if self.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping text of page {}: {}", number, e);
                    let (width, height) = self.backend.page_size(page_id);
                    pages.push(Page::new(number, width, height));
                }
                Err(e) => {
                    return Err(Error::PageDecode {
                        page: number,
                        reason: e.to_string(),
                    })
                }
            }
        }

        Ok(pages)
    }

    /// Read a single page.
    pub fn read_page(&self, number: u32) -> Result<Page> {
        let pages = self.backend.pages();
        let page_id = pages
            .get(&number)
            .ok_or(Error::PageOutOfRange(number, pages.len() as u32))?;
        LayoutAnalyzer::new(&self.backend)
            .analyze_page(number, *page_id)
            .map_err(|e| Error::PageDecode {
                page: number,
                reason: e.to_string(),
            })
    }
}
