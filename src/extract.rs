//! Outline extraction pipeline.

use std::io::Read;
use std::path::Path;

use crate::analysis::{scorer_for, InspectionReport, Inspector, OutlineBuilder, StyleProfile};
use crate::error::Result;
use crate::model::{HeadingCandidate, Outline, Page};
use crate::options::OutlineOptions;
use crate::parser::PdfReader;

/// Extracts a title and heading outline from a document.
///
/// Runs a profile pass over every span, then scores each line with the
/// policy the profile selects and hands the candidates to the
/// [`OutlineBuilder`].
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    options: OutlineOptions,
}

impl OutlineExtractor {
    pub fn new(options: OutlineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Extract from a PDF file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        let pages = self.read(PdfReader::open(path)?)?;
        Ok(self.extract_pages(&pages))
    }

    /// Extract from PDF bytes.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<Outline> {
        let pages = self.read(PdfReader::from_bytes(data)?)?;
        Ok(self.extract_pages(&pages))
    }

    /// Extract from any reader.
    pub fn extract_reader<R: Read>(&self, reader: R) -> Result<Outline> {
        let pages = self.read(PdfReader::from_reader(reader)?)?;
        Ok(self.extract_pages(&pages))
    }

    /// Extract from already parsed pages.
    pub fn extract_pages(&self, pages: &[Page]) -> Outline {
        let profile = self.profile(pages);
        let candidates = self.candidates(pages, &profile);
        log::debug!("{} heading candidates", candidates.len());

        OutlineBuilder::new(self.options.thresholds)
            .with_fallback_title(self.options.fallback_title.clone())
            .build(candidates)
    }

    /// Profile pass.
    pub fn profile(&self, pages: &[Page]) -> StyleProfile {
        StyleProfile::from_pages(pages)
    }

    /// Scoring pass: every non-empty line scoring at least the candidate
    /// minimum, in encounter order.
    pub fn candidates(&self, pages: &[Page], profile: &StyleProfile) -> Vec<HeadingCandidate> {
        let scorer = scorer_for(profile);
        let min = self.options.thresholds.candidate_min;
        let mut candidates = Vec::new();

        for page in pages {
            for line in page.lines() {
                let text = line.text();
                if text.is_empty() {
                    continue;
                }
                let Some(span) = line.first_span() else {
                    continue;
                };

                let score = scorer.score(span, &text);
                if score >= min {
                    candidates.push(HeadingCandidate {
                        text,
                        score,
                        size: span.size_or(profile.body_text_size()),
                        page: page.number,
                        y0: line.top(),
                    });
                }
            }
        }

        candidates
    }

    /// Diagnostic dump of the first `page_limit` pages of a file.
    pub fn inspect_file<P: AsRef<Path>>(
        &self,
        path: P,
        page_limit: usize,
    ) -> Result<InspectionReport> {
        let pages = self.read(PdfReader::open(path)?)?;
        Ok(self.inspect_pages(&pages, page_limit))
    }

    /// Diagnostic dump of already parsed pages.
    pub fn inspect_pages(&self, pages: &[Page], page_limit: usize) -> InspectionReport {
        let profile = self.profile(pages);
        Inspector::new(&profile)
            .with_page_limit(page_limit)
            .inspect(pages)
    }

    fn read(&self, reader: PdfReader) -> Result<Vec<Page>> {
        reader
            .with_error_mode(self.options.error_mode)
            .with_pages(self.options.pages.clone())
            .read_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, Block, HeadingLevel, Line, Span};
    use crate::options::ScoreThresholds;

    fn line(text: &str, size: f32, bold: bool, top: f32) -> Line {
        let bbox = BBox::new(72.0, top, 400.0, top + size);
        Line::from_spans(vec![Span::new(text, "Helvetica", size, bold).with_bbox(bbox)])
    }

    fn page(number: u32, lines: Vec<Line>) -> Page {
        let mut page = Page::letter(number);
        page.add_block(Block::new(lines));
        page
    }

    const BODY: &str = "regular paragraph text that keeps going for more than ten words here";

    fn report() -> Vec<Page> {
        vec![
            page(
                1,
                vec![
                    line("Quarterly Review", 24.0, true, 60.0),
                    line(BODY, 12.0, false, 120.0),
                    line("1. Introduction", 18.0, true, 150.0),
                    line(BODY, 12.0, false, 180.0),
                    line(BODY, 12.0, false, 200.0),
                ],
            ),
            page(
                2,
                vec![
                    line("1.1 Scope", 14.0, false, 80.0),
                    line(BODY, 12.0, false, 100.0),
                    line("Notes", 12.0, true, 300.0),
                    line(BODY, 12.0, false, 320.0),
                ],
            ),
        ]
    }

    #[test]
    fn test_empty_document() {
        let outline = OutlineExtractor::default().extract_pages(&[]);
        assert_eq!(outline.title, "Unknown Title");
        assert!(outline.is_empty());

        let blank = vec![Page::letter(1), Page::letter(2)];
        assert_eq!(OutlineExtractor::default().extract_pages(&blank), Outline::default());
    }

    #[test]
    fn test_extract_outline() {
        let outline = OutlineExtractor::default().extract_pages(&report());

        assert_eq!(outline.title, "Quarterly Review");
        assert_eq!(outline.entries.len(), 3);
        assert_eq!(outline.entries[0].text, "1. Introduction");
        assert_eq!(outline.entries[0].level, HeadingLevel::H1);
        assert_eq!(outline.entries[0].page, 1);
        // 8 (size) + 8 (numbered) + 4 (short)
        assert_eq!(outline.entries[1].level, HeadingLevel::H1);
        assert_eq!(outline.entries[1].page, 2);
        // 7 (bold) + 4 (short)
        assert_eq!(outline.entries[2].level, HeadingLevel::H3);
    }

    #[test]
    fn test_candidate_threshold() {
        let pages = report();
        let extractor = OutlineExtractor::default();
        let profile = extractor.profile(&pages);
        let candidates = extractor.candidates(&pages, &profile);

        assert_eq!(candidates.len(), 4);
        assert!(candidates.iter().all(|c| c.score >= 5));
        assert_eq!(candidates[0].y0, 60.0);
        assert_eq!(candidates[2].size, 14.0);
    }

    #[test]
    fn test_out_of_order_pages_are_sorted() {
        let mut pages = report();
        pages.reverse();
        let outline = OutlineExtractor::default().extract_pages(&pages);
        assert_eq!(outline, OutlineExtractor::default().extract_pages(&report()));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let pages = report();
        let extractor = OutlineExtractor::default();
        assert_eq!(extractor.extract_pages(&pages), extractor.extract_pages(&pages));
    }

    #[test]
    fn test_scanned_document_uses_text_policy() {
        let pages = vec![page(
            1,
            vec![
                line("ANNUAL SUMMARY", 0.0, false, 50.0),
                line("KEY FINDINGS", 0.0, false, 90.0),
                line(BODY, 0.0, false, 120.0),
            ],
        )];
        let outline = OutlineExtractor::default().extract_pages(&pages);
        assert_eq!(outline.title, "ANNUAL SUMMARY");
        assert_eq!(outline.entries.len(), 1);
        assert_eq!(outline.entries[0].level, HeadingLevel::H2);
    }

    #[test]
    fn test_lines_without_text_are_skipped() {
        let pages = vec![page(
            1,
            vec![
                line("   ", 30.0, true, 10.0),
                Line::from_spans(vec![Span::text_only("Contents")]),
            ],
        )];
        let extractor = OutlineExtractor::default();
        let profile = extractor.profile(&pages);
        let candidates = extractor.candidates(&pages, &profile);
        assert_eq!(candidates.len(), 0);

        let candidates = OutlineExtractor::new(OutlineOptions::new().with_thresholds(
            ScoreThresholds {
                candidate_min: 4,
                ..ScoreThresholds::default()
            },
        ))
        .candidates(&pages, &profile);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].size, profile.body_text_size());
    }

    #[test]
    fn test_inspect_pages() {
        let report = OutlineExtractor::default().inspect_pages(&report(), 1);
        assert_eq!(report.pages, [1]);
        assert_eq!(report.body_text_size, 12.0);
        assert_eq!(report.rows.len(), 2);
    }
}
