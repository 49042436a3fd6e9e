//! Layout analysis for PDF pages.
//!
//! Walks a page's content stream, collects positioned text runs, and groups
//! them into the line and block structure that heading analysis consumes.

use crate::error::Result;
use crate::model::{BBox, Block, Line, Page, Span};

use super::backend::{BackendFontInfo, ContentOp, PageId, PdfBackend, PdfValue};

/// TJ adjustments beyond this (in 1/1000 text space units) read as a word break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Rough glyph advance as a fraction of the font size.
const APPROX_CHAR_WIDTH: f32 = 0.5;

/// A text run in PDF user space (origin bottom-left, y is the baseline).
#[derive(Debug, Clone)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub font_size: f32,
    pub font_name: String,
    pub bold: bool,
}

impl TextRun {
    fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Convert to a model span on a page of the given height.
    fn into_span(self, page_height: f32) -> Span {
        let top = page_height - (self.y + self.font_size * 0.8);
        let bottom = page_height - (self.y - self.font_size * 0.2);
        let bbox = BBox::new(self.x, top, self.x + self.width, bottom);
        Span::new(self.text, self.font_name, self.font_size, self.bold).with_bbox(bbox)
    }
}

/// Layout analyzer for one document.
pub struct LayoutAnalyzer<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: PdfBackend + ?Sized> LayoutAnalyzer<'a, B> {
    /// Create a new layout analyzer.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Extract a page as blocks of lines of spans.
    pub fn analyze_page(&self, number: u32, page_id: PageId) -> Result<Page> {
        let (width, height) = self.backend.page_size(page_id);
        let mut page = Page::new(number, width, height);

        let runs = self.extract_runs(page_id)?;
        let lines = group_runs_into_lines(runs);
        log::debug!("Page {}: {} lines", number, lines.len());

        for block in group_lines_into_blocks(lines) {
            let lines = block
                .into_iter()
                .map(|runs| {
                    let spans = runs.into_iter().map(|r| r.into_span(height)).collect();
                    Line::from_spans(spans)
                })
                .collect();
            page.add_block(Block::new(lines));
        }

        Ok(page)
    }

    /// Extract positioned text runs from a page's content stream.
    pub fn extract_runs(&self, page_id: PageId) -> Result<Vec<TextRun>> {
        let content = self.backend.page_content(page_id)?;
        let ops = self.backend.decode_content(&content)?;
        // Missing font resources only cost us names and bold hints.
        let fonts = self.backend.page_fonts(page_id).unwrap_or_default();
        Ok(self.walk_ops(page_id, &ops, &fonts))
    }

    fn walk_ops(
        &self,
        page_id: PageId,
        ops: &[ContentOp],
        fonts: &[BackendFontInfo],
    ) -> Vec<TextRun> {
        let mut runs = Vec::new();
        let mut state = TextState::default();
        let mut in_text_block = false;

        for op in ops {
            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    state.matrix = TextMatrix::default();
                }
                "ET" => in_text_block = false,
                "Tf" => {
                    if let Some(PdfValue::Name(key)) = op.operands.first() {
                        state.font = fonts.iter().find(|f| &f.key == key).cloned();
                        if state.font.is_none() {
                            state.font = Some(BackendFontInfo {
                                key: key.clone(),
                                base_font: String::from_utf8_lossy(key).into_owned(),
                                ..Default::default()
                            });
                        }
                    }
                    state.font_size = op.number(1).unwrap_or(12.0);
                }
                "TL" => state.leading = op.number(0).unwrap_or(state.leading),
                "Td" => {
                    let (tx, ty) = (op.number(0).unwrap_or(0.0), op.number(1).unwrap_or(0.0));
                    state.matrix.translate(tx, ty);
                }
                "TD" => {
                    let ty = op.number(1).unwrap_or(0.0);
                    state.leading = -ty;
                    state.matrix.translate(op.number(0).unwrap_or(0.0), ty);
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        state.matrix.set([
                            op.number(0).unwrap_or(1.0),
                            op.number(1).unwrap_or(0.0),
                            op.number(2).unwrap_or(0.0),
                            op.number(3).unwrap_or(1.0),
                            op.number(4).unwrap_or(0.0),
                            op.number(5).unwrap_or(0.0),
                        ]);
                    }
                }
                "T*" => state.matrix.translate(0.0, -state.leading),
                "Tj" if in_text_block => {
                    if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                        let text = self.backend.decode_text(page_id, state.font.as_ref(), bytes);
                        state.show(text, &mut runs);
                    }
                }
                "TJ" if in_text_block => {
                    if let Some(PdfValue::Array(items)) = op.operands.first() {
                        let text = self.decode_tj(page_id, items, &state);
                        state.show(text, &mut runs);
                    }
                }
                "'" | "\"" => {
                    state.matrix.translate(0.0, -state.leading);
                    let idx = if op.operator == "\"" { 2 } else { 0 };
                    let operand = op.operands.get(idx);
                    if let (true, Some(PdfValue::Str(bytes))) = (in_text_block, operand) {
                        let text = self.backend.decode_text(page_id, state.font.as_ref(), bytes);
                        state.show(text, &mut runs);
                    }
                }
                _ => {}
            }
        }

        runs
    }

    /// Join a TJ array, turning large negative kerning into spaces.
    fn decode_tj(&self, page_id: PageId, items: &[PdfValue], state: &TextState) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                PdfValue::Str(bytes) => {
                    let text = self.backend.decode_text(page_id, state.font.as_ref(), bytes);
                    combined.push_str(&text);
                }
                PdfValue::Integer(_) | PdfValue::Real(_) => {
                    let adjustment = -super::backend::get_number_from_value(item).unwrap_or(0.0);
                    let wants_space = adjustment > TJ_SPACE_THRESHOLD
                        && combined
                            .chars()
                            .last()
                            .map(|c| !c.is_whitespace() && !is_spaceless_script_char(c))
                            .unwrap_or(false);
                    if wants_space {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }
        combined
    }
}

/// Text state carried across operators.
#[derive(Debug, Clone)]
struct TextState {
    matrix: TextMatrix,
    font: Option<BackendFontInfo>,
    font_size: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: TextMatrix::default(),
            font: None,
            font_size: 12.0,
            leading: 12.0,
        }
    }
}

impl TextState {
    /// Record a shown string and advance past it.
    fn show(&mut self, text: String, runs: &mut Vec<TextRun>) {
        let size = (self.font_size * self.matrix.scale()).abs();
        let width = text.chars().count() as f32 * size * APPROX_CHAR_WIDTH;
        let (x, y) = self.matrix.position();

        if !text.trim().is_empty() {
            let (font_name, bold) = match &self.font {
                Some(f) => (f.base_font.clone(), f.bold),
                None => (String::new(), false),
            };
            runs.push(TextRun {
                text,
                x,
                y,
                width,
                font_size: size,
                font_name,
                bold,
            });
        }

        self.matrix.advance(width / self.matrix.scale().max(f32::EPSILON));
    }
}

/// Text and line matrices for tracking position in the content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    text: [f32; 6],
    line: [f32; 6],
}

impl Default for TextMatrix {
    fn default() -> Self {
        let identity = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
        Self {
            text: identity,
            line: identity,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, m: [f32; 6]) {
        self.text = m;
        self.line = m;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        let l = self.line;
        self.line[4] = tx * l[0] + ty * l[2] + l[4];
        self.line[5] = tx * l[1] + ty * l[3] + l[5];
        self.text = self.line;
    }

    fn advance(&mut self, dx: f32) {
        self.text[4] += dx * self.text[0];
        self.text[5] += dx * self.text[1];
    }

    fn position(&self) -> (f32, f32) {
        (self.text[4], self.text[5])
    }

    /// Vertical scale factor of the text matrix.
    fn scale(&self) -> f32 {
        (self.text[1] * self.text[1] + self.text[3] * self.text[3]).sqrt()
    }
}

/// Group runs into lines by baseline, top to bottom then left to right.
///
/// A run that starts a new word gets a leading space so that lines can be
/// rebuilt by plain concatenation.
pub fn group_runs_into_lines(mut runs: Vec<TextRun>) -> Vec<Vec<TextRun>> {
    runs.sort_by(|a, b| b.y.total_cmp(&a.y).then_with(|| a.x.total_cmp(&b.x)));

    let mut lines: Vec<Vec<TextRun>> = Vec::new();
    let mut current: Vec<TextRun> = Vec::new();
    let mut current_y: Option<f32> = None;

    for run in runs {
        let tolerance = run.font_size * 0.3;
        match current_y {
            Some(y) if (run.y - y).abs() <= tolerance => current.push(run),
            _ => {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current_y = Some(run.y);
                current.push(run);
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.x.total_cmp(&b.x));
        insert_word_spaces(line);
    }
    lines
}

fn insert_word_spaces(line: &mut [TextRun]) {
    for i in 1..line.len() {
        let gap = line[i].x - line[i - 1].right();
        let threshold = line[i].font_size * APPROX_CHAR_WIDTH * 0.2;
        if gap <= threshold {
            continue;
        }

        let prev = line[i - 1].text.chars().last();
        let next = line[i].text.chars().next();
        let both_cjk = matches!((prev, next), (Some(p), Some(n))
            if is_spaceless_script_char(p) && is_spaceless_script_char(n));
        let has_space = prev.map(char::is_whitespace).unwrap_or(true)
            || next.map(char::is_whitespace).unwrap_or(true);

        if !both_cjk && !has_space {
            line[i].text.insert(0, ' ');
        }
    }
}

/// Group lines into blocks on large vertical gaps or font size changes.
pub fn group_lines_into_blocks(lines: Vec<Vec<TextRun>>) -> Vec<Vec<Vec<TextRun>>> {
    let avg_spacing = average_line_spacing(&lines);
    let mut blocks: Vec<Vec<Vec<TextRun>>> = Vec::new();
    let mut current: Vec<Vec<TextRun>> = Vec::new();

    for line in lines {
        let should_break = match (current.last(), line.first()) {
            (Some(prev), Some(curr)) => prev
                .first()
                .map(|p| {
                    (p.y - curr.y).abs() > avg_spacing * 1.5
                        || (p.font_size - curr.font_size).abs() > 1.0
                        || (p.x - curr.x).abs() > 20.0
                })
                .unwrap_or(false),
            _ => false,
        };
        if should_break {
            blocks.push(std::mem::take(&mut current));
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn average_line_spacing(lines: &[Vec<TextRun>]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .filter_map(|w| Some((w[0].first()?.y - w[1].first()?.y).abs()))
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

/// Check if a character is from a script that doesn't use word spaces.
///
/// Chinese and Japanese don't separate words with spaces; Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x20000..=0x2EBEF).contains(&code)
        || (0x3040..=0x30FF).contains(&code)
        || (0x3000..=0x303F).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::BTreeMap;

    struct MockBackend {
        ops: Vec<ContentOp>,
        fonts: Vec<BackendFontInfo>,
    }

    impl PdfBackend for MockBackend {
        fn pages(&self) -> BTreeMap<u32, PageId> {
            BTreeMap::from([(1, (3, 0))])
        }

        fn page_size(&self, _page: PageId) -> (f32, f32) {
            (612.0, 792.0)
        }

        fn page_fonts(&self, _page: PageId) -> Result<Vec<BackendFontInfo>> {
            Ok(self.fonts.clone())
        }

        fn page_content(&self, _page: PageId) -> Result<Vec<u8>> {
            Ok(vec![])
        }

        fn decode_content(&self, _data: &[u8]) -> Result<Vec<ContentOp>> {
            if self.ops.is_empty() {
                return Err(Error::UnreadableDocument("empty stream".to_string()));
            }
            Ok(self.ops.clone())
        }
    }

    fn name(s: &str) -> PdfValue {
        PdfValue::Name(s.as_bytes().to_vec())
    }

    fn string(s: &str) -> PdfValue {
        PdfValue::Str(s.as_bytes().to_vec())
    }

    fn fonts() -> Vec<BackendFontInfo> {
        vec![
            BackendFontInfo {
                key: b"F1".to_vec(),
                base_font: "Helvetica".to_string(),
                ..Default::default()
            },
            BackendFontInfo {
                key: b"F2".to_vec(),
                base_font: "Helvetica-Bold".to_string(),
                bold: true,
                ..Default::default()
            },
        ]
    }

    fn show_at(font: &str, size: i64, x: i64, y: i64, text: &str) -> Vec<ContentOp> {
        vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name(font), PdfValue::Integer(size)]),
            ContentOp::new("Td", vec![PdfValue::Integer(x), PdfValue::Integer(y)]),
            ContentOp::new("Tj", vec![string(text)]),
            ContentOp::new("ET", vec![]),
        ]
    }

    #[test]
    fn test_analyze_page_orders_lines_top_down() {
        let mut ops = show_at("F1", 11, 72, 600, "Body paragraph text");
        ops.extend(show_at("F2", 18, 72, 700, "Heading"));
        let backend = MockBackend { ops, fonts: fonts() };

        let page = LayoutAnalyzer::new(&backend).analyze_page(1, (3, 0)).unwrap();
        let lines: Vec<&Line> = page.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "Heading");
        assert!(lines[0].spans[0].is_bold());
        assert_eq!(lines[0].spans[0].size, Some(18.0));
        assert_eq!(lines[0].spans[0].font_name, "Helvetica-Bold");
        assert_eq!(lines[1].text(), "Body paragraph text");
        assert!(lines[0].top() < lines[1].top());
        // Different sizes start different blocks.
        assert_eq!(page.blocks.len(), 2);
    }

    #[test]
    fn test_tj_kerning_becomes_space() {
        let ops = vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), PdfValue::Integer(12)]),
            ContentOp::new(
                "TJ",
                vec![PdfValue::Array(vec![
                    string("Hello"),
                    PdfValue::Integer(-300),
                    string("World"),
                    PdfValue::Real(-20.0),
                    string("!"),
                ])],
            ),
            ContentOp::new("ET", vec![]),
        ];
        let backend = MockBackend { ops, fonts: fonts() };

        let runs = LayoutAnalyzer::new(&backend).extract_runs((3, 0)).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "Hello World!");
    }

    #[test]
    fn test_separate_runs_on_one_line_get_spaces() {
        let ops = vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F2"), PdfValue::Integer(12)]),
            ContentOp::new("Td", vec![PdfValue::Integer(72), PdfValue::Integer(700)]),
            ContentOp::new("Tj", vec![string("1.1")]),
            ContentOp::new("Tf", vec![name("F1"), PdfValue::Integer(12)]),
            ContentOp::new("Td", vec![PdfValue::Integer(30), PdfValue::Integer(0)]),
            ContentOp::new("Tj", vec![string("Background")]),
            ContentOp::new("ET", vec![]),
        ];
        let backend = MockBackend { ops, fonts: fonts() };

        let page = LayoutAnalyzer::new(&backend).analyze_page(1, (3, 0)).unwrap();
        let line = page.lines().next().unwrap();
        assert_eq!(line.text(), "1.1 Background");
        assert!(line.first_span().unwrap().is_bold());
    }

    #[test]
    fn test_whitespace_only_runs_are_dropped() {
        let mut ops = show_at("F1", 11, 72, 700, "   ");
        ops.extend(show_at("F1", 11, 72, 680, "Visible"));
        let backend = MockBackend { ops, fonts: fonts() };

        let runs = LayoutAnalyzer::new(&backend).extract_runs((3, 0)).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "Visible");
    }

    #[test]
    fn test_unknown_font_key_keeps_resource_name() {
        let backend = MockBackend {
            ops: show_at("F9", 10, 72, 700, "Orphan"),
            fonts: vec![],
        };
        let runs = LayoutAnalyzer::new(&backend).extract_runs((3, 0)).unwrap();
        assert_eq!(runs[0].font_name, "F9");
        assert!(!runs[0].bold);
    }

    #[test]
    fn test_decode_failure_propagates() {
        let backend = MockBackend {
            ops: vec![],
            fonts: vec![],
        };
        assert!(LayoutAnalyzer::new(&backend).analyze_page(1, (3, 0)).is_err());
    }

    #[test]
    fn test_spaceless_scripts() {
        assert!(is_spaceless_script_char('中'));
        assert!(is_spaceless_script_char('の'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('A'));
    }
}
