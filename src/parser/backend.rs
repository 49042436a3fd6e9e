//! PDF backend abstraction layer.
//!
//! Layout analysis talks to the document only through [`PdfBackend`], so it
//! can be exercised against in-memory mocks. [`LopdfBackend`] is the real
//! implementation.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// US Letter, used when a page has no usable MediaBox.
pub const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// FontDescriptor `/Flags` bit 19 (ForceBold).
const FORCE_BOLD: i64 = 1 << 18;

/// Font information returned by the backend.
#[derive(Debug, Clone, Default)]
pub struct BackendFontInfo {
    /// Font resource name (key in the page's font dictionary).
    pub key: Vec<u8>,
    /// Base font name (e.g., "Helvetica-Bold").
    pub base_font: String,
    /// `/Encoding` name, when given as a name.
    pub encoding: Option<String>,
    /// Whether the font dictionary marks the face as bold.
    pub bold: bool,
}

/// A value from a PDF content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Create an operation.
    pub fn new(operator: impl Into<String>, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }

    /// Numeric operand at `idx`, if present.
    pub fn number(&self, idx: usize) -> Option<f32> {
        self.operands.get(idx).and_then(get_number_from_value)
    }
}

/// Abstract interface for PDF document access.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId).
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Page width and height in points.
    fn page_size(&self, page: PageId) -> (f32, f32);

    /// Return font info for a given page.
    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>>;

    /// Return the raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Parse raw content stream bytes into a sequence of operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Decode a text byte sequence shown on `page` with the given font.
    fn decode_text(&self, _page: PageId, font: Option<&BackendFontInfo>, bytes: &[u8]) -> String {
        decode_with_font(font, bytes)
    }
}

/// Decode text bytes from the font's encoding name alone.
///
/// Used when the font dictionary yields no usable encoding. Two-byte
/// `Identity-*` codes are read as UTF-16BE; everything else goes through
/// [`decode_text_simple`].
pub fn decode_with_font(font: Option<&BackendFontInfo>, bytes: &[u8]) -> String {
    let identity = font
        .and_then(|f| f.encoding.as_deref())
        .map(|enc| enc.starts_with("Identity"))
        .unwrap_or(false);

    if identity && bytes.len() >= 2 && bytes.len() % 2 == 0 {
        let units: Vec<u16> = bytes
            .chunks(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        let decoded = String::from_utf16_lossy(&units);
        if !decoded.chars().all(|c| c == '\u{FFFD}' || c == '\0') {
            return decoded;
        }
    }

    decode_text_simple(bytes)
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// Whether a base font name denotes a bold face.
pub fn is_bold_font_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    ["bold", "black", "heavy", "semibold", "demi"]
        .iter()
        .any(|marker| lower.contains(marker))
}

// ---------------------------------------------------------------------------
// LopdfBackend — concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
///
/// The document is owned by the backend and released when it is dropped.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path)?;
        Self::checked(doc)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Self::checked(doc)
    }

    fn checked(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok(),
            other => Some(other),
        }
    }

    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match self.resolve(obj)? {
            Object::Dictionary(d) => Some(d),
            Object::Stream(s) => Some(&s.dict),
            _ => None,
        }
    }

    /// Bold markers from the font dictionary and its descriptor.
    fn font_is_bold(&self, base_font: &str, font: &Dictionary) -> bool {
        if is_bold_font_name(base_font) {
            return true;
        }

        let Some(descriptor) = font
            .get(b"FontDescriptor")
            .ok()
            .and_then(|o| self.resolve_dict(o))
        else {
            return false;
        };

        let flags = descriptor
            .get(b"Flags")
            .ok()
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(0);
        let weight = descriptor
            .get(b"FontWeight")
            .ok()
            .and_then(|o| o.as_float().ok())
            .unwrap_or(0.0);

        flags & FORCE_BOLD != 0 || weight >= 600.0
    }

    /// MediaBox of a page, following `/Parent` for inherited values.
    fn media_box(&self, page: ObjectId) -> Option<(f32, f32)> {
        let mut current = self.doc.get_dictionary(page).ok();
        // Page trees are shallow; the bound guards against cycles.
        for _ in 0..32 {
            let dict = current?;
            if let Some(values) = dict
                .get(b"MediaBox")
                .ok()
                .and_then(|o| self.resolve(o))
                .and_then(|o| o.as_array().ok())
            {
                let nums: Vec<f32> = values.iter().filter_map(|v| v.as_float().ok()).collect();
                if nums.len() >= 4 {
                    return Some(((nums[2] - nums[0]).abs(), (nums[3] - nums[1]).abs()));
                }
            }
            current = dict.get(b"Parent").ok().and_then(|o| self.resolve_dict(o));
        }
        None
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_size(&self, page: PageId) -> (f32, f32) {
        self.media_box(page).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>> {
        let fonts = self
            .doc
            .get_page_fonts(page)
            .map_err(|e| Error::UnreadableDocument(format!("cannot read page fonts: {}", e)))?;

        let mut result = Vec::with_capacity(fonts.len());
        for (key, font_dict) in &fonts {
            let base_font = font_dict
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).into_owned())
                .unwrap_or_default();
            let encoding = font_dict.get(b"Encoding").ok().and_then(|o| match o {
                Object::Name(n) => Some(String::from_utf8_lossy(n).into_owned()),
                _ => None,
            });
            let bold = self.font_is_bold(&base_font, font_dict);

            result.push(BackendFontInfo {
                key: key.clone(),
                base_font,
                encoding,
                bold,
            });
        }
        Ok(result)
    }

    fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
        self.doc
            .get_page_content(page)
            .map_err(|e| Error::UnreadableDocument(format!("cannot read page content: {}", e)))
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content = Content::decode(data)
            .map_err(|e| Error::UnreadableDocument(format!("content stream: {}", e)))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font: Option<&BackendFontInfo>, bytes: &[u8]) -> String {
        if let (Some(font), Ok(lopdf_fonts)) = (font, self.doc.get_page_fonts(page)) {
            if let Some(font_dict) = lopdf_fonts.get(&font.key) {
                if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                    if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                        return text;
                    }
                }
            }
        }
        decode_with_font(font, bytes)
    }
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}

/// Extract a number from a [`PdfValue`].
pub fn get_number_from_value(val: &PdfValue) -> Option<f32> {
    match val {
        PdfValue::Integer(i) => Some(*i as f32),
        PdfValue::Real(r) => Some(*r),
        _ => None,
    }
}
