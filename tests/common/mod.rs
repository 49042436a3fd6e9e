//! Builds small PDFs in memory for the integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

/// One line of text drawn on a page.
pub struct TextLine {
    pub font: &'static str,
    pub size: i64,
    pub x: i64,
    pub y: i64,
    pub text: &'static str,
}

/// Regular weight text.
pub fn regular(size: i64, y: i64, text: &'static str) -> TextLine {
    TextLine {
        font: "F1",
        size,
        x: 72,
        y,
        text,
    }
}

/// Bold text.
pub fn bold(size: i64, y: i64, text: &'static str) -> TextLine {
    TextLine {
        font: "F2",
        ..regular(size, y, text)
    }
}

pub const BODY: &str =
    "The quarterly figures show steady growth across all regions and product lines this year";

/// Build a PDF with one page per entry, using Helvetica (F1) and
/// Helvetica-Bold (F2).
pub fn build_pdf(pages: Vec<Vec<TextLine>>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let fonts = dictionary! {
        "F1" => regular_id,
        "F2" => bold_id,
    };
    finish(doc, fonts, pages, |text| Object::string_literal(text))
}

/// ToUnicode CMap mapping glyph ids 3..=93 onto U+0020..=U+007A.
const GLYPH_CMAP: &str = "/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
1 beginbfrange
<0003> <005D> <0020>
endbfrange
endcmap
CMapName currentdict /CIDInit /ProcSet findresource pop end
end
";

/// Glyph id of an ASCII character under [`GLYPH_CMAP`].
fn glyph_id(c: char) -> u16 {
    c as u16 - 0x20 + 3
}

/// Two-byte glyph ids, the way subsetting writers emit Identity-H text.
fn glyph_string(text: &str) -> Object {
    let bytes = text
        .chars()
        .flat_map(|c| glyph_id(c).to_be_bytes())
        .collect();
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn type0_font(doc: &mut Document, base_font: &str, to_unicode: lopdf::ObjectId) -> Object {
    let descendant = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => base_font,
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => Object::Integer(0),
        },
    });
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => base_font,
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![descendant.into()],
        "ToUnicode" => to_unicode,
    })
    .into()
}

/// Same layout as [`build_pdf`], but both fonts are Type0/Identity-H with
/// a ToUnicode CMap, so the content stream holds glyph ids, not characters.
pub fn build_identity_pdf(pages: Vec<Vec<TextLine>>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let cmap_id = doc.add_object(Stream::new(dictionary! {}, GLYPH_CMAP.as_bytes().to_vec()));
    let regular = type0_font(&mut doc, "ABCDEF+Helvetica", cmap_id);
    let bold = type0_font(&mut doc, "ABCDEF+Helvetica-Bold", cmap_id);
    let fonts = dictionary! {
        "F1" => regular,
        "F2" => bold,
    };
    finish(doc, fonts, pages, glyph_string)
}

fn finish(
    mut doc: Document,
    fonts: Dictionary,
    pages: Vec<Vec<TextLine>>,
    encode: fn(&str) -> Object,
) -> Vec<u8> {
    let pages_id = doc.new_object_id();
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for line in lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![line.font.into(), line.size.into()],
            ));
            operations.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![encode(line.text)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save pdf");
    bytes
}

/// A two page report with a title, three headings and body text.
pub fn sample_report() -> Vec<u8> {
    build_pdf(vec![
        vec![
            bold(24, 720, "Annual Report 2024"),
            regular(11, 680, BODY),
            regular(11, 666, BODY),
            bold(18, 620, "1. Introduction"),
            regular(11, 590, BODY),
            regular(11, 576, BODY),
        ],
        vec![
            regular(11, 720, "1.1 Background"),
            regular(11, 700, BODY),
            regular(11, 686, BODY),
            bold(18, 640, "2. Results"),
            regular(11, 610, BODY),
        ],
    ])
}
