//! PDF renderer — writes the block list onto US Letter pages with `lopdf`.
//!
//! Uses the standard Type1 Helvetica fonts (no embedding) with WinAnsiEncoding.
//! Lines are wrapped against static Helvetica metrics from `layout.rs`; a new
//! page starts whenever the next line would cross the bottom margin.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::document::Block;
use super::layout::{text_width, wrap_text, Font, PageGeometry};

const NAME_SIZE: f32 = 20.0;
const HEADLINE_SIZE: f32 = 12.0;
const CONTACT_SIZE: f32 = 9.5;
const HEADING_SIZE: f32 = 11.5;
const ENTRY_SIZE: f32 = 10.5;
const BODY_SIZE: f32 = 10.0;
const LINE_FACTOR: f32 = 1.3;
const BULLET_INDENT: f32 = 12.0;
const BULLET_GLYPH: &str = "•";

#[derive(Debug, thiserror::Error)]
#[error("PDF rendering failed: {0}")]
pub struct PdfError(String);

impl From<lopdf::Error> for PdfError {
    fn from(err: lopdf::Error) -> Self {
        PdfError(err.to_string())
    }
}

/// Accumulates content-stream operations page by page.
struct PageWriter {
    geometry: PageGeometry,
    pages: Vec<Vec<Operation>>,
    cursor_y: f32,
}

impl PageWriter {
    fn new(geometry: PageGeometry) -> Self {
        PageWriter {
            geometry,
            pages: vec![Vec::new()],
            cursor_y: geometry.top(),
        }
    }

    fn current(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Moves the cursor down by `height`, starting a new page when it would
    /// cross the bottom margin. Returns the baseline for the line.
    fn advance(&mut self, height: f32) -> f32 {
        if self.cursor_y - height < self.geometry.bottom() {
            self.pages.push(Vec::new());
            self.cursor_y = self.geometry.top();
        }
        self.cursor_y -= height;
        self.cursor_y + height * 0.22
    }

    fn gap(&mut self, height: f32) {
        // A gap at the very top of a page is dropped.
        if self.cursor_y < self.geometry.top() {
            self.cursor_y -= height;
        }
    }

    fn text_at(&mut self, font: Font, size: f32, x: f32, y: f32, text: &str) {
        let ops = self.current();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![font.resource_name().into(), real(size)],
        ));
        ops.push(Operation::new("Td", vec![real(x), real(y)]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    fn rule(&mut self, y: f32) {
        let left = self.geometry.margin;
        let right = self.geometry.width - self.geometry.margin;
        let ops = self.current();
        ops.push(Operation::new("w", vec![real(0.6)]));
        ops.push(Operation::new("m", vec![real(left), real(y)]));
        ops.push(Operation::new("l", vec![real(right), real(y)]));
        ops.push(Operation::new("S", vec![]));
    }

    /// Wrapped text starting at `indent`, one line per advance.
    fn paragraph(&mut self, font: Font, size: f32, indent: f32, text: &str) {
        let x = self.geometry.margin + indent;
        let width = self.geometry.text_width() - indent;
        for line in wrap_text(text, font, size, width) {
            let y = self.advance(size * LINE_FACTOR);
            self.text_at(font, size, x, y, &line);
        }
    }

    fn centered(&mut self, font: Font, size: f32, text: &str) {
        let width = self.geometry.text_width();
        for line in wrap_text(text, font, size, width) {
            let y = self.advance(size * LINE_FACTOR);
            let x = self.geometry.margin + (width - text_width(font, size, &line)).max(0.0) / 2.0;
            self.text_at(font, size, x, y, &line);
        }
    }
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

/// Maps text to WinAnsi bytes. Characters outside the encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}

fn layout_blocks(blocks: &[Block], centered_header: bool) -> Vec<Vec<Operation>> {
    let mut writer = PageWriter::new(PageGeometry::LETTER);
    let margin = writer.geometry.margin;
    let right_edge = writer.geometry.width - margin;

    for block in blocks {
        match block {
            Block::Name(name) => {
                if centered_header {
                    writer.centered(Font::Bold, NAME_SIZE, name);
                } else {
                    writer.paragraph(Font::Bold, NAME_SIZE, 0.0, name);
                }
            }
            Block::Headline(text) => {
                if centered_header {
                    writer.centered(Font::Regular, HEADLINE_SIZE, text);
                } else {
                    writer.paragraph(Font::Regular, HEADLINE_SIZE, 0.0, text);
                }
            }
            Block::Contact(items) => {
                let line = items.join("  |  ");
                if centered_header {
                    writer.centered(Font::Regular, CONTACT_SIZE, &line);
                } else {
                    writer.paragraph(Font::Regular, CONTACT_SIZE, 0.0, &line);
                }
            }
            Block::ProfileLine(text) => {
                writer.gap(4.0);
                writer.paragraph(Font::Regular, BODY_SIZE, 0.0, text);
            }
            Block::Heading(heading) => {
                writer.gap(10.0);
                let y = writer.advance(HEADING_SIZE * LINE_FACTOR);
                writer.text_at(Font::Bold, HEADING_SIZE, margin, y, &heading.to_uppercase());
                writer.rule(y - 3.0);
                writer.gap(3.0);
            }
            Block::Paragraph(text) => writer.paragraph(Font::Regular, BODY_SIZE, 0.0, text),
            Block::LabeledList { label, items } => {
                writer.paragraph(
                    Font::Regular,
                    BODY_SIZE,
                    0.0,
                    &format!("{label}: {}", items.join(", ")),
                );
            }
            Block::EntryTitle { text, dates } => {
                writer.gap(3.0);
                let dates_width = dates
                    .as_deref()
                    .map(|d| text_width(Font::Regular, BODY_SIZE, d) + 12.0)
                    .unwrap_or(0.0);
                let title_width = writer.geometry.text_width() - dates_width;
                let lines = wrap_text(text, Font::Bold, ENTRY_SIZE, title_width);
                for (i, line) in lines.iter().enumerate() {
                    let y = writer.advance(ENTRY_SIZE * LINE_FACTOR);
                    writer.text_at(Font::Bold, ENTRY_SIZE, margin, y, line);
                    if i == 0 {
                        if let Some(d) = dates.as_deref() {
                            let x = right_edge - text_width(Font::Regular, BODY_SIZE, d);
                            writer.text_at(Font::Regular, BODY_SIZE, x, y, d);
                        }
                    }
                }
            }
            Block::Subtitle(text) => writer.paragraph(Font::Regular, BODY_SIZE, 0.0, text),
            Block::Bullet(text) => {
                let x = margin + BULLET_INDENT;
                let width = writer.geometry.text_width() - BULLET_INDENT;
                for (i, line) in wrap_text(text, Font::Regular, BODY_SIZE, width).iter().enumerate() {
                    let y = writer.advance(BODY_SIZE * LINE_FACTOR);
                    if i == 0 {
                        writer.text_at(Font::Regular, BODY_SIZE, margin + 2.0, y, BULLET_GLYPH);
                    }
                    writer.text_at(Font::Regular, BODY_SIZE, x, y, line);
                }
            }
        }
    }

    writer.pages
}

/// Renders blocks to PDF bytes. CPU-bound; callers run it on the blocking pool.
pub fn render_pdf(blocks: &[Block], centered_header: bool) -> Result<Vec<u8>, PdfError> {
    let page_ops = layout_blocks(blocks, centered_header);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(Font::Regular));
    let bold_id = doc.add_object(font_dictionary(Font::Bold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource_name() => regular_id,
            Font::Bold.resource_name() => bold_id,
        },
    });

    let geometry = PageGeometry::LETTER;
    let mut kids: Vec<Object> = Vec::with_capacity(page_ops.len());
    for operations in page_ops {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            real(geometry.width),
            real(geometry.height),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| PdfError(format!("write failed: {e}")))?;
    Ok(bytes)
}

fn font_dictionary(font: Font) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("A•B"), vec![b'A', 0x95, b'B']);
        assert_eq!(encode_win_ansi("é"), vec![0xE9]);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
    }

    #[test]
    fn test_render_produces_pdf_header() {
        let bytes = render_pdf(&[Block::Name("Jane Doe".to_string())], false).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }

    #[test]
    fn test_long_documents_break_pages() {
        let mut blocks = vec![Block::Name("Jane Doe".to_string()), Block::Heading("Projects")];
        for i in 0..120 {
            blocks.push(Block::Bullet(format!("Highlight number {i} with enough words to be a line")));
        }
        let pages = layout_blocks(&blocks, false);
        assert!(pages.len() >= 2);

        let doc = Document::load_mem(&render_pdf(&blocks, false).unwrap()).unwrap();
        assert_eq!(doc.get_pages().len(), pages.len());
    }
}
