use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};

use super::text::{to_win_ansi, wrap};
use crate::core::KsefError;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
const BODY_SIZE: i64 = 10;
const HEADING_SIZE: i64 = 13;
const TITLE_SIZE: i64 = 18;
const LINE_HEIGHT: i64 = 14;
// Characters per body-size line; continuation lines are indented.
const MAX_CHARS: usize = 92;
const CONTINUATION_INDENT: i64 = 12;

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

fn pdf_err(e: impl std::fmt::Display) -> KsefError {
    KsefError::Render(e.to_string())
}

/// Top-to-bottom text layout on A4 pages.
pub struct Layout {
    pages: Vec<Vec<Operation>>,
    y: i64,
}

impl Layout {
    pub fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.text_line(FONT_BOLD, TITLE_SIZE, MARGIN, text);
        self.y -= LINE_HEIGHT / 2;
        self
    }

    pub fn heading(&mut self, text: &str) -> &mut Self {
        self.y -= LINE_HEIGHT / 2;
        self.text_line(FONT_BOLD, HEADING_SIZE, MARGIN, text)
    }

    pub fn line(&mut self, text: &str) -> &mut Self {
        self.text_line(FONT_REGULAR, BODY_SIZE, MARGIN, text)
    }

    pub fn field(&mut self, label: &str, value: &str) -> &mut Self {
        self.line(&format!("{label}: {value}"))
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Draw `text`, wrapping onto indented continuation lines when it is
    /// wider than the page.
    fn text_line(&mut self, font: &str, size: i64, x: i64, text: &str) -> &mut Self {
        let max_chars = (MAX_CHARS as i64 * BODY_SIZE / size).max(1) as usize;
        for (i, piece) in wrap(text, max_chars).iter().enumerate() {
            let x = if i == 0 { x } else { x + CONTINUATION_INDENT };
            self.draw(font, size, x, piece);
        }
        self
    }

    fn draw(&mut self, font: &str, size: i64, x: i64, text: &str) {
        if self.y - size < MARGIN {
            self.pages.push(Vec::new());
            self.y = PAGE_HEIGHT - MARGIN;
        }
        self.y -= size.max(LINE_HEIGHT);

        let encoded = to_win_ansi(text);
        if let Some(ops) = self.pages.last_mut() {
            ops.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(font.into()), Object::Integer(size)]),
                Operation::new("Td", vec![Object::Integer(x), Object::Integer(self.y)]),
                Operation::new("Tj", vec![Object::String(encoded, StringFormat::Literal)]),
                Operation::new("ET", vec![]),
            ]);
        }
    }

    /// Assemble the pages into a PDF and serialize it.
    pub fn finish(self, title: &str) -> Result<Vec<u8>, KsefError> {
        let mut doc = Document::with_version("1.7");

        let pages_id = doc.new_object_id();
        let regular_id = add_font(&mut doc, "Helvetica");
        let bold_id = add_font(&mut doc, "Helvetica-Bold");
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                FONT_REGULAR => Object::Reference(regular_id),
                FONT_BOLD => Object::Reference(bold_id),
            },
        });

        let mut kids = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations }.encode().map_err(pdf_err)?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(PAGE_WIDTH),
                    Object::Integer(PAGE_HEIGHT),
                ],
                "Contents" => Object::Reference(content_id),
                "Resources" => Object::Reference(resources_id),
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(count),
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(to_win_ansi(title), StringFormat::Literal),
            "Producer" => Object::string_literal(concat!("ksef-pdf ", env!("CARGO_PKG_VERSION"))),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc.trailer.set("Info", Object::Reference(info_id));
        doc.compress();

        let mut output = Vec::new();
        doc.save_to(&mut output).map_err(pdf_err)?;
        Ok(output)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

fn add_font(doc: &mut Document, base_font: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    })
}
