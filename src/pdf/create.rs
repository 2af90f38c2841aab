//! From-scratch PDF page generation using lopdf
//!
//! [`PdfWriter`] accumulates text operators into a per-page content stream and
//! assembles a standalone document on save. It is the backing for the title
//! and index page renderers, and for generating fixture PDFs in tests.
//!
//! Resources and MediaBox are written onto every page dictionary rather than
//! inherited from the page tree node, so pages survive being pulled into a
//! merged document.

use std::fmt::Write as _;
use std::path::Path;

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::Result;
use crate::layout::{PageDimensions, Rgb};
use crate::pdf::fonts::FontKind;

/// Incremental writer for a generated PDF
pub struct PdfWriter {
    doc: Document,
    page: PageDimensions,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    content: String,
}

impl PdfWriter {
    /// Start a new document with the given page size.
    pub fn new(page: PageDimensions) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => FontKind::Regular.base_name(),
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => FontKind::Bold.base_name(),
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                FontKind::Regular.resource_name() => regular_id,
                FontKind::Bold.resource_name() => bold_id,
            },
        });

        Self {
            doc,
            page,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            content: String::new(),
        }
    }

    /// Set the fill color for subsequent text on the current page.
    pub fn set_fill_color(&mut self, color: Rgb) {
        let (r, g, b) = color;
        let _ = writeln!(self.content, "{r:.3} {g:.3} {b:.3} rg");
    }

    /// Draw a single line of text with its baseline at (x, y).
    ///
    /// The origin is the bottom-left corner of the page.
    pub fn draw_text(&mut self, x: f32, y: f32, font: FontKind, size: f32, text: &str) {
        let _ = writeln!(self.content, "BT");
        let _ = writeln!(self.content, "/{} {} Tf", font.resource_name(), size);
        let _ = writeln!(self.content, "1 0 0 1 {x:.2} {y:.2} Tm");
        let _ = writeln!(self.content, "({}) Tj", escape_pdf_string(text));
        let _ = writeln!(self.content, "ET");
    }

    /// Finish the current page and start a fresh one.
    ///
    /// Graphics state (including fill color) does not carry over.
    pub fn end_page(&mut self) {
        let content = std::mem::take(&mut self.content);
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                self.page.width.into(),
                self.page.height.into(),
            ],
            "Resources" => self.resources_id,
            "Contents" => content_id,
        });
        self.page_ids.push(page_id);
    }

    /// Number of pages finished so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Assemble the page tree and write the document to `path`.
    pub fn save(mut self, path: &Path) -> Result<()> {
        if !self.content.is_empty() {
            self.end_page();
        }

        let kids: Vec<Object> = self.page_ids.iter().map(|&id| id.into()).collect();
        let count = self.page_ids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        self.doc.compress();
        self.doc.save(path)?;
        Ok(())
    }
}

/// Escape special characters in PDF literal strings
pub(crate) fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
        .replace('\r', "\\r")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::metadata::count_pages;
    use tempfile::TempDir;

    #[test]
    fn test_writer_produces_requested_page_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("three.pdf");

        let mut writer = PdfWriter::new(PageDimensions::a4());
        for n in 1..=3 {
            writer.draw_text(72.0, 720.0, FontKind::Regular, 12.0, &format!("page {n}"));
            writer.end_page();
        }
        assert_eq!(writer.page_count(), 3);
        writer.save(&path).unwrap();

        assert_eq!(count_pages(&path).unwrap(), 3);
    }

    #[test]
    fn test_saved_document_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hello.pdf");

        let mut writer = PdfWriter::new(PageDimensions::a4());
        writer.set_fill_color((0.0, 0.0, 0.0));
        writer.draw_text(100.0, 700.0, FontKind::Bold, 25.0, "Hello (escaped) \\ text");
        writer.end_page();
        writer.save(&path).unwrap();

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_escape_pdf_string() {
        assert_eq!(escape_pdf_string("plain"), "plain");
        assert_eq!(escape_pdf_string("a(b)c"), "a\\(b\\)c");
        assert_eq!(escape_pdf_string("back\\slash"), "back\\\\slash");
    }
}
