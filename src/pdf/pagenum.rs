//! Page-number stamping
//!
//! Stamps the absolute page number in a corner of every page from a
//! configurable start page onward. Independent of the stitching pipeline —
//! it operates on any existing PDF.

use std::fmt::Write as _;
use std::path::Path;

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::Result;
use crate::layout::{Rgb, STEEL_BLUE};
use crate::pdf::create::escape_pdf_string;
use crate::pdf::merge::save_atomic;

/// Resource name the stamp font is registered under; chosen to be unlikely
/// to collide with names already used by the source document.
const STAMP_FONT: &str = "FPgNo";

/// Options for page-number stamping
#[derive(Debug, Clone)]
pub struct PageNumberOptions {
    /// First page (1-based) to receive a number
    pub start_page: usize,
    pub font_size: f32,
    pub color: Rgb,
    /// Distance of the baseline below the top edge
    pub margin_top: f32,
    /// Distance of the number's right edge from the right edge of the page
    pub margin_right: f32,
}

impl Default for PageNumberOptions {
    fn default() -> Self {
        Self {
            start_page: 1,
            font_size: 12.0,
            color: STEEL_BLUE,
            margin_top: 20.0,
            margin_right: 40.0,
        }
    }
}

/// Stamp page numbers onto `input`, writing the result to `output`.
///
/// Pages before `start_page` are left untouched. A start page beyond the end
/// of the document stamps nothing but still writes the copy.
pub fn add_page_numbers(
    input: &Path,
    output: &Path,
    options: &PageNumberOptions,
) -> Result<()> {
    let mut doc = Document::load(input)?;

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let pages: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();
    for &(page_number, page_id) in &pages {
        if (page_number as usize) < options.start_page.max(1) {
            continue;
        }

        let (width, height) = page_size(&doc, page_id);
        let content = stamp_content(page_number as usize, width, height, options);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        add_font_to_page_resources(&mut doc, page_id, font_id)?;
        append_content_to_page(&mut doc, page_id, content_id)?;
    }

    save_atomic(&mut doc, output)
}

/// Content stream drawing one right-aligned page number near the top edge.
fn stamp_content(page_number: usize, width: f32, height: f32, options: &PageNumberOptions) -> String {
    let label = page_number.to_string();
    let (r, g, b) = options.color;
    // The digits in both Helvetica faces are 556/1000 em wide.
    let label_width = label.len() as f32 * options.font_size * 0.556;
    let x = width - options.margin_right - label_width;
    let y = height - options.margin_top;

    let mut content = String::new();
    let _ = writeln!(content, "q");
    let _ = writeln!(content, "BT");
    let _ = writeln!(content, "/{STAMP_FONT} {} Tf", options.font_size);
    let _ = writeln!(content, "{r:.3} {g:.3} {b:.3} rg");
    let _ = writeln!(content, "1 0 0 1 {x:.2} {y:.2} Tm");
    let _ = writeln!(content, "({}) Tj", escape_pdf_string(&label));
    let _ = writeln!(content, "ET");
    let _ = writeln!(content, "Q");
    content
}

/// Page size from the page's MediaBox, walking up the page tree for
/// inherited boxes. Falls back to A4.
fn page_size(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let mut current = page_id;
    for _ in 0..8 {
        let Ok(dict) = doc.get_object(current).and_then(Object::as_dict) else {
            break;
        };
        if let Some(size) = media_box_size(doc, dict) {
            return size;
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => current = parent,
            Err(_) => break,
        }
    }
    (595.28, 841.89)
}

fn media_box_size(doc: &Document, dict: &Dictionary) -> Option<(f32, f32)> {
    let media_box = match dict.get(b"MediaBox").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        direct => direct,
    };
    let values: Vec<f32> = media_box.as_array().ok()?.iter().filter_map(number).collect();
    match values.as_slice() {
        &[x0, y0, x1, y1] => Some((x1 - x0, y1 - y0)),
        _ => None,
    }
}

fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Register the stamp font in the page's Resources, dereferencing and
/// privatizing a shared Resources dictionary if necessary.
fn add_font_to_page_resources(doc: &mut Document, page_id: ObjectId, font_id: ObjectId) -> Result<()> {
    let resources = {
        let page_dict = doc.get_object(page_id).and_then(Object::as_dict)?;
        match page_dict.get(b"Resources") {
            Ok(Object::Dictionary(dict)) => dict.clone(),
            Ok(Object::Reference(id)) => doc
                .get_object(*id)
                .and_then(Object::as_dict)
                .map(Clone::clone)
                .unwrap_or_else(|_| Dictionary::new()),
            _ => Dictionary::new(),
        }
    };

    let mut resources = resources;
    let mut fonts = match resources.get(b"Font") {
        Ok(Object::Dictionary(existing)) => existing.clone(),
        _ => Dictionary::new(),
    };
    fonts.set(STAMP_FONT, font_id);
    resources.set("Font", fonts);

    let page_dict = doc.get_object_mut(page_id).and_then(Object::as_dict_mut)?;
    page_dict.set("Resources", resources);
    Ok(())
}

/// Append a content stream after the page's existing content so the stamp is
/// drawn on top.
fn append_content_to_page(doc: &mut Document, page_id: ObjectId, content_id: ObjectId) -> Result<()> {
    let page_dict = doc.get_object_mut(page_id).and_then(Object::as_dict_mut)?;

    match page_dict.get(b"Contents").ok().cloned() {
        Some(Object::Reference(existing)) => {
            page_dict.set(
                "Contents",
                vec![Object::Reference(existing), Object::Reference(content_id)],
            );
        }
        Some(Object::Array(mut contents)) => {
            contents.push(Object::Reference(content_id));
            page_dict.set("Contents", contents);
        }
        _ => {
            page_dict.set("Contents", vec![Object::Reference(content_id)]);
        }
    }
    Ok(())
}
