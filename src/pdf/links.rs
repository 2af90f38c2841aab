//! Hyperlink annotation of the index page
//!
//! Adds one clickable link annotation per index entry, pointing at the
//! top-left of the entry's target page. Hit rectangles are placed
//! analytically from the index layout's line spacing rather than from
//! measured glyph positions, so entries whose titles wrapped onto multiple
//! lines drift; that approximation is accepted. Annotation is best-effort:
//! on any failure the output becomes a plain copy of the input document and
//! the run carries on.

use std::fs;
use std::path::Path;

use log::warn;
use lopdf::{dictionary, Document, Object};

use crate::error::{Error, Result};
use crate::layout::IndexLayout;
use crate::resolve::IndexEntry;

/// Annotate the assembled document's index page with entry hyperlinks.
///
/// Writes the result to `output` and returns `true` if links were added, or
/// `false` if annotation failed and `output` is an unmodified copy of
/// `input`. Only the fallback copy itself failing is an error.
pub fn annotate_index(
    input: &Path,
    output: &Path,
    entries: &[IndexEntry],
    layout: &IndexLayout,
) -> Result<bool> {
    match try_annotate(input, output, entries, layout) {
        Ok(()) => Ok(true),
        Err(err) => {
            warn!("could not add hyperlinks, copying document unlinked: {err}");
            copy_unlinked(input, output)?;
            Ok(false)
        }
    }
}

fn try_annotate(
    input: &Path,
    output: &Path,
    entries: &[IndexEntry],
    layout: &IndexLayout,
) -> Result<()> {
    let mut doc = Document::load(input)?;
    let pages = doc.get_pages();
    let page_count = pages.len();

    let &index_page_id = pages.get(&1).ok_or_else(|| Error::EmptyPdf(input.to_path_buf()))?;

    // Build the annotation objects first; the index page is touched last.
    let mut annotation_ids = Vec::with_capacity(entries.len());
    let mut y = layout.first_entry_baseline();
    for entry in entries {
        let &target_id = pages.get(&(entry.target_page as u32)).ok_or(Error::PageOutOfRange {
            page: entry.target_page,
            pages: page_count,
        })?;

        let annotation = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => vec![
                layout.margins.left.into(),
                (y - layout.line_spacing()).into(),
                (layout.page.width - layout.margins.right).into(),
                y.into(),
            ],
            "Dest" => vec![
                target_id.into(),
                "XYZ".into(),
                0.into(),
                layout.page.height.into(),
                0.into(),
            ],
            "Border" => vec![0.into(), 0.into(), 0.into()],
        };
        annotation_ids.push(Object::Reference(doc.add_object(annotation)));

        y -= layout.line_spacing() + layout.entry_gap;
    }

    let page_dict = doc
        .get_object_mut(index_page_id)
        .and_then(Object::as_dict_mut)?;

    // Extend an existing annotation array if the page carries one.
    let mut annotations = match page_dict.get(b"Annots") {
        Ok(Object::Array(existing)) => existing.clone(),
        _ => Vec::new(),
    };
    annotations.extend(annotation_ids);
    page_dict.set("Annots", annotations);

    super::merge::save_atomic(&mut doc, output)
}

/// Fallback: reproduce the input at the output path unmodified.
fn copy_unlinked(input: &Path, output: &Path) -> Result<()> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = tempfile::Builder::new()
        .prefix(".paper-stitch-")
        .suffix(".pdf")
        .tempfile_in(dir)?;
    fs::copy(input, temp.path())?;
    temp.persist(output).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
