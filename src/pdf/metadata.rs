//! PDF page counting
//!
//! The page count is read from the Count field of the root Pages node, which
//! handles nested page trees that a flat page enumeration would miss.

use std::path::Path;

use log::warn;
use lopdf::Document;

use crate::error::{Error, Result};

fn count_from_page_tree(doc: &Document) -> Result<usize> {
    let root_id = doc.trailer.get(b"Root")?.as_reference()?;
    let catalog = doc.get_object(root_id)?.as_dict()?;
    let pages_id = catalog.get(b"Pages")?.as_reference()?;
    let pages = doc.get_object(pages_id)?.as_dict()?;
    let count = pages.get(b"Count")?.as_i64()?;
    Ok(count as usize)
}

/// Count the number of pages in a PDF file.
///
/// Fails on missing files, unparseable documents, and documents with no pages.
pub fn count_pages(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    let page_count = count_from_page_tree(&doc)?;

    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(page_count)
}

/// Count pages, treating any failure as zero.
///
/// Used for paper content files: an unreadable paper still gets its title
/// page and index line, it just contributes no content pages.
pub fn count_pages_or_zero(path: &Path) -> usize {
    match count_pages(path) {
        Ok(count) => count,
        Err(err) => {
            warn!("could not count pages in {}: {err}", path.display());
            0
        }
    }
}
