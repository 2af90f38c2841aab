//! Document assembly using lopdf
//!
//! Concatenates the rendered index and the per-paper (title page, content)
//! sequences into one document. Object IDs from each source document are
//! renumbered into a shared space, pages are re-parented under a fresh page
//! tree, and the result is written through a sibling temporary file that is
//! renamed into place, so an interrupted run never leaves a half-written file
//! at the output path.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lopdf::{dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};

/// Merge the given PDFs, in order, into a single document at `output`.
pub fn merge_documents(inputs: &[PathBuf], output: &Path) -> Result<()> {
    if inputs.is_empty() {
        return Err(Error::General("no input files to merge".to_string()));
    }

    let mut documents = Vec::with_capacity(inputs.len());
    for path in inputs {
        if !path.exists() {
            return Err(Error::FileNotFound(path.clone()));
        }
        let doc = Document::load(path)?;
        if doc.get_pages().is_empty() {
            return Err(Error::EmptyPdf(path.clone()));
        }
        documents.push(doc);
    }

    // Renumber every document into one shared ID space and pool the objects.
    let mut max_id = 1;
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for mut doc in documents {
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        page_ids.extend(doc.get_pages().into_values());
        objects.extend(doc.objects);
    }

    let mut merged = Document::with_version("1.5");
    merged.objects.extend(objects);
    // max_id must reflect the pooled objects before new_object_id is called,
    // or the fresh page tree would collide with them.
    merged.max_id = max_id - 1;

    let pages_id = merged.new_object_id();
    let kids: Vec<Object> = page_ids.iter().map(|&id| id.into()).collect();
    let count = page_ids.len() as i64;
    merged.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => count,
            "Kids" => kids,
        }),
    );

    let catalog_id = merged.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    merged.trailer.set("Root", catalog_id);

    // Re-parent every page under the new tree.
    for &page_id in &page_ids {
        if let Ok(Object::Dictionary(page_dict)) = merged.get_object_mut(page_id) {
            page_dict.set("Parent", pages_id);
        }
    }

    merged.compress();
    save_atomic(&mut merged, output)
}

/// Write `doc` to `output` via a temporary file in the same directory,
/// renamed into place on success.
pub(crate) fn save_atomic(doc: &mut Document, output: &Path) -> Result<()> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = tempfile::Builder::new()
        .prefix(".paper-stitch-")
        .suffix(".pdf")
        .tempfile_in(dir)?;

    doc.save(temp.path())?;
    temp.persist(output).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
