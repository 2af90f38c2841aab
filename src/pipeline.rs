//! The stitching pipeline
//!
//! Orchestrates the whole run: load the manifest, render a title page per
//! paper, resolve index page numbers to a fixed point, assemble everything
//! into one document, and optionally hyperlink the index. All intermediate
//! pages live in owned temporary files that are removed on every exit path,
//! and the output is finalized atomically.

use std::path::PathBuf;

use log::info;
use tempfile::NamedTempFile;

use crate::catalog::{self, PaperEntry};
use crate::error::Result;
use crate::layout::{IndexLayout, TitleLayout};
use crate::pdf::{index, links, merge, metadata, title};
use crate::resolve::{resolve_index, PaperSpan};

/// Configuration for one stitching run
#[derive(Debug, Clone)]
pub struct StitchOptions {
    /// Path to the manifest CSV
    pub manifest: PathBuf,
    /// Path the combined document is written to
    pub output: PathBuf,
    /// Add clickable links to the index entries
    pub hyperlinks: bool,
    pub title_layout: TitleLayout,
    pub index_layout: IndexLayout,
}

impl StitchOptions {
    pub fn new(manifest: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
            output: output.into(),
            hyperlinks: false,
            title_layout: TitleLayout::default(),
            index_layout: IndexLayout::default(),
        }
    }
}

/// What a completed run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StitchSummary {
    pub papers: usize,
    pub index_pages: usize,
    /// Index pages plus every title and content page
    pub total_pages: usize,
    /// False when hyperlinks were requested but annotation degraded to a
    /// plain copy
    pub hyperlinked: bool,
}

/// A paper with its rendered title page and probed page counts.
///
/// Holds the title page's [`NamedTempFile`], so dropping the value (on any
/// path out of [`stitch`]) removes the temporary render.
struct RenderedPaper {
    entry: PaperEntry,
    title_page: NamedTempFile,
    title_pages: usize,
    content_pages: usize,
}

/// Run the full pipeline.
pub fn stitch(options: &StitchOptions) -> Result<StitchSummary> {
    let papers = catalog::load_catalog(&options.manifest)?;
    info!(
        "loaded {} papers from {}",
        papers.len(),
        options.manifest.display()
    );

    let mut rendered = Vec::with_capacity(papers.len());
    for paper in papers {
        let title_page = title::render_title_page(&paper.title, &options.title_layout)?;
        let title_pages = metadata::count_pages(title_page.path())?;
        let content_pages = metadata::count_pages_or_zero(&paper.source_path);
        rendered.push(RenderedPaper {
            entry: paper,
            title_page,
            title_pages,
            content_pages,
        });
    }

    let spans: Vec<PaperSpan> = rendered
        .iter()
        .map(|paper| PaperSpan {
            title: paper.entry.title.clone(),
            title_pages: paper.title_pages,
            content_pages: paper.content_pages,
        })
        .collect();

    let seed = index::estimate_index_pages(spans.len());
    let index_layout = &options.index_layout;
    let resolved = resolve_index(&spans, seed, |entries| {
        let file = index::render_index(entries, index_layout)?;
        let pages = metadata::count_pages(file.path())?;
        Ok((file, pages))
    })?;
    info!(
        "index resolved to {} pages in {} round(s)",
        resolved.index_pages, resolved.rounds
    );

    // Index first, then each paper's title page followed by its content.
    // Papers whose content could not be read contribute the title page only.
    let mut inputs: Vec<PathBuf> = vec![resolved.artifact.path().to_path_buf()];
    for paper in &rendered {
        inputs.push(paper.title_page.path().to_path_buf());
        if paper.content_pages > 0 {
            inputs.push(paper.entry.source_path.clone());
        }
    }

    let hyperlinked = if options.hyperlinks {
        let assembled = tempfile::Builder::new()
            .prefix("paper-stitch-assembled-")
            .suffix(".pdf")
            .tempfile()?;
        merge::merge_documents(&inputs, assembled.path())?;
        links::annotate_index(
            assembled.path(),
            &options.output,
            &resolved.entries,
            index_layout,
        )?
    } else {
        merge::merge_documents(&inputs, &options.output)?;
        false
    };

    let total_pages = resolved.index_pages
        + spans
            .iter()
            .map(|span| span.title_pages + span.content_pages)
            .sum::<usize>();
    info!(
        "wrote {} ({} pages)",
        options.output.display(),
        total_pages
    );

    Ok(StitchSummary {
        papers: spans.len(),
        index_pages: resolved.index_pages,
        total_pages,
        hyperlinked,
    })
}
