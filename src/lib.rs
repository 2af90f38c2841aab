//! Paper Stitch Library
//!
//! Assembles a single combined PDF from a manifest of academic papers. Each
//! paper is prefixed with a generated title page, and the document opens with
//! a generated table-of-contents index whose entries carry the papers'
//! starting page numbers — resolved to a fixed point, since the index's own
//! page count shifts the offsets it displays. This library provides
//! functionality to:
//! - Load and sort a CSV manifest of papers
//! - Render title and index pages from scratch
//! - Resolve index page numbers against the index's own size
//! - Merge page sequences into one atomically-written document
//! - Hyperlink index entries to their papers (best-effort)
//! - Stamp page numbers onto an existing PDF
//!
//! # Example
//!
//! ```no_run
//! use paper_stitch::pipeline::{stitch, StitchOptions};
//!
//! let mut options = StitchOptions::new("Exported Items.csv", "combined_papers.pdf");
//! options.hyperlinks = true;
//!
//! let summary = stitch(&options).expect("failed to stitch papers");
//! println!("{} pages written", summary.total_pages);
//! ```

pub mod catalog;
pub mod date;
pub mod error;
pub mod layout;
pub mod pdf;
pub mod pipeline;
pub mod resolve;

// Re-export commonly used items
pub use error::{Error, Result};
