//! Error types for the paper-stitch library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the paper-stitch library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest (CSV) error
    #[error("manifest error: {0}")]
    Manifest(#[from] csv::Error),

    /// Manifest lacks a column the pipeline cannot do without
    #[error("manifest is missing required column: {0}")]
    MissingColumn(&'static str),

    /// File not found
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// Page number outside the document
    #[error("page {page} is out of range (document has {pages} pages)")]
    PageOutOfRange { page: usize, pages: usize },

    /// General error
    #[error("{0}")]
    General(String),
}
