//! Source catalog loading
//!
//! Reads the exported manifest CSV and produces the ordered list of papers to
//! stitch. Recognized columns: `Title`, `File Attachments` (semicolon-delimited,
//! first entry used), and `Date` with `Publication Year` as a fallback when the
//! date cell is empty. Rows without a resolvable attachment path are dropped.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::debug;

use crate::date::parse_sort_date;
use crate::error::{Error, Result};

/// Placeholder title for rows with no usable title cell.
pub const UNTITLED: &str = "Untitled";

const TITLE_COLUMN: &str = "Title";
const ATTACHMENTS_COLUMN: &str = "File Attachments";
const DATE_COLUMN: &str = "Date";
const YEAR_COLUMN: &str = "Publication Year";

/// One paper from the manifest, immutable once loaded.
#[derive(Debug, Clone)]
pub struct PaperEntry {
    pub title: String,
    pub source_path: PathBuf,
    pub sort_date: NaiveDate,
}

/// Load the manifest and return the papers sorted newest-first.
///
/// The sort is stable, so rows with equal dates (including all the
/// sentinel-dated ones) keep their manifest order. A manifest without the
/// attachment column is considered malformed and fails the run.
pub fn load_catalog(path: &Path) -> Result<Vec<PaperEntry>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let attachments_idx = position(ATTACHMENTS_COLUMN)
        .ok_or(Error::MissingColumn(ATTACHMENTS_COLUMN))?;
    let title_idx = position(TITLE_COLUMN);
    let date_idx = position(DATE_COLUMN);
    let year_idx = position(YEAR_COLUMN);

    let mut papers = Vec::new();
    for record in reader.records() {
        let record = record?;

        let source = record
            .get(attachments_idx)
            .unwrap_or("")
            .split(';')
            .next()
            .unwrap_or("")
            .trim();
        if source.is_empty() {
            debug!("skipping manifest row with no attachment");
            continue;
        }

        let title = title_idx
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED);

        // An empty Date cell falls back to the publication year column.
        let date_raw = date_idx
            .and_then(|i| record.get(i))
            .filter(|d| !d.trim().is_empty())
            .or_else(|| year_idx.and_then(|i| record.get(i)))
            .unwrap_or("");

        papers.push(PaperEntry {
            title: title.to_string(),
            source_path: PathBuf::from(source),
            sort_date: parse_sort_date(date_raw),
        });
    }

    // Newest first; stable, so ties keep manifest order.
    papers.sort_by(|a, b| b.sort_date.cmp(&a.sort_date));

    Ok(papers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::SENTINEL_DATE;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_manifest(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("failed to create temp manifest");
        file.write_all(contents.as_bytes()).expect("failed to write manifest");
        file
    }

    #[test]
    fn test_load_sorts_newest_first() {
        let manifest = write_manifest(
            "Title,File Attachments,Date,Publication Year\n\
             Old Paper,old.pdf,2019-05-01,\n\
             New Paper,new.pdf,2024-03-15,\n\
             Middle Paper,mid.pdf,2021-11,\n",
        );

        let papers = load_catalog(manifest.path()).unwrap();
        let titles: Vec<&str> = papers.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["New Paper", "Middle Paper", "Old Paper"]);
    }

    #[test]
    fn test_unparseable_dates_sort_last_in_manifest_order() {
        let manifest = write_manifest(
            "Title,File Attachments,Date,Publication Year\n\
             First Garbage,a.pdf,???,\n\
             Real,b.pdf,2020,\n\
             Second Garbage,c.pdf,also bad,\n",
        );

        let papers = load_catalog(manifest.path()).unwrap();
        let titles: Vec<&str> = papers.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Real", "First Garbage", "Second Garbage"]);
        assert_eq!(papers[1].sort_date, SENTINEL_DATE);
        assert_eq!(papers[2].sort_date, SENTINEL_DATE);
    }

    #[test]
    fn test_rows_without_attachment_dropped() {
        let manifest = write_manifest(
            "Title,File Attachments,Date,Publication Year\n\
             Has File,paper.pdf,2020-01-01,\n\
             No File,,2024-01-01,\n",
        );

        let papers = load_catalog(manifest.path()).unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].title, "Has File");
    }

    #[test]
    fn test_first_attachment_of_semicolon_list_used() {
        let manifest = write_manifest(
            "Title,File Attachments,Date,Publication Year\n\
             Multi,first.pdf;second.pdf;third.pdf,2020,\n",
        );

        let papers = load_catalog(manifest.path()).unwrap();
        assert_eq!(papers[0].source_path, PathBuf::from("first.pdf"));
    }

    #[test]
    fn test_empty_title_defaults_to_untitled() {
        let manifest = write_manifest(
            "Title,File Attachments,Date,Publication Year\n\
             ,anon.pdf,2020,\n",
        );

        let papers = load_catalog(manifest.path()).unwrap();
        assert_eq!(papers[0].title, UNTITLED);
    }

    #[test]
    fn test_empty_date_falls_back_to_publication_year() {
        let manifest = write_manifest(
            "Title,File Attachments,Date,Publication Year\n\
             Yearly,y.pdf,,2018\n",
        );

        let papers = load_catalog(manifest.path()).unwrap();
        assert_eq!(papers[0].sort_date, parse_sort_date("2018"));
    }

    #[test]
    fn test_quoted_titles_with_commas() {
        let manifest = write_manifest(
            "Title,File Attachments,Date,Publication Year\n\
             \"Attention, Please: A Survey\",att.pdf,2023-06,\n",
        );

        let papers = load_catalog(manifest.path()).unwrap();
        assert_eq!(papers[0].title, "Attention, Please: A Survey");
    }

    #[test]
    fn test_missing_attachment_column_is_fatal() {
        let manifest = write_manifest("Title,Date\nSome Paper,2020-01-01\n");

        let result = load_catalog(manifest.path());
        assert!(matches!(result, Err(Error::MissingColumn(ATTACHMENTS_COLUMN))));
    }

    #[test]
    fn test_missing_manifest_is_fatal() {
        let result = load_catalog(Path::new("no-such-manifest.csv"));
        assert!(result.is_err());
    }
}
