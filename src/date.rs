//! Manifest date parsing
//!
//! Publication dates in exported manifests come in several shapes: full dates
//! in either field order, year-month, or a bare year. Parsing tries a fixed
//! ordered list of formats; the first match wins. Anything unparseable maps
//! to a sentinel minimum date so it sorts after every real date under the
//! newest-first ordering.

use chrono::NaiveDate;

/// Sentinel for rows whose date field could not be parsed.
pub const SENTINEL_DATE: NaiveDate = NaiveDate::MIN;

/// Parse a manifest date string into a sort key.
///
/// Supported formats, tried in order:
/// - `2024-03-15` (year-month-day)
/// - `15-03-2024` (day-month-year)
/// - `2024-03` (year-month, anchored to the first of the month)
/// - `2024` (year only, anchored to January 1st)
///
/// Returns [`SENTINEL_DATE`] when nothing matches. Never fails.
pub fn parse_sort_date(raw: &str) -> NaiveDate {
    let raw = raw.trim();
    if raw.is_empty() {
        return SENTINEL_DATE;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%d-%m-%Y") {
        return date;
    }

    // Year-month and bare-year forms carry no day component, so anchor them
    // to the start of the period before parsing.
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-1"), "%Y-%m-%d") {
        return date;
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-1-1"), "%Y-%m-%d") {
        return date;
    }

    SENTINEL_DATE
}
