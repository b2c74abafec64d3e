//! Post date parsing for index ordering.
//!
//! Dates in `<!-- date: ... -->` directives are free-form text shown as-is on
//! the page. For sorting they are parsed against a fixed set of formats:
//!
//! | Format | Example |
//! |--------|---------|
//! | `DD/MM-YYYY` | `17/12-2025` |
//! | `Month DD, YYYY` | `January 15, 2026`, `Jan 15, 2026` |
//! | `YYYY-MM-DD` | `2026-01-15` |
//! | `DD.MM.YYYY` | `15.01.2026` |
//!
//! Anything else falls back to the source file's modification time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::{sync::LazyLock, time::SystemTime};

/// `DD/MM-YYYY`, one or two digit day and month.
static RE_SLASH_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})-(\d{4})$").unwrap());

/// chrono formats tried after `DD/MM-YYYY`, in order.
const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d", "%d.%m.%Y"];

/// Sort position of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDate {
    pub at: NaiveDateTime,
    /// The date string was absent or unparseable.
    pub fallback: bool,
}

/// Parse a post date string in one of the accepted formats.
pub fn parse_post_date(date: &str) -> Option<NaiveDateTime> {
    let date = date.trim();

    if let Some(caps) = RE_SLASH_DASH.captures(date) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        if let Some(parsed) = NaiveDate::from_ymd_opt(year, month, day) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Resolve the sort position of a post.
///
/// Uses the parsed date when possible, then the file modification time (local
/// time), then the earliest representable time.
pub fn resolve_sort_date(date: Option<&str>, mtime: Option<SystemTime>) -> SortDate {
    if let Some(at) = date.filter(|d| !d.is_empty()).and_then(parse_post_date) {
        return SortDate {
            at,
            fallback: false,
        };
    }

    let at = mtime
        .map(|t| DateTime::<Local>::from(t).naive_local())
        .unwrap_or(NaiveDateTime::MIN);
    SortDate { at, fallback: true }
}

/// Today as `DD/MM-YYYY`, the default date of built posts.
pub fn today_short() -> String {
    Local::now().format("%d/%m-%Y").to_string()
}

/// Today as `Month DD, YYYY`, the date of converted documents.
pub fn today_long() -> String {
    Local::now().format("%B %d, %Y").to_string()
}
