//! Metadata directives: `<!-- title: ... -->` and `<!-- date: ... -->`.
//!
//! Directives are HTML comments on the first lines of a post. They are read
//! from the raw text and removed before rendering, so the first content
//! paragraph is not mistaken for a continuation of the header.

use regex::Regex;
use std::sync::LazyLock;

/// Only this many leading lines are searched for directives.
const DIRECTIVE_SCAN_LINES: usize = 10;

static RE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!--\s*title:\s*(.*?)\s*-->").unwrap());

static RE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!--\s*date:\s*(.*?)\s*-->").unwrap());

/// A whole line holding a title or date directive.
static RE_DIRECTIVE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*<!--\s*(?:title|date)\s*:.*?-->\s*$").unwrap());

/// Title from the first `<!-- title: ... -->` directive, if any.
pub fn extract_title(text: &str) -> Option<String> {
    extract(text, &RE_TITLE)
}

/// Date from the first `<!-- date: ... -->` directive, if any.
pub fn extract_date(text: &str) -> Option<String> {
    extract(text, &RE_DATE)
}

fn extract(text: &str, pattern: &Regex) -> Option<String> {
    text.trim()
        .split('\n')
        .take(DIRECTIVE_SCAN_LINES)
        .find_map(|line| pattern.captures(line.trim()))
        .map(|caps| caps[1].trim().to_owned())
}

/// Drop directive lines from the start of the document.
///
/// Stops at the first line that is not a directive; directives further down
/// are left in place.
pub fn strip_leading(text: &str) -> &str {
    let mut rest = text;
    loop {
        let (line, tail) = match rest.split_once('\n') {
            Some((line, tail)) => (line, Some(tail)),
            None => (rest, None),
        };
        if !RE_DIRECTIVE_LINE.is_match(line) {
            return rest;
        }
        match tail {
            Some(tail) => rest = tail,
            None => return "",
        }
    }
}
