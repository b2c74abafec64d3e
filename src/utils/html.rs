//! Small HTML text helpers.

use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Escape `&`, `<` and `>`.
///
/// Quotes are left alone: the result is only ever placed in element content.
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub fn escape_text(s: &str) -> Cow<'_, str> {
    if !s.contains(['<', '>', '&']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Replace every tag with `replacement`.
pub fn replace_tags<'a>(s: &'a str, replacement: &str) -> Cow<'a, str> {
    RE_TAG.replace_all(s, regex::NoExpand(replacement))
}

/// Remove every tag.
pub fn strip_tags(s: &str) -> Cow<'_, str> {
    replace_tags(s, "")
}

/// Number of whitespace-separated words.
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}
