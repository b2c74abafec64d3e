//! Post metadata: title, date and reading time.
//!
//! Metadata is derived from the rendered HTML and then overridden by the
//! `<!-- title -->` / `<!-- date -->` directives of the source, when present.

use crate::utils::{date::today_short, html};
use std::time::SystemTime;

/// Title used when nothing better can be found.
pub const UNTITLED_POST: &str = "Untitled Post";

/// Reading speed used for built posts.
pub const WORDS_PER_MINUTE: usize = 160;

/// Only this many leading lines of the rendered HTML are searched for a title.
const TITLE_SCAN_LINES: usize = 10;

/// A text line must be longer than this (in characters) to become the title.
const MIN_TITLE_LINE_LEN: usize = 10;

/// Titles taken from a text line are cut to this many characters.
const MAX_TITLE_LEN: usize = 60;

/// Reading time in whole minutes, never less than one.
///
/// Halves round to the nearest even minute.
#[allow(clippy::cast_precision_loss)] // word counts stay far below 2^52
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn reading_time(words: usize, words_per_minute: usize) -> usize {
    let minutes = (words as f64 / words_per_minute as f64).round_ties_even() as usize;
    minutes.max(1)
}

/// Metadata of a single post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMetadata {
    pub title: String,
    /// Free-form date text, shown as written
    pub date: String,
    pub word_count: usize,
    pub reading_time: usize,
}

impl PostMetadata {
    /// Derive metadata from a rendered HTML fragment.
    ///
    /// The title is the first `<h1>` line, else the first text line longer
    /// than ten characters; the date is today.
    pub fn from_html(html: &str) -> Self {
        let text = html::strip_tags(html);
        let word_count = html::word_count(&text);

        Self {
            title: title_from_html(html).unwrap_or_else(|| UNTITLED_POST.to_owned()),
            date: today_short(),
            word_count,
            reading_time: reading_time(word_count, WORDS_PER_MINUTE),
        }
    }

    /// Apply directive values from the source document.
    ///
    /// An empty or sentinel title and an empty date are ignored.
    #[must_use]
    pub fn with_directives(mut self, title: Option<String>, date: Option<String>) -> Self {
        if let Some(title) = title.filter(|t| !t.is_empty() && t != UNTITLED_POST) {
            self.title = title;
        }
        if let Some(date) = date.filter(|d| !d.is_empty()) {
            self.date = date;
        }
        self
    }

    /// `"DATE · N min read"`
    pub fn meta_line(&self) -> String {
        format!("{} · {} min read", self.date, self.reading_time)
    }
}

fn title_from_html(html: &str) -> Option<String> {
    for line in html.trim().split('\n').take(TITLE_SCAN_LINES) {
        let line = line.trim();
        if line.starts_with("<h1>") {
            return Some(html::strip_tags(line).into_owned());
        }
        if line.chars().count() > MIN_TITLE_LINE_LEN && !line.starts_with('<') {
            let clean = html::strip_tags(line);
            if clean.chars().count() > MIN_TITLE_LINE_LEN {
                return Some(clean.chars().take(MAX_TITLE_LEN).collect());
            }
        }
    }
    None
}

/// One line of the index page.
#[derive(Debug, Clone)]
pub struct PostIndexEntry {
    pub title: String,
    /// Link target, relative to the index page
    pub url: String,
    pub date: String,
    pub reading_time: usize,
    /// Source modification time, the sort key when the date is unparseable
    pub mtime: Option<SystemTime>,
}
