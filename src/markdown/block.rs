//! Block markup engine: headings and list runs.
//!
//! Runs over the whole document after the inline engine, because list runs
//! are detected from line adjacency.
//!
//! # Known limitations
//!
//! - A line opening with `*` is only a list item when it does not also hold
//!   `*text*`-style emphasis. The check is narrow: any later `*` pair whose
//!   first star is followed by a non-space makes the line plain text.
//! - `* item` bullets on consecutive lines usually never reach this pass:
//!   the inline emphasis rule pairs their stars first. `-` and `+` bullets
//!   are unaffected.
//! - Lists are flat; indentation is ignored.

use regex::Regex;
use std::sync::LazyLock;

/// Heading patterns, longest prefix first so `###` is not read as `#`.
static HEADINGS: LazyLock<[(Regex, &'static str); 3]> = LazyLock::new(|| {
    [
        (Regex::new(r"(?m)^###\s*(.*)$").unwrap(), "<h3>${1}</h3>"),
        (Regex::new(r"(?m)^##\s*(.*)$").unwrap(), "<h2>${1}</h2>"),
        (Regex::new(r"(?m)^#\s*(.*)$").unwrap(), "<h1>${1}</h1>"),
    ]
});

static RE_LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*+]\s").unwrap());
static RE_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+").unwrap());
static RE_STAR_LEAD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\*").unwrap());
static RE_STAR_EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*[^\s*].*\*").unwrap());

/// Line classification for list-run detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    /// List item, bullet removed.
    Item(&'a str),
    Text(&'a str),
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        if !RE_LIST_ITEM.is_match(line) || looks_like_emphasis(line) {
            return Self::Text(line);
        }
        let bullet_end = RE_BULLET.find(line).map_or(0, |m| m.end());
        Self::Item(&line[bullet_end..])
    }
}

/// `*text*` on a star-led line is emphasis, not a bullet.
fn looks_like_emphasis(line: &str) -> bool {
    RE_STAR_LEAD.is_match(line) && RE_STAR_EMPHASIS.is_match(line)
}

/// Apply heading and list rules to `text`.
pub fn render(text: &str) -> String {
    let text = headings(text);
    lists(&text)
}

fn headings(text: &str) -> String {
    HEADINGS
        .iter()
        .fold(text.to_owned(), |text, (pattern, template)| {
            pattern.replace_all(&text, *template).into_owned()
        })
}

/// Wrap each run of adjacent list items in one `<ul>`.
fn lists(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_list = false;

    for line in text.split('\n').map(Line::classify) {
        match line {
            Line::Item(item) => {
                if !in_list {
                    out.push("<ul>".to_owned());
                    in_list = true;
                }
                out.push(format!("<li>{item}</li>"));
            }
            Line::Text(line) => {
                if in_list {
                    out.push("</ul>".to_owned());
                    in_list = false;
                }
                out.push(line.to_owned());
            }
        }
    }

    if in_list {
        out.push("</ul>".to_owned());
    }

    out.join("\n")
}
