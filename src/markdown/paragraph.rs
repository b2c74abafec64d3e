//! Paragraph grouping.
//!
//! Splits the rewritten text on blank-line runs and decides, block by block,
//! whether to wrap it in `<p>` and which spacing class it gets.
//!
//! # Break levels
//!
//! The run of newlines before a block sets its [`BreakLevel`]:
//!
//! | Blank lines | Level | Paragraph attributes |
//! |-------------|-------|----------------------|
//! | 1 | 0 | none (normal indented paragraph) |
//! | 2 | 1 | `class="after-break"` |
//! | 3 | 2 | `class="no-indent" style="margin-top: 3em"` |
//! | n | n-1 | `class="no-indent" style="margin-top: {1.5 × level}em"` |
//!
//! A paragraph that follows a block containing math is never indented: at
//! level 0 it gets `no-indent`, at level 1 `after-break no-indent`.
//!
//! # Block kinds
//!
//! - Prose (does not start with `<`): wrapped.
//! - Inline HTML (`<strong>`, `<em>`, `<b>`, `<i>`, `<a>`, `<span>`, `<code>`):
//!   wrapped, it is prose that happens to open with a tag.
//! - Anything else starting with `<`: emitted verbatim, clears the math flag.

use super::has_math;
use regex::Regex;
use std::sync::LazyLock;

/// A tag directly followed, on the next line, by more content.
static RE_TAG_THEN_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(<[^>]+>)\s*\n\s*([^\n])").unwrap());

static RE_BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n+").unwrap());

static RE_FIRST_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<(\w+)").unwrap());

/// Tags that open inline content rather than a block.
const INLINE_TAGS: &[&str] = &["strong", "em", "b", "i", "a", "span", "code"];

/// Top margin per break level, in `em`.
const MARGIN_STEP_EM: f64 = 1.5;

// ============================================================================
// Types
// ============================================================================

/// Spacing tier derived from the blank-line run before a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct BreakLevel(u32);

impl BreakLevel {
    /// Level of a separator: its newline count minus two, clamped at zero.
    pub fn from_separator(separator: &str) -> Self {
        let newlines = separator.bytes().filter(|&b| b == b'\n').count();
        Self(u32::try_from(newlines.saturating_sub(2)).unwrap_or(u32::MAX))
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Lexed piece of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Break(BreakLevel),
    Block(&'a str),
}

/// How a trimmed, non-empty block is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Prose,
    InlineHtml,
    BlockHtml,
}

impl BlockKind {
    fn of(block: &str) -> Self {
        if !block.starts_with('<') {
            return Self::Prose;
        }
        let tag = RE_FIRST_TAG
            .captures(block)
            .map(|caps| caps[1].to_ascii_lowercase())
            .unwrap_or_default();
        if INLINE_TAGS.contains(&tag.as_str()) {
            Self::InlineHtml
        } else {
            Self::BlockHtml
        }
    }
}

// ============================================================================
// Grouping
// ============================================================================

/// Group `text` into paragraphs, joined by one blank line.
pub fn group(text: &str) -> String {
    let text = RE_TAG_THEN_LINE.replace_all(text, "${1}\n\n${2}");

    let mut paragraphs = Vec::new();
    let mut level = BreakLevel::default();
    let mut prev_had_math = false;

    for segment in segments(&text) {
        let raw = match segment {
            Segment::Break(next) => {
                level = next;
                continue;
            }
            Segment::Block(raw) => raw,
        };

        let block = raw.trim();
        if !block.is_empty() {
            match BlockKind::of(block) {
                BlockKind::Prose | BlockKind::InlineHtml => {
                    let attrs = paragraph_attrs(level, prev_had_math);
                    paragraphs.push(format!("<p{attrs}>{block}</p>"));
                    prev_had_math = has_math(block);
                }
                BlockKind::BlockHtml => {
                    paragraphs.push(block.to_owned());
                    prev_had_math = false;
                }
            }
        }
        level = BreakLevel::default();
    }

    paragraphs.join("\n\n")
}

/// Split on blank-line runs, keeping the runs as [`Segment::Break`]s.
fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;
    for run in RE_BLANK_RUN.find_iter(text) {
        out.push(Segment::Block(&text[last..run.start()]));
        out.push(Segment::Break(BreakLevel::from_separator(run.as_str())));
        last = run.end();
    }
    out.push(Segment::Block(&text[last..]));
    out
}

/// Attributes of a wrapped paragraph, including the leading space.
fn paragraph_attrs(level: BreakLevel, prev_had_math: bool) -> String {
    match (level.get(), prev_had_math) {
        (0, false) => String::new(),
        (0, true) => r#" class="no-indent""#.to_owned(),
        (1, false) => r#" class="after-break""#.to_owned(),
        (1, true) => r#" class="after-break no-indent""#.to_owned(),
        (n, _) => format!(
            r#" class="no-indent" style="margin-top: {}em""#,
            MARGIN_STEP_EM * f64::from(n)
        ),
    }
}
