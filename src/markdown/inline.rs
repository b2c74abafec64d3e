//! Inline markup engine.
//!
//! Rules are applied in a fixed order over the whole text, each one seeing
//! the output of the previous:
//!
//! | # | Syntax | Output |
//! |---|--------|--------|
//! | 1 | `[[visible\|content]]` | popup span (see below) |
//! | 2 | `***x***`, `**x**`, `*x*` | `<strong><em>`, `<strong>`, `<em>` |
//! | 3 | `![alt](url)` | `<img class="content-image">` |
//! | 4 | `[text](url)` | `<a href>` |
//! | 5 | ```` ```code``` ```` | `<pre><code>` |
//! | 6 | `` `code` `` | `<code>` |
//! | 7 | `> quote` line | `<blockquote><p>` |
//!
//! Emphasis and fenced code are non-greedy and may span lines. Images must
//! come before links, otherwise `![alt](url)` is captured as a link with a
//! stray `!`.
//!
//! Popups are rendered first and parked behind placeholder tokens until every
//! other rule has run. Their content gets its own emphasis pass on escaped
//! text followed by rules 3 to 6. Their visible part is never touched by the
//! later rules.
//!
//! Blockquotes are line-level: consecutive `> ` lines become consecutive
//! `<blockquote>` elements, not one merged quote.

use crate::utils::html::escape_text;
use regex::{Captures, Regex};
use std::{borrow::Cow, sync::LazyLock};

// ============================================================================
// Rules
// ============================================================================

/// A single inline rewrite: every match of `pattern` becomes `template`.
struct Rule {
    pattern: Regex,
    template: &'static str,
}

impl Rule {
    fn new(pattern: &str, template: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            template,
        }
    }

    fn apply(&self, text: String) -> String {
        let replaced = match self.pattern.replace_all(&text, self.template) {
            Cow::Owned(replaced) => Some(replaced),
            Cow::Borrowed(_) => None,
        };
        replaced.unwrap_or(text)
    }
}

/// Emphasis, strongest first. Runs only on document text outside popups.
static EMPHASIS_RULES: LazyLock<[Rule; 3]> = LazyLock::new(|| {
    [
        Rule::new(r"(?s)\*\*\*(.*?)\*\*\*", "<strong><em>${1}</em></strong>"),
        Rule::new(r"(?s)\*\*(.*?)\*\*", "<strong>${1}</strong>"),
        Rule::new(r"(?s)\*(.*?)\*", "<em>${1}</em>"),
    ]
});

/// Images, links and code. Runs on document text and on popup content.
static MARKUP_RULES: LazyLock<[Rule; 4]> = LazyLock::new(|| {
    [
        Rule::new(
            r"!\[([^\]]*)\]\(([^)]+)\)",
            r#"<img src="${2}" alt="${1}" class="content-image">"#,
        ),
        Rule::new(r"\[([^\]]+)\]\(([^)]+)\)", r#"<a href="${2}">${1}</a>"#),
        Rule::new(r"(?s)```(.*?)```", "<pre><code>${1}</code></pre>"),
        Rule::new(r"`([^`]+)`", "<code>${1}</code>"),
    ]
});

static BLOCKQUOTE_RULE: LazyLock<Rule> =
    LazyLock::new(|| Rule::new(r"(?m)^> (.*)$", "<blockquote><p>${1}</p></blockquote>"));

fn apply_all(rules: &[Rule], text: String) -> String {
    rules.iter().fold(text, |text, rule| rule.apply(text))
}

// ============================================================================
// Popups
// ============================================================================

static RE_POPUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]|]+)\|([\s\S]*?)\]\]").unwrap());

/// Popup content emphasis is line-bound, unlike the document-level rules.
static RE_POPUP_STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static RE_POPUP_EM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());

/// Private-use code points bracketing a parked popup index.
const PARK_OPEN: char = '\u{E000}';
const PARK_CLOSE: char = '\u{E001}';

static RE_PARKED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{E000}([0-9]+)\u{E001}").unwrap());

/// Render a popup span. `content` is escaped, then emphasised, then its line
/// breaks become `<br>`, then images, links and code are applied.
fn render_popup(visible: &str, content: &str) -> String {
    let content = escape_text(content);
    let content = RE_POPUP_STRONG.replace_all(&content, "<strong>${1}</strong>");
    let content = RE_POPUP_EM.replace_all(&content, "<em>${1}</em>");
    let content = apply_all(MARKUP_RULES.as_slice(), content.replace('\n', "<br>"));
    format!(r#"<span class="popup">{visible}<span class="popup-body">{content}</span></span>"#)
}

/// Replace every popup with a placeholder, returning the rendered popups.
fn park_popups(text: &str) -> (String, Vec<String>) {
    let mut parked = Vec::new();
    let text = RE_POPUP
        .replace_all(text, |caps: &Captures| {
            parked.push(render_popup(&caps[1], &caps[2]));
            format!("{PARK_OPEN}{}{PARK_CLOSE}", parked.len() - 1)
        })
        .into_owned();
    (text, parked)
}

fn unpark_popups(text: &str, parked: &[String]) -> String {
    if parked.is_empty() {
        return text.to_owned();
    }
    RE_PARKED
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|idx| parked.get(idx))
                .cloned()
                .unwrap_or_else(|| caps[0].to_owned())
        })
        .into_owned()
}

// ============================================================================
// Public API
// ============================================================================

/// Apply every inline rule to `text`.
pub fn render(text: &str) -> String {
    let (text, parked) = park_popups(text);
    let text = apply_all(EMPHASIS_RULES.as_slice(), text);
    let text = apply_all(MARKUP_RULES.as_slice(), text);
    let text = BLOCKQUOTE_RULE.apply(text);
    unpark_popups(&text, &parked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasis_levels() {
        assert_eq!(
            render("***both*** **bold** *italic*"),
            "<strong><em>both</em></strong> <strong>bold</strong> <em>italic</em>"
        );
    }

    #[test]
    fn test_emphasis_spans_lines() {
        assert_eq!(render("*one\ntwo*"), "<em>one\ntwo</em>");
    }

    #[test]
    fn test_image_and_link() {
        assert_eq!(
            render("![alt text](images/a.png) and [docs](https://example.com)"),
            r#"<img src="images/a.png" alt="alt text" class="content-image"> and <a href="https://example.com">docs</a>"#
        );
    }

    #[test]
    fn test_image_with_empty_alt() {
        assert_eq!(
            render("![](b.png)"),
            r#"<img src="b.png" alt="" class="content-image">"#
        );
    }

    #[test]
    fn test_fenced_and_inline_code() {
        assert_eq!(
            render("```\nlet x = 1;\n```\nuse `x`"),
            "<pre><code>\nlet x = 1;\n</code></pre>\nuse <code>x</code>"
        );
    }

    #[test]
    fn test_blockquote_is_per_line() {
        assert_eq!(
            render("> one\n> two\n>not a quote"),
            "<blockquote><p>one</p></blockquote>\n<blockquote><p>two</p></blockquote>\n>not a quote"
        );
    }

    #[test]
    fn test_popup_content_is_escaped_and_emphasised() {
        assert_eq!(
            render("[[tip|a < b & **c**\n*d*]]"),
            r#"<span class="popup">tip<span class="popup-body">a &lt; b &amp; <strong>c</strong><br><em>d</em></span></span>"#
        );
    }

    #[test]
    fn test_popup_content_renders_links_and_code() {
        assert_eq!(
            render("[[note|see [docs](https://x.org) and `code`]]"),
            r#"<span class="popup">note<span class="popup-body">see <a href="https://x.org">docs</a> and <code>code</code></span></span>"#
        );
        assert_eq!(
            render("[[fig|![chart](images/c.png) `a < b`]]"),
            r#"<span class="popup">fig<span class="popup-body"><img src="images/c.png" alt="chart" class="content-image"> <code>a &lt; b</code></span></span>"#
        );
    }

    #[test]
    fn test_popup_visible_part_is_literal() {
        let html = render("[[See *this*|body **bold** text]] and *outside*");
        assert_eq!(
            html,
            r#"<span class="popup">See *this*<span class="popup-body">body <strong>bold</strong> text</span></span> and <em>outside</em>"#
        );
    }

    #[test]
    fn test_popup_inside_emphasis() {
        assert_eq!(
            render("*x [[a|b]] y*"),
            r#"<em>x <span class="popup">a<span class="popup-body">b</span></span> y</em>"#
        );
    }

    #[test]
    fn test_unclosed_markers_stay_literal() {
        assert_eq!(render("a * b and [x] (y)"), "a * b and [x] (y)");
    }

    #[test]
    fn test_unpark_without_popups_is_identity() {
        assert_eq!(unpark_popups("plain", &[]), "plain");
    }
}
