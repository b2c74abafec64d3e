//! Exported HTML document to post conversion.
//!
//! Word processors export documents as HTML full of inline styles and
//! wrapper elements. Conversion keeps only the text: tags become line breaks,
//! blank-line separated runs become paragraphs, and the result is placed into
//! the post template.

use crate::{
    compiler::{
        meta::{UNTITLED_POST, reading_time},
        template::Template,
    },
    config::SiteConfig,
    log,
    utils::{date::today_long, html},
};
use anyhow::{Context, Result};
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// Reading speed used for converted documents.
pub const WORDS_PER_MINUTE: usize = 200;

/// Only this many leading lines are searched for a title.
const TITLE_SCAN_LINES: usize = 3;

/// A line must be longer than this (in characters) to become the title.
const MIN_TITLE_LEN: usize = 10;

const HTML_EXT: &str = "html";

static RE_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<script[^>]*>.*?</script>").unwrap());

static RE_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<style[^>]*>.*?</style>").unwrap());

/// Three or more line breaks, possibly with whitespace between them.
static RE_EXTRA_BLANKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n+").unwrap());

static RE_PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// List and heading markers at the start of a title line.
static RE_TITLE_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[#*•\-]+\s*").unwrap());

/// A converted document, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub title: String,
    /// Paragraph HTML placed into the content section
    pub body: String,
    pub meta_line: String,
}

/// Convert the file or every `*.html` file of the directory at `input`.
///
/// `output` is honored only for a single file. Per-file failures inside a
/// directory are logged and the remaining files are still converted.
pub fn convert(config: &SiteConfig, input: &Path, output: Option<&Path>) -> Result<()> {
    if input.is_file() {
        if let Err(err) = convert_file(config, input, output) {
            log!("error"; "failed to convert {}: {err:#}", input.display());
        }
        return Ok(());
    }

    if !input.is_dir() {
        log!("error"; "path not found: {}", input.display());
        return Ok(());
    }

    let files = collect_html_files(input);
    if files.is_empty() {
        log!("convert"; "no HTML files found in {}", input.display());
        return Ok(());
    }

    log!("convert"; "converting {} files...", files.len());
    for file in &files {
        if let Err(err) = convert_file(config, file, None) {
            log!("error"; "failed to convert {}: {err:#}", file.display());
        }
    }
    Ok(())
}

/// Convert one exported document and write the post. Returns the output path.
pub fn convert_file(config: &SiteConfig, input: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let template = Template::load(&config.build.template)?;

    let converted = convert_html(&source);
    let page = template.render_converted(config, &converted.title, &converted.meta_line, &converted.body);

    let output = output.map_or_else(|| default_output(config, input), Path::to_path_buf);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output, page).with_context(|| format!("failed to write {}", output.display()))?;

    log!("convert"; "{} -> {}", input.display(), output.display());
    log!("convert"; "title: {}", converted.title);
    Ok(output)
}

/// Extract title, paragraphs and the date line from exported HTML.
pub fn convert_html(source: &str) -> Converted {
    let text = extract_text(source);
    let title = extract_title(&text);
    let body = paragraphs(&text);

    let minutes = reading_time(html::word_count(&body), WORDS_PER_MINUTE);
    let meta_line = format!("{} · {minutes} min read", today_long());

    Converted {
        title,
        body,
        meta_line,
    }
}

/// Drop scripts and styles, turn every tag into a line break and collapse
/// long blank runs into a single blank line.
fn extract_text(source: &str) -> String {
    let text = RE_SCRIPT.replace_all(source, "");
    let text = RE_STYLE.replace_all(&text, "");
    let text = html::replace_tags(&text, "\n");
    RE_EXTRA_BLANKS.replace_all(&text, "\n\n").into_owned()
}

fn extract_title(text: &str) -> String {
    text.trim()
        .split('\n')
        .take(TITLE_SCAN_LINES)
        .map(str::trim)
        .find(|line| line.chars().count() > MIN_TITLE_LEN)
        .map_or_else(
            || UNTITLED_POST.to_owned(),
            |line| RE_TITLE_MARKER.replace(line, "").into_owned(),
        )
}

/// `<p>` per blank-line separated run, inner whitespace collapsed.
fn paragraphs(text: &str) -> String {
    RE_PARAGRAPH_BREAK
        .split(text.trim())
        .map(str::trim)
        .filter(|para| !para.is_empty())
        .map(|para| format!("<p>\n{}\n</p>", RE_WHITESPACE.replace_all(para, " ")))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `posts/<stem>-converted.html`
fn default_output(config: &SiteConfig, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    config.build.posts.join(format!("{stem}-converted.html"))
}

fn collect_html_files(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == HTML_EXT))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const EXPORT: &str = r#"<html><head><style>p { color: red; }</style>
<script>var x = "<p>not text</p>";</script></head>
<body><h1>• A Long Document Title</h1>
<p>First   paragraph
spans lines.</p>


<p>Second paragraph.</p></body></html>"#;

    const TEMPLATE: &str = "<title>Post Title - Tufte-Style Blog</title>\
<h1>Your Post Title Here</h1><div>Date · Reading time</div><section class=\"content\"></section>";

    #[test]
    fn test_extract_text_drops_scripts_and_styles() {
        let text = extract_text(EXPORT);
        assert!(!text.contains("color"));
        assert!(!text.contains("not text"));
        assert!(!text.contains('<'));
        assert!(!text.contains("\n\n\n"));
    }

    #[test]
    fn test_extract_title_strips_markers() {
        assert_eq!(extract_title("\n• A Long Document Title\nBody"), "A Long Document Title");
        assert_eq!(extract_title("## Heading That Is Long"), "Heading That Is Long");
    }

    #[test]
    fn test_extract_title_only_first_lines() {
        assert_eq!(extract_title("short\ntiny\nsmall\nThis line is long enough"), UNTITLED_POST);
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(
            paragraphs("First   para\nspans.\n\n \n\nSecond."),
            "<p>\nFirst para spans.\n</p>\n\n<p>\nSecond.\n</p>"
        );
    }

    #[test]
    fn test_convert_html() {
        let converted = convert_html(EXPORT);
        assert_eq!(converted.title, "A Long Document Title");
        assert!(converted.body.contains("<p>\nFirst paragraph spans lines.\n</p>"));
        assert!(converted.body.contains("<p>\nSecond paragraph.\n</p>"));
        assert!(converted.meta_line.ends_with(" · 1 min read"));
        assert!(converted.meta_line.starts_with(&today_long()));
    }

    #[test]
    fn test_reading_time_uses_converter_speed() {
        // 500 tokens: 2.5 rounds to 2 at 200 wpm (3 at 160)
        let words = vec!["word"; 498].join(" ");
        let converted = convert_html(&words);
        // body adds `<p>` and `</p>` tokens
        assert_eq!(html::word_count(&converted.body), 500);
        assert!(converted.meta_line.ends_with(" · 2 min read"));

        let words = vec!["word"; 248].join(" ");
        assert!(convert_html(&words).meta_line.ends_with(" · 1 min read"));
    }

    fn site() -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        fs::write(dir.path().join("posts/post-template.html"), TEMPLATE).unwrap();
        let mut config = SiteConfig::default();
        config.update_path_with_root(dir.path());
        (dir, config)
    }

    #[test]
    fn test_convert_file_default_output() {
        let (dir, config) = site();
        let input = dir.path().join("export.html");
        fs::write(&input, EXPORT).unwrap();

        let output = convert_file(&config, &input, None).unwrap();
        assert_eq!(output, config.build.posts.join("export-converted.html"));

        let page = fs::read_to_string(output).unwrap();
        assert!(page.contains("<title>A Long Document Title - Tufte-Style Blog</title>"));
        assert!(page.contains("min read</div>"));
        assert!(!page.contains("Date · Reading time"));
    }

    #[test]
    fn test_convert_file_explicit_output() {
        let (dir, config) = site();
        let input = dir.path().join("export.html");
        let output = dir.path().join("out/custom.html");
        fs::write(&input, EXPORT).unwrap();

        assert_eq!(convert_file(&config, &input, Some(&output)).unwrap(), output);
        assert!(output.exists());
    }

    #[test]
    fn test_convert_directory() {
        let (dir, config) = site();
        let exports = dir.path().join("exports");
        fs::create_dir_all(&exports).unwrap();
        fs::write(exports.join("one.html"), EXPORT).unwrap();
        fs::write(exports.join("two.html"), EXPORT).unwrap();
        fs::write(exports.join("notes.txt"), "skip").unwrap();

        convert(&config, &exports, None).unwrap();
        assert!(config.build.posts.join("one-converted.html").exists());
        assert!(config.build.posts.join("two-converted.html").exists());
        assert!(!config.build.posts.join("notes-converted.html").exists());
    }

    #[test]
    fn test_convert_missing_template() {
        let (dir, config) = site();
        fs::remove_file(&config.build.template).unwrap();
        let input = dir.path().join("export.html");
        fs::write(&input, EXPORT).unwrap();
        assert!(convert_file(&config, &input, None).is_err());
    }
}
