//! Post template loading and substitution.
//!
//! The template is a complete HTML page holding literal placeholder strings
//! (see `[template]` in `tufte.toml`) and one `<section class="content">`
//! element whose body is replaced by the rendered post.

use super::{error::BuildError, meta::PostMetadata};
use crate::config::SiteConfig;
use anyhow::{Context, Result, bail};
use regex::{NoExpand, Regex};
use std::{fs, path::Path, sync::LazyLock};

/// First content section, non-greedy so later sections are untouched.
static RE_CONTENT_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<section class="content">.*?</section>"#).unwrap());

/// KaTeX stylesheet and auto-render scripts, injected only into posts with math.
pub const KATEX_SNIPPET: &str = r#"  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.css">
  <script defer src="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.js"></script>
  <script defer src="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/contrib/auto-render.min.js" crossorigin="anonymous"
    onload="renderMathInElement(document.body, {delimiters: [{left: '$$', right: '$$', display: true}, {left: '\\[', right: '\\]', display: true}, {left: '\\(', right: '\\)', display: false}]});"></script>"#;

/// A loaded post template.
#[derive(Debug, Clone)]
pub struct Template {
    html: String,
}

impl Template {
    /// Read the template from disk.
    ///
    /// A missing file is reported as [`BuildError::MissingTemplate`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            bail!(BuildError::MissingTemplate(path.to_path_buf()));
        }
        let html = fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display()))?;
        Ok(Self::from_string(html))
    }

    pub fn from_string(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Fill the template for a built post.
    pub fn render_post(
        &self,
        config: &SiteConfig,
        meta: &PostMetadata,
        fragment: &str,
        has_math: bool,
    ) -> String {
        let placeholders = &config.template;
        let math = if has_math { KATEX_SNIPPET } else { "" };

        let page = self.fill_titles(config, &meta.title);
        let page = page.replace(&placeholders.article_date, &meta.meta_line());
        let page = page.replace(&placeholders.math_scripts, math);
        replace_content(&page, fragment)
    }

    /// Fill the template for a converted document.
    ///
    /// Uses the `convert_meta` placeholder for the date line and never
    /// injects math scripts.
    pub fn render_converted(
        &self,
        config: &SiteConfig,
        title: &str,
        meta_line: &str,
        fragment: &str,
    ) -> String {
        let page = self.fill_titles(config, title);
        let page = page.replace(&config.template.convert_meta, meta_line);
        replace_content(&page, fragment)
    }

    fn fill_titles(&self, config: &SiteConfig, title: &str) -> String {
        let placeholders = &config.template;
        let page_title = format!("{title} - {}", config.base.title_suffix);
        self.html
            .replace(&placeholders.page_title, &page_title)
            .replace(&placeholders.post_title, title)
    }
}

/// Replace the first content section with `fragment`, inserted literally.
fn replace_content(page: &str, fragment: &str) -> String {
    let section = format!("<section class=\"content\">\n{fragment}\n</section>");
    RE_CONTENT_SECTION
        .replacen(page, 1, NoExpand(&section))
        .into_owned()
}
