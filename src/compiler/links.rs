//! Cross-post references.
//!
//! A post links to another post by title:
//!
//! ```text
//! [[post:My Other Post]]              -> [My Other Post](my-other-post.html)
//! [[post:My Other Post|read this]]    -> [read this](my-other-post.html)
//! ```
//!
//! References are rewritten into ordinary markdown links before rendering, so
//! the inline engine turns them into anchors like any other link.

use super::{Document, meta::UNTITLED_POST};
use crate::markdown::extract_title;
use crate::utils::slug::{post_file_name, post_slug, title_slug};
use regex::{Captures, Regex};
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

/// `[[post:Title]]` or `[[post:Title|Link text]]`
static RE_POST_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[post:\s*([^\]\|]+)(?:\|([^\]]+))?\]\]").unwrap());

/// Fallback slugs shorter than this resolve to `#`.
const MIN_FALLBACK_SLUG_LEN: usize = 2;

/// Target used when a reference cannot be resolved to anything useful.
const DEAD_LINK: &str = "#";

/// Mapping from post title to post URL (relative to the posts directory).
#[derive(Debug, Default, Clone)]
pub struct TitleMap {
    urls: FxHashMap<String, String>,
}

impl TitleMap {
    /// Build the map from every document of a batch.
    ///
    /// The title is the `title` directive, or the file stem when the directive
    /// is missing or is the untitled sentinel. Later documents with the same
    /// title replace earlier ones.
    pub fn build(docs: &[Document]) -> Self {
        let urls = docs
            .iter()
            .map(|doc| {
                let title = extract_title(&doc.text)
                    .filter(|t| !t.is_empty() && t != UNTITLED_POST)
                    .unwrap_or_else(|| doc.id.clone());
                let url = post_file_name(&post_slug(&title, &doc.id));
                (title.trim().to_owned(), url)
            })
            .collect();
        Self { urls }
    }

    /// URL of the post with exactly this (trimmed) title.
    pub fn get(&self, title: &str) -> Option<&str> {
        self.urls.get(title).map(String::as_str)
    }

    /// Rewrite every `[[post:...]]` reference in `text` into a markdown link.
    ///
    /// Unknown titles link to a slug computed from the title itself, or to `#`
    /// when that slug is too short to be meaningful.
    pub fn resolve(&self, text: &str) -> String {
        RE_POST_REF
            .replace_all(text, |caps: &Captures| {
                let title = caps[1].trim();
                let link_text = caps.get(2).map_or(title, |m| m.as_str().trim());
                let url = self
                    .get(title)
                    .map_or_else(|| fallback_url(title), str::to_owned);
                format!("[{link_text}]({url})")
            })
            .into_owned()
    }
}

fn fallback_url(title: &str) -> String {
    let slug = title_slug(title);
    if slug.chars().count() >= MIN_FALLBACK_SLUG_LEN {
        post_file_name(&slug)
    } else {
        DEAD_LINK.to_owned()
    }
}
