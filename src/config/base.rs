//! `[base]` section configuration.
//!
//! Site identity: index page title, heading and intro, plus the suffix used
//! in every post's `<title>`.

use super::defaults;
use educe::Educe;
use serde::Deserialize;

/// `[base]` section in tufte.toml - site identity.
///
/// # Example
/// ```toml
/// [base]
/// title = "codexerrata"
/// heading = "Codex <span class=\"errata\">Errata</span>"
/// intro = ["This is my blog.", "Nothing here is final."]
/// title_suffix = "Tufte-Style Blog"
/// ```
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// `<title>` of the index page.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Inner HTML of the index page `<h1>`.
    #[serde(default = "defaults::base::heading")]
    #[educe(Default = defaults::base::heading())]
    pub heading: String,

    /// Intro paragraphs on the index page, raw HTML allowed.
    #[serde(default)]
    pub intro: Vec<String>,

    /// Stylesheet linked from the index page.
    #[serde(default = "defaults::base::stylesheet")]
    #[educe(Default = defaults::base::stylesheet())]
    pub stylesheet: String,

    /// Appended to post titles in `<title>`: `"{title} - {suffix}"`.
    #[serde(default = "defaults::base::title_suffix")]
    #[educe(Default = defaults::base::title_suffix())]
    pub title_suffix: String,

    /// `lang` attribute of the index page.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,
}
