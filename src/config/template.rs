//! `[template]` section configuration.
//!
//! Literal strings inside the post template that get replaced on render.

use super::defaults;
use educe::Educe;
use serde::Deserialize;

/// `[template]` section in tufte.toml - template placeholders.
///
/// # Example
/// ```toml
/// [template]
/// page_title = "Post Title - Tufte-Style Blog"
/// post_title = "Your Post Title Here"
/// article_date = "{{ARTICLE_DATE}}"
/// math_scripts = "{{MATH_SCRIPTS}}"
/// convert_meta = "Date · Reading time"
/// ```
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    /// Replaced with `"{title} - {base.title_suffix}"`.
    #[serde(default = "defaults::template::page_title")]
    #[educe(Default = defaults::template::page_title())]
    pub page_title: String,

    /// Replaced with the post title.
    #[serde(default = "defaults::template::post_title")]
    #[educe(Default = defaults::template::post_title())]
    pub post_title: String,

    /// Replaced with `"{date} · {n} min read"`.
    #[serde(default = "defaults::template::article_date")]
    #[educe(Default = defaults::template::article_date())]
    pub article_date: String,

    /// Replaced with the KaTeX snippet when the post has math, else removed.
    #[serde(default = "defaults::template::math_scripts")]
    #[educe(Default = defaults::template::math_scripts())]
    pub math_scripts: String,

    /// Date line placeholder used by `convert`.
    #[serde(default = "defaults::template::convert_meta")]
    #[educe(Default = defaults::template::convert_meta())]
    pub convert_meta: String,
}
