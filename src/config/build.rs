//! `[build]` section configuration.
//!
//! Paths read and written by a build. Relative paths are resolved against
//! the project root after loading.

use super::defaults;
use educe::Educe;
use serde::Deserialize;
use std::path::PathBuf;

/// `[build]` section in tufte.toml - build paths.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"                     # Markdown sources (*.md)
/// posts = "posts"                         # Rendered posts
/// template = "posts/post-template.html"   # Post page template
/// index = "index.html"                    # Post listing
/// images = "images/"                      # Image prefix rewritten to ../images/
/// ```
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Markdown source directory.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Output directory for rendered posts.
    #[serde(default = "defaults::build::posts")]
    #[educe(Default = defaults::build::posts())]
    pub posts: PathBuf,

    /// HTML template every post is rendered into.
    #[serde(default = "defaults::build::template")]
    #[educe(Default = defaults::build::template())]
    pub template: PathBuf,

    /// Index page listing every post.
    #[serde(default = "defaults::build::index")]
    #[educe(Default = defaults::build::index())]
    pub index: PathBuf,

    /// `src` prefix of images that live next to the index page.
    ///
    /// Posts are one directory deeper, so `src="images/..."` is rewritten to
    /// `src="../images/..."` in post HTML.
    #[serde(default = "defaults::build::images")]
    #[educe(Default = defaults::build::images())]
    pub images: String,
}
