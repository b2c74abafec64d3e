//! Index page generation.
//!
//! Writes `index.html` listing every built post, newest first.
//!
//! # Entry Format
//!
//! ```html
//! <div class="post-entry">
//!   <h2><a href="posts/my-post.html">My Post</a></h2>
//!   <div class="article-meta">17/12-2025 · 3 min read</div>
//! </div>
//! ```

use crate::{
    compiler::PostIndexEntry,
    config::SiteConfig,
    log,
    utils::date::{SortDate, resolve_sort_date},
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

// ============================================================================
// Constants
// ============================================================================

/// Web fonts linked from the index head.
const FONT_LINKS: &str = r#"  <link rel="preconnect" href="https://fonts.googleapis.com">
  <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
  <link href="https://fonts.googleapis.com/css2?family=Source+Serif+4:ital,opsz,wght@0,8..60,400;0,8..60,500;1,8..60,400;1,8..60,500&display=swap" rel="stylesheet">"#;

// ============================================================================
// Public API
// ============================================================================

/// Sort the entries newest first and write the index page.
pub fn build_index(config: &SiteConfig, entries: Vec<PostIndexEntry>) -> Result<()> {
    let index = IndexPage::from_entries(entries);
    index.write(config)
}

/// Link to a post file as seen from the index page.
///
/// | index | posts | url |
/// |-------|-------|-----|
/// | `site/index.html` | `site/posts` | `posts/a.html` |
/// | `site/index.html` | `site/` | `a.html` |
pub fn entry_url(config: &SiteConfig, file_name: &str) -> String {
    let index_dir = config.build.index.parent().unwrap_or(Path::new(""));
    let posts = config
        .build
        .posts
        .strip_prefix(index_dir)
        .unwrap_or(&config.build.posts);

    let mut url: String = posts
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if !url.is_empty() {
        url.push('/');
    }
    url.push_str(file_name);
    url
}

// ============================================================================
// Index Implementation
// ============================================================================

/// Index page data, already in display order.
struct IndexPage {
    entries: Vec<PostIndexEntry>,
}

impl IndexPage {
    /// Order entries by post date, newest first.
    ///
    /// Unparseable dates sort by file modification time. The sort is stable,
    /// so ties keep collection order.
    fn from_entries(entries: Vec<PostIndexEntry>) -> Self {
        let mut keyed: Vec<(SortDate, PostIndexEntry)> = entries
            .into_iter()
            .map(|entry| {
                let key = resolve_sort_date(Some(&entry.date), entry.mtime);
                if key.fallback {
                    log!("index"; "unrecognised date `{}` for `{}`, using file time", entry.date, entry.title);
                }
                (key, entry)
            })
            .collect();
        keyed.sort_by(|(a, _), (b, _)| b.at.cmp(&a.at));

        Self {
            entries: keyed.into_iter().map(|(_, entry)| entry).collect(),
        }
    }

    fn post_list(&self) -> String {
        let mut html = String::with_capacity(self.entries.len() * 192);
        for post in &self.entries {
            html.push_str("      <div class=\"post-entry\">\n");
            html.push_str(&format!(
                "        <h2><a href=\"{}\">{}</a></h2>\n",
                post.url, post.title
            ));
            html.push_str(&format!(
                "        <div class=\"article-meta\">{} · {} min read</div>\n",
                post.date, post.reading_time
            ));
            html.push_str("      </div>\n\n");
        }
        html
    }

    fn into_html(self, config: &SiteConfig) -> String {
        let base = &config.base;
        let intro: String = base
            .intro
            .iter()
            .map(|p| format!("      <p>{p}</p>\n\n"))
            .collect();

        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
{FONT_LINKS}
  <link rel="stylesheet" href="{stylesheet}">
</head>
<body>
  <article>
    <section class="content">
      <h1 class="site-title">{heading}</h1>
{intro}      <hr>

{posts}    </section>
  </article>

  <footer>
  </footer>
</body>
</html>"#,
            lang = base.language,
            title = base.title,
            stylesheet = base.stylesheet,
            heading = base.heading,
            posts = self.post_list(),
        )
    }

    fn write(self, config: &SiteConfig) -> Result<()> {
        let path = &config.build.index;
        let count = self.entries.len();
        let html = self.into_html(config);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, html)
            .with_context(|| format!("failed to write index to {}", path.display()))?;

        log!("index"; "{} ({count} posts)", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn entry(title: &str, date: &str, mtime: Option<SystemTime>) -> PostIndexEntry {
        PostIndexEntry {
            title: title.into(),
            url: format!("posts/{}.html", title.to_lowercase()),
            date: date.into(),
            reading_time: 2,
            mtime,
        }
    }

    fn titles(page: &IndexPage) -> Vec<&str> {
        page.entries.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_sort_newest_first_across_formats() {
        let page = IndexPage::from_entries(vec![
            entry("Old", "2024-01-05", None),
            entry("New", "17/12-2025", None),
            entry("Mid", "March 3, 2025", None),
            entry("Dots", "01.06.2025", None),
        ]);
        assert_eq!(titles(&page), ["New", "Dots", "Mid", "Old"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let page = IndexPage::from_entries(vec![
            entry("First", "2025-01-01", None),
            entry("Second", "January 1, 2025", None),
            entry("Third", "01.01.2025", None),
        ]);
        assert_eq!(titles(&page), ["First", "Second", "Third"]);
    }

    #[test]
    fn test_unparseable_date_uses_mtime() {
        let recent = SystemTime::now();
        let ancient = SystemTime::UNIX_EPOCH + Duration::from_secs(86_400);
        let page = IndexPage::from_entries(vec![
            entry("Dated", "2000-01-01", None),
            entry("Recent", "someday", Some(recent)),
            entry("Ancient", "", Some(ancient)),
            entry("Unknown", "soon", None),
        ]);
        assert_eq!(titles(&page), ["Recent", "Dated", "Ancient", "Unknown"]);
    }

    #[test]
    fn test_post_list_markup() {
        let page = IndexPage::from_entries(vec![entry("Hello", "17/12-2025", None)]);
        assert_eq!(
            page.post_list(),
            "      <div class=\"post-entry\">\n\
             \x20       <h2><a href=\"posts/hello.html\">Hello</a></h2>\n\
             \x20       <div class=\"article-meta\">17/12-2025 · 2 min read</div>\n\
             \x20     </div>\n\n"
        );
    }

    #[test]
    fn test_entry_url() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.update_path_with_root(dir.path());
        assert_eq!(entry_url(&config, "a.html"), "posts/a.html");

        config.build.posts = config.build.index.parent().unwrap().to_path_buf();
        assert_eq!(entry_url(&config, "a.html"), "a.html");
    }

    #[test]
    fn test_build_index_writes_page() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.base.intro = vec!["Welcome.".into()];
        config.update_path_with_root(dir.path());

        build_index(&config, vec![entry("Hello", "17/12-2025", None)]).unwrap();

        let html = fs::read_to_string(&config.build.index).unwrap();
        assert!(html.contains("<title>codexerrata</title>"));
        assert!(html.contains(r#"<h1 class="site-title">Codex <span class="errata">Errata</span></h1>"#));
        assert!(html.contains("      <p>Welcome.</p>\n\n      <hr>"));
        assert!(html.contains(r#"<a href="posts/hello.html">Hello</a>"#));
        assert!(html.contains(r#"<link rel="stylesheet" href="css/style.css">"#));
    }
}
