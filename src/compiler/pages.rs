//! Single post build: markdown source to `posts/<slug>.html`.

use super::{
    BuildContext, Document,
    meta::{PostIndexEntry, PostMetadata},
    template::Template,
};
use crate::{
    generator::index::entry_url,
    log,
    markdown::{self, extract_date, extract_title},
    utils::slug::{post_file_name, post_slug},
};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Result of a successful post build.
#[derive(Debug, Clone)]
pub struct BuiltPost {
    /// Written HTML file
    pub output: PathBuf,
    pub entry: PostIndexEntry,
}

/// Build a post from a file on disk.
pub fn build_file(path: &Path, ctx: &BuildContext<'_>) -> Result<BuiltPost> {
    let doc = Document::load(path)?;
    build_post(&doc, ctx)
}

/// Render a document, fill the template and write the post.
///
/// Math detection and directives are read from the raw text; cross references
/// are resolved before rendering.
pub fn build_post(doc: &Document, ctx: &BuildContext<'_>) -> Result<BuiltPost> {
    let config = ctx.config;
    log!("post"; "processing {}", doc.path.display());

    let has_math = markdown::has_math(&doc.text);
    let title = extract_title(&doc.text);
    let date = extract_date(&doc.text);

    let resolved = ctx.title_map.resolve(&doc.text);
    let html = markdown::render(&resolved);
    let html = rewrite_image_paths(&html, &config.build.images);

    let metadata = PostMetadata::from_html(&html).with_directives(title, date);

    let template = Template::load(&config.build.template)?;
    let page = template.render_post(config, &metadata, &html, has_math);

    let file_name = post_file_name(&post_slug(&metadata.title, &doc.id));
    let output = config.build.posts.join(&file_name);

    fs::create_dir_all(&config.build.posts)
        .with_context(|| format!("failed to create {}", config.build.posts.display()))?;
    fs::write(&output, page).with_context(|| format!("failed to write {}", output.display()))?;

    log!("post"; "generated {} ({} words)", output.display(), metadata.word_count);

    let entry = PostIndexEntry {
        title: metadata.title,
        url: entry_url(config, &file_name),
        date: metadata.date,
        reading_time: metadata.reading_time,
        mtime: doc.mtime,
    };

    Ok(BuiltPost { output, entry })
}

/// Point image sources one directory up: posts live in their own directory
/// next to the images directory.
fn rewrite_image_paths(html: &str, images: &str) -> String {
    let from = format!("src=\"{images}");
    let to = format!("src=\"../{images}");
    html.replace(&from, &to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{BuildError, TitleMap};
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    const TEMPLATE: &str = "<html><head><title>Post Title - Tufte-Style Blog</title>\
{{MATH_SCRIPTS}}</head><body><h1>Your Post Title Here</h1><p>{{ARTICLE_DATE}}</p>\
<section class=\"content\"></section></body></html>";

    fn site() -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        fs::write(dir.path().join("posts/post-template.html"), TEMPLATE).unwrap();
        let mut config = SiteConfig::default();
        config.update_path_with_root(dir.path());
        (dir, config)
    }

    #[test]
    fn test_rewrite_image_paths() {
        assert_eq!(
            rewrite_image_paths(r#"<img src="images/a.png"> <img src="https://x/images/b.png">"#, "images/"),
            r#"<img src="../images/a.png"> <img src="https://x/images/b.png">"#
        );
    }

    #[test]
    fn test_build_post_writes_slug_file() {
        let (_dir, config) = site();
        let doc = Document::new(
            PathBuf::from("content/hello.md"),
            "<!-- title: Hello World -->\n<!-- date: 17/12-2025 -->\nHello *world*.\n\n![pic](images/p.png)".into(),
            None,
        );
        let ctx = BuildContext::new(&config, TitleMap::default());

        let built = build_post(&doc, &ctx).unwrap();
        assert_eq!(built.output, config.build.posts.join("hello-world.html"));
        assert_eq!(built.entry.url, "posts/hello-world.html");
        assert_eq!(built.entry.date, "17/12-2025");

        let page = fs::read_to_string(&built.output).unwrap();
        assert!(page.contains("<title>Hello World - Tufte-Style Blog</title>"));
        assert!(page.contains("<p>17/12-2025 · 1 min read</p>"));
        assert!(page.contains("<p>Hello <em>world</em>.</p>"));
        assert!(page.contains(r#"src="../images/p.png""#));
        assert!(!page.contains("katex"));
    }

    #[test]
    fn test_build_post_short_title_uses_stem() {
        let (_dir, config) = site();
        let doc = Document::new(
            PathBuf::from("content/2025-greeting.md"),
            "<!-- title: Hi -->\nBody".into(),
            None,
        );
        let ctx = BuildContext::new(&config, TitleMap::default());

        let built = build_post(&doc, &ctx).unwrap();
        assert_eq!(built.output, config.build.posts.join("2025-greeting.html"));
        assert_eq!(built.entry.title, "Hi");
    }

    #[test]
    fn test_build_post_resolves_references_and_math() {
        let (_dir, config) = site();
        let other = Document::new(
            PathBuf::from("content/other.md"),
            "<!-- title: My Other Post -->\nBody".into(),
            None,
        );
        let doc = Document::new(
            PathBuf::from("content/main.md"),
            "<!-- title: Main Post -->\nSee [[post:My Other Post|this]] and $$x^2$$.".into(),
            None,
        );
        let ctx = BuildContext::new(&config, TitleMap::build(&[other, doc.clone()]));

        let built = build_post(&doc, &ctx).unwrap();
        let page = fs::read_to_string(built.output).unwrap();
        assert!(page.contains(r#"<a href="my-other-post.html">this</a>"#));
        assert!(page.contains("katex.min.js"));
    }

    #[test]
    fn test_build_post_missing_template() {
        let (dir, config) = site();
        fs::remove_file(dir.path().join("posts/post-template.html")).unwrap();
        let doc = Document::new(PathBuf::from("content/a.md"), "Body".into(), None);
        let ctx = BuildContext::new(&config, TitleMap::default());

        let err = build_post(&doc, &ctx).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::MissingTemplate(_))
        ));
    }

    #[test]
    fn test_build_file_missing() {
        let (dir, config) = site();
        let ctx = BuildContext::new(&config, TitleMap::default());
        assert!(build_file(&dir.path().join("content/none.md"), &ctx).is_err());
    }
}
