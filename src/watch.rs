//! `watch` command.
//!
//! There is no file watcher: the command only tells the user how to rebuild.

use crate::{config::SiteConfig, log};

/// Print rebuild instructions for the configured content directory.
pub fn watch(config: &SiteConfig) {
    log!("watch"; "{}", guidance(config));
}

fn guidance(config: &SiteConfig) -> String {
    let content = config
        .build
        .content
        .strip_prefix(config.get_root())
        .unwrap_or(&config.build.content);
    format!(
        "watching is not supported; add or edit .md files in {}/ and run build-all again",
        content.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_guidance_names_content_dir() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.update_path_with_root(dir.path());

        let text = guidance(&config);
        assert!(text.contains("content/"));
        assert!(text.contains("build-all"));
    }
}
