//! Site configuration management for `tufte.toml`.
//!
//! The file is optional: without it every field takes its default, which
//! gives the classic layout (`content/*.md` → `posts/<slug>.html`, `index.html`
//! in the project root).
//!
//! # Sections
//!
//! | Section      | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `[base]`     | Site title, index heading and intro, stylesheet |
//! | `[build]`    | Content, posts, template and index paths       |
//! | `[template]` | Placeholder strings inside the post template   |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "codexerrata"
//! intro = ["This is my blog."]
//!
//! [build]
//! content = "content"
//! posts = "posts"
//!
//! [template]
//! post_title = "Your Post Title Here"
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod template;

pub use base::BaseConfig;
pub use build::BuildConfig;
pub use error::ConfigError;
pub use template::TemplateConfig;

use crate::{cli::Cli, log};
use anyhow::{Result, bail};
use educe::Educe;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing tufte.toml
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site identity and index page text
    #[serde(default)]
    pub base: BaseConfig,

    /// Build paths
    #[serde(default)]
    pub build: BuildConfig,

    /// Post template placeholders
    #[serde(default)]
    pub template: TemplateConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load configuration for a CLI invocation.
    ///
    /// A missing config file is not an error: defaults are used.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.config_path = Self::normalize_path(&config_path);
        config.update_path_with_root(root);
        config.validate()?;

        if config_path.exists() {
            log!("config"; "loaded {}", config.config_path.display());
        }

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Resolve every path against `root` and normalize to absolute paths
    pub fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.posts = Self::normalize_path(&root.join(&self.build.posts));
        self.build.template = Self::normalize_path(&root.join(&self.build.template));
        self.build.index = Self::normalize_path(&root.join(&self.build.index));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let placeholders = [
            ("[template.page_title]", &self.template.page_title),
            ("[template.post_title]", &self.template.post_title),
            ("[template.article_date]", &self.template.article_date),
            ("[template.math_scripts]", &self.template.math_scripts),
            ("[template.convert_meta]", &self.template.convert_meta),
        ];
        for (field, value) in placeholders {
            if value.is_empty() {
                bail!(ConfigError::Validation(format!("{field} must not be empty")));
            }
        }

        if self.build.images.is_empty() {
            bail!(ConfigError::Validation(
                "[build.images] must not be empty".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SiteConfig::from_str("").unwrap();

        assert_eq!(config.base.title, "codexerrata");
        assert_eq!(config.build.content, PathBuf::from("content"));
        assert_eq!(config.build.posts, PathBuf::from("posts"));
        assert_eq!(config.template.post_title, "Your Post Title Here");
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result = SiteConfig::from_str("[serve]\nport = 1");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = SiteConfig::from_path(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Io(..))));
    }

    #[test]
    fn test_update_path_with_root() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.update_path_with_root(dir.path());

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.get_root(), root.as_path());
        assert_eq!(config.build.content, root.join("content"));
        assert_eq!(config.build.posts, root.join("posts"));
        assert_eq!(config.build.template, root.join("posts/post-template.html"));
        assert_eq!(config.build.index, root.join("index.html"));
    }

    #[test]
    fn test_validate_rejects_empty_placeholder() {
        let mut config = SiteConfig::default();
        assert!(config.validate().is_ok());

        config.template.article_date.clear();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[template.article_date]"));
    }

    #[test]
    fn test_load_without_config_file() {
        let dir = TempDir::new().unwrap();
        let cli = Cli {
            root: Some(dir.path().to_path_buf()),
            config: PathBuf::from("tufte.toml"),
            command: None,
        };
        let config = SiteConfig::load(&cli).unwrap();

        assert_eq!(config.build.content, dir.path().canonicalize().unwrap().join("content"));
    }

    #[test]
    fn test_load_with_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("tufte.toml"),
            "[build]\ncontent = \"drafts\"\n",
        )
        .unwrap();
        let cli = Cli {
            root: Some(dir.path().to_path_buf()),
            config: PathBuf::from("tufte.toml"),
            command: None,
        };
        let config = SiteConfig::load(&cli).unwrap();

        assert!(config.build.content.ends_with("drafts"));
    }
}
