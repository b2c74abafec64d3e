//! Post compilation for the blog.
//!
//! This module turns markdown documents into finished post pages:
//!
//! - **links**: Title map and `[[post:...]]` cross-reference resolution
//! - **meta**: Title, date and reading time of a rendered post
//! - **template**: Post template loading and placeholder substitution
//! - **pages**: Single post build (render, template, write)
//! - **error**: `BuildError`
//!
//! # Build Flow
//!
//! ```text
//! collect_documents() ──► TitleMap::build() ──► build_post() ──► posts/<slug>.html
//!         │                      │                   │
//!         ▼                      ▼                   ▼
//!     Document[]          title → url          PostIndexEntry
//! ```

pub mod context;
pub mod error;
pub mod links;
pub mod meta;
pub mod pages;
pub mod template;

pub use context::BuildContext;
pub use error::BuildError;
pub use links::TitleMap;
pub use meta::PostIndexEntry;
pub use pages::{build_file, build_post};

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};
use walkdir::WalkDir;

/// Extension of source documents.
const MARKDOWN_EXT: &str = "md";

/// A markdown source file loaded into memory.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path to the source file
    pub path: PathBuf,
    /// File stem, used as the fallback title and slug
    pub id: String,
    /// Raw markdown text
    pub text: String,
    /// Modification time, if the filesystem reports one
    pub mtime: Option<SystemTime>,
}

impl Document {
    /// Read a document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mtime = fs::metadata(path).and_then(|m| m.modified()).ok();
        Ok(Self::new(path.to_path_buf(), text, mtime))
    }

    /// Build a document from already-loaded text.
    pub fn new(path: PathBuf, text: String, mtime: Option<SystemTime>) -> Self {
        let id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            id,
            text,
            mtime,
        }
    }
}

/// Collect `*.md` files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not searched.
pub fn collect_documents(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == MARKDOWN_EXT))
        .map(walkdir::DirEntry::into_path)
        .collect()
}
