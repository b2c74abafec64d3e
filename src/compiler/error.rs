//! Build error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building posts or the index.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("template not found: `{0}`")]
    MissingTemplate(PathBuf),

    #[error("content directory not found: `{0}`")]
    MissingContentDirectory(PathBuf),

    #[error("no markdown files found in `{0}`")]
    NoDocumentsFound(PathBuf),

    #[error("failed to build `{path}`")]
    Document {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}
