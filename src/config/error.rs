//! Errors raised while loading `tufte.toml`.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read, parse or validate the site config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config path exists but could not be read.
    #[error("cannot read site config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid TOML in tufte.toml")]
    Toml(#[from] toml::de::Error),

    /// A field parsed but holds an unusable value.
    #[error("tufte.toml: {0}")]
    Validation(String),
}
