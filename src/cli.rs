//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tufte blog builder CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name, relative to the root (default: tufte.toml)
    #[arg(short = 'C', long, default_value = "tufte.toml")]
    pub config: PathBuf,

    /// subcommands (default: build-all)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Build every post in the content directory and the index page
    BuildAll,

    /// Build a single markdown file
    Build {
        /// Path to the markdown file
        file: PathBuf,
    },

    /// Print how to rebuild on changes (no file watching)
    Watch,

    /// Convert an exported HTML document (or a directory of them) into posts
    Convert {
        /// HTML file or directory of HTML files
        input: PathBuf,

        /// Output file (single input only; default: posts/<name>-converted.html)
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// The subcommand to run, `build-all` when none was given.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::BuildAll)
    }
}
