//! Tufte - A static blog builder for restricted markdown.

mod build;
mod cli;
mod compiler;
mod config;
mod convert;
mod generator;
mod logger;
mod markdown;
mod utils;
mod watch;

use anyhow::Result;
use build::{build_all, build_one};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;

    match cli.command() {
        Commands::BuildAll => build_all(&config).map(|_| ()),
        Commands::Build { file } => build_one(&config, &file).map(|_| ()),
        Commands::Watch => {
            watch::watch(&config);
            Ok(())
        }
        Commands::Convert { input, output } => {
            convert::convert(&config, &input, output.as_deref())
        }
    }
}
