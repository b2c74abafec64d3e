//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_all()
//!     │
//!     ├── collect_documents()   content/*.md, sorted by name
//!     ├── TitleMap::build()     once per batch, read-only afterwards
//!     ├── build_post() × N      failures are logged and counted
//!     └── build_index()         posts/… entries, newest first
//! ```

use crate::{
    compiler::{
        BuildContext, BuildError, Document, TitleMap, build_file, build_post, collect_documents,
    },
    config::SiteConfig,
    generator::index::build_index,
    log,
    logger::ProgressBars,
};
use anyhow::Result;
use std::path::Path;

/// Outcome of a batch build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BuildSummary {
    fn record(&mut self, ok: bool) {
        if ok {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Build every post in the content directory, then the index page.
///
/// A missing content directory or an empty one is reported and returns an
/// empty summary. Failures of single posts never abort the batch.
pub fn build_all(config: &SiteConfig) -> Result<BuildSummary> {
    let content = &config.build.content;

    if !content.is_dir() {
        log!("error"; "{}", BuildError::MissingContentDirectory(content.clone()));
        return Ok(BuildSummary::default());
    }

    let files = collect_documents(content);
    if files.is_empty() {
        log!("error"; "{}", BuildError::NoDocumentsFound(content.clone()));
        log!("build"; "add some markdown files to get started");
        return Ok(BuildSummary::default());
    }

    log!("build"; "building {} posts...", files.len());

    let mut summary = BuildSummary {
        total: files.len(),
        ..BuildSummary::default()
    };

    let mut docs = Vec::with_capacity(files.len());
    for path in &files {
        match Document::load(path) {
            Ok(doc) => docs.push(doc),
            Err(err) => {
                log_failure(path, err);
                summary.record(false);
            }
        }
    }

    let ctx = BuildContext::new(config, TitleMap::build(&docs));
    let progress = ProgressBars::new_filtered(&[("posts", docs.len())]);

    let mut entries = Vec::with_capacity(docs.len());
    for doc in &docs {
        match build_post(doc, &ctx) {
            Ok(built) => {
                entries.push(built.entry);
                summary.record(true);
            }
            Err(err) => {
                log_failure(&doc.path, err);
                summary.record(false);
            }
        }
        if let Some(progress) = &progress {
            progress.inc(0);
        }
    }

    if let Some(progress) = progress {
        progress.finish();
    }

    log!("build"; "built {}/{} posts", summary.succeeded, summary.total);

    build_index(config, entries)?;
    log!("build"; "check the {} directory", config.build.posts.display());

    Ok(summary)
}

/// Build a single markdown file.
///
/// The title map still covers the whole content directory, so references to
/// other posts resolve. Returns whether the post was written.
pub fn build_one(config: &SiteConfig, file: &Path) -> Result<bool> {
    if !file.is_file() {
        log!("error"; "file not found: {}", file.display());
        return Ok(false);
    }

    let docs: Vec<Document> = collect_documents(&config.build.content)
        .iter()
        .filter_map(|path| Document::load(path).ok())
        .collect();
    let ctx = BuildContext::new(config, TitleMap::build(&docs));

    match build_file(file, &ctx) {
        Ok(built) => {
            log!("build"; "built {}", built.output.display());
            Ok(true)
        }
        Err(err) => {
            log_failure(file, err);
            Ok(false)
        }
    }
}

fn log_failure(path: &Path, source: anyhow::Error) {
    let err = anyhow::Error::from(BuildError::Document {
        path: path.to_path_buf(),
        source,
    });
    log!("error"; "{err:#}");
}
