//! Per-invocation build state passed to every post build.

use super::links::TitleMap;
use crate::config::SiteConfig;

/// Everything a single post build needs besides the document itself.
///
/// Created once per `build-all` / `build` run; the title map is read-only
/// after construction.
#[derive(Debug)]
pub struct BuildContext<'a> {
    pub config: &'a SiteConfig,
    pub title_map: TitleMap,
}

impl<'a> BuildContext<'a> {
    pub const fn new(config: &'a SiteConfig, title_map: TitleMap) -> Self {
        Self { config, title_map }
    }
}
