//! Core configuration types for site crawling.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for one crawl.
///
/// Budgets (`max_depth`, `max_pages`) are call parameters decided by the
/// caller; nothing here is read from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    pub(crate) start_url: String,
    pub(crate) max_depth: u32,
    pub(crate) max_pages: usize,
    /// Pages fetched concurrently within one batch.
    pub(crate) concurrency: usize,
    /// Hard per-page navigation timeout in seconds.
    pub(crate) page_timeout_secs: u64,
    pub(crate) headless: bool,
}

impl CrawlConfig {
    #[must_use]
    pub fn start_url(&self) -> &str {
        &self.start_url
    }

    #[must_use]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[must_use]
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    #[must_use]
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }
}
