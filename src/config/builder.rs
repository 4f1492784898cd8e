//! Type-safe builder for `CrawlConfig` using the typestate pattern.
//!
//! The start URL is required and enforced at compile time: `build()` only
//! exists once `start_url` has been set.

use std::marker::PhantomData;

use super::types::CrawlConfig;

/// Default crawl depth; matches the report pipeline's call site.
pub const DEFAULT_MAX_DEPTH: u32 = 4;
/// Default page budget.
pub const DEFAULT_MAX_PAGES: usize = 20;
/// Default fetch concurrency per batch.
pub const DEFAULT_CONCURRENCY: usize = 5;
/// Default per-page navigation timeout in seconds.
pub const DEFAULT_PAGE_TIMEOUT_SECS: u64 = 20;

// Type state for the builder.
pub struct WithStartUrl;

pub struct CrawlConfigBuilder<State = ()> {
    pub(crate) start_url: Option<String>,
    pub(crate) max_depth: u32,
    pub(crate) max_pages: usize,
    pub(crate) concurrency: usize,
    pub(crate) page_timeout_secs: u64,
    pub(crate) headless: bool,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for CrawlConfigBuilder<()> {
    fn default() -> Self {
        Self {
            start_url: None,
            max_depth: DEFAULT_MAX_DEPTH,
            max_pages: DEFAULT_MAX_PAGES,
            concurrency: DEFAULT_CONCURRENCY,
            page_timeout_secs: DEFAULT_PAGE_TIMEOUT_SECS,
            headless: true,
            _phantom: PhantomData,
        }
    }
}

impl CrawlConfig {
    /// Create a builder with a fluent interface.
    #[must_use]
    pub fn builder() -> CrawlConfigBuilder<()> {
        CrawlConfigBuilder::default()
    }
}

impl CrawlConfigBuilder<()> {
    /// Set the seed URL. A bare domain gets `https://` prepended so users
    /// can type `clinic.com` and get what they meant.
    pub fn start_url(self, url: impl Into<String>) -> CrawlConfigBuilder<WithStartUrl> {
        let url = url.into();
        let normalized = if url.starts_with("http://") || url.starts_with("https://") {
            url
        } else {
            format!("https://{url}")
        };

        CrawlConfigBuilder {
            start_url: Some(normalized),
            max_depth: self.max_depth,
            max_pages: self.max_pages,
            concurrency: self.concurrency,
            page_timeout_secs: self.page_timeout_secs,
            headless: self.headless,
            _phantom: PhantomData,
        }
    }
}

impl<State> CrawlConfigBuilder<State> {
    #[must_use]
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    #[must_use]
    pub fn page_timeout_secs(mut self, secs: u64) -> Self {
        self.page_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }
}

// Build is only available once the start URL is set.
impl CrawlConfigBuilder<WithStartUrl> {
    pub fn build(self) -> anyhow::Result<CrawlConfig> {
        // Headed mode is a debugging affordance; release builds always run
        // headless.
        #[cfg(not(debug_assertions))]
        let headless = true;
        #[cfg(debug_assertions)]
        let headless = self.headless;

        Ok(CrawlConfig {
            start_url: self
                .start_url
                .ok_or_else(|| anyhow::anyhow!("start_url is required"))?,
            max_depth: self.max_depth,
            max_pages: self.max_pages,
            concurrency: self.concurrency,
            page_timeout_secs: self.page_timeout_secs,
            headless,
        })
    }
}
