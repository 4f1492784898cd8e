//! Whole-crawl orchestration.
//!
//! Owns the browser lifecycle and drives the frontier in
//! concurrency-bounded batches. Link discovery from a batch is never
//! interleaved with fetching of that same batch: the orchestrator waits
//! for every fetch in the wave, then enqueues everything the wave found,
//! then pulls the next wave. Per-page failures are absorbed here; only
//! engine-level failure reaches the caller.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::browser::{launch_browser, shutdown_browser};
use crate::config::CrawlConfig;
use crate::crawler::fetcher::{fetch_page, FetchOutcome};
use crate::crawler::frontier::Frontier;
use crate::crawler::CrawlError;
use crate::extractor::{DiscoveredLink, PageRecord};

/// Crawl a site breadth-first from `config.start_url()`.
///
/// Returns the accumulated page records once the frontier is exhausted or
/// the page budget is spent. The browser is released on every exit path.
pub async fn crawl_site(config: &CrawlConfig) -> Result<Vec<PageRecord>, CrawlError> {
    let mut frontier = Frontier::new(
        config.start_url(),
        config.max_depth(),
        config.max_pages(),
    )
    .ok_or_else(|| CrawlError::InvalidStartUrl(config.start_url().to_string()))?;

    info!(
        start_url = config.start_url(),
        max_depth = config.max_depth(),
        max_pages = config.max_pages(),
        "starting crawl"
    );

    let (browser, handler_task, user_data_dir) = launch_browser(config.headless())
        .await
        .map_err(CrawlError::Engine)?;
    let browser = Arc::new(browser);

    let records = run_batches(&browser, &mut frontier, config).await;

    match Arc::try_unwrap(browser) {
        Ok(browser) => shutdown_browser(browser, handler_task, user_data_dir).await,
        Err(arc) => {
            // All fetch tasks are awaited before we get here, so this
            // shouldn't happen; the drop impls still reap the process.
            warn!(
                "browser still has {} references at shutdown",
                Arc::strong_count(&arc)
            );
            handler_task.abort();
        }
    }

    info!(
        pages = records.len(),
        visited = frontier.visited_count(),
        "crawl finished"
    );

    Ok(records)
}

async fn run_batches(
    browser: &Arc<chromiumoxide::Browser>,
    frontier: &mut Frontier,
    config: &CrawlConfig,
) -> Vec<PageRecord> {
    let page_timeout = config.page_timeout();
    let mut records = Vec::new();

    loop {
        let batch = frontier.next_batch(config.concurrency());
        if batch.is_empty() {
            break;
        }
        debug!(size = batch.len(), "dispatching batch");

        let mut tasks = Vec::with_capacity(batch.len());
        for entry in batch {
            let browser = Arc::clone(browser);
            tasks.push(tokio::spawn(async move {
                let outcome = fetch_page(&browser, &entry.url, page_timeout).await;
                (entry, outcome)
            }));
        }

        // Wave barrier: collect every fetch before touching the frontier.
        let mut discovered: Vec<(Vec<DiscoveredLink>, u32)> = Vec::new();
        for task in tasks {
            let (entry, outcome) = match task.await {
                Ok(result) => result,
                Err(e) => {
                    warn!("fetch task panicked: {e}");
                    continue;
                }
            };
            match outcome {
                Ok(FetchOutcome::Fetched { record, links }) => {
                    info!(url = %entry.url, depth = entry.depth, "scraped");
                    records.push(record);
                    discovered.push((links, entry.depth));
                }
                Ok(FetchOutcome::NotFound) => {
                    debug!(url = %entry.url, "404, skipping");
                }
                Err(e) => {
                    warn!(url = %entry.url, "page failed: {e:#}");
                }
            }
        }

        for (links, depth) in discovered {
            frontier.enqueue(&links, depth);
        }

        if frontier.is_exhausted() {
            break;
        }

        // Jittered pause between waves so we don't hammer the site.
        let delay: u64 = rand::rng().random_range(1000..=2000);
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    records
}
