//! Single-page fetch: isolated tab, bounded navigation, extraction.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::network::{EventResponseReceived, ResourceType};
use chromiumoxide::listeners::EventStream;
use chromiumoxide::Page;
use futures::StreamExt;
use tracing::debug;

use crate::extractor::js_scripts::READY_STATE_SCRIPT;
use crate::extractor::{extract_page_record, DiscoveredLink, DomEvaluator, PageRecord};

/// How long to poll for initial DOM construction after navigation.
const DOM_WAIT: Duration = Duration::from_secs(5);

/// How long to wait for the main document's response metadata.
const STATUS_WAIT: Duration = Duration::from_secs(2);

/// Result of one page fetch.
pub enum FetchOutcome {
    /// Page loaded and was extracted; links are same-host and unresolved
    /// against the frontier's gates.
    Fetched {
        record: PageRecord,
        links: Vec<DiscoveredLink>,
    },
    /// The server answered 404. Expected case, not an error: the URL stays
    /// visited so it is never retried, and contributes no record.
    NotFound,
}

/// Fetch one URL in a fresh tab.
///
/// The tab is closed on every path. Navigation errors, timeouts and tab
/// crashes surface as `Err`; the caller absorbs them and moves on — a
/// single page never fails the crawl.
pub async fn fetch_page(
    browser: &Browser,
    url: &str,
    page_timeout: Duration,
) -> Result<FetchOutcome> {
    let page = browser
        .new_page("about:blank")
        .await
        .context("failed to open tab")?;

    let outcome = fetch_in_page(&page, url, page_timeout).await;

    if let Err(e) = page.close().await {
        debug!(url, "failed to close tab: {e}");
    }

    outcome
}

async fn fetch_in_page(page: &Page, url: &str, page_timeout: Duration) -> Result<FetchOutcome> {
    // Listen for response metadata before navigating so the main document's
    // status is not missed on fast responses.
    let mut responses = page
        .event_listener::<EventResponseReceived>()
        .await
        .map_err(|e| anyhow::anyhow!("failed to attach response listener: {e}"))?;

    tokio::time::timeout(page_timeout, page.goto(url))
        .await
        .map_err(|_| anyhow::anyhow!("navigation timed out after {}s", page_timeout.as_secs()))?
        .map_err(|e| anyhow::anyhow!("navigation failed: {e}"))?;

    // Wait only for DOM construction, not subresources or network idle;
    // the trade is latency over completeness and it is deliberate.
    wait_for_dom(page, DOM_WAIT).await;

    if let Some(status) = main_document_status(&mut responses).await {
        debug!(url, status, "main document response");
        if status == 404 {
            return Ok(FetchOutcome::NotFound);
        }
    }

    let (record, links) = extract_page_record(page, url).await;
    Ok(FetchOutcome::Fetched { record, links })
}

/// Poll `document.readyState` until the DOM exists or the deadline passes.
/// Timing out here is not an error; extraction just sees what's there.
async fn wait_for_dom(page: &Page, max_wait: Duration) {
    let start = Instant::now();
    let poll = Duration::from_millis(100);

    while start.elapsed() < max_wait {
        match page.evaluate_json(READY_STATE_SCRIPT).await {
            Ok(value) => {
                if value.get("ready").and_then(serde_json::Value::as_bool) == Some(true) {
                    return;
                }
            }
            Err(e) => debug!("readyState probe failed: {e:#}"),
        }
        tokio::time::sleep(poll).await;
    }
    debug!("DOM wait expired after {}s", max_wait.as_secs());
}

/// HTTP status of the first main-document response, if one shows up in
/// time. `None` (no event seen) is treated as success by the caller.
async fn main_document_status(
    responses: &mut EventStream<EventResponseReceived>,
) -> Option<i64> {
    tokio::time::timeout(STATUS_WAIT, async {
        while let Some(event) = responses.next().await {
            if matches!(&event.r#type, ResourceType::Document) {
                return Some(event.response.status);
            }
        }
        None
    })
    .await
    .ok()
    .flatten()
}
