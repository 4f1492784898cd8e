//! Site crawler: frontier management, link classification, page fetching
//! and whole-crawl orchestration.

pub mod classifier;
pub mod fetcher;
pub mod frontier;
pub mod orchestrator;

pub use classifier::{classify, PageClass};
pub use frontier::{Frontier, FrontierEntry};
pub use orchestrator::crawl_site;

use thiserror::Error;

/// Errors a crawl can surface to its caller.
///
/// Per-page problems (navigation failures, timeouts, extraction errors)
/// are recovered inside the orchestrator and never appear here; the caller
/// sees a complete — possibly empty — page list, or one of these.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed URL didn't normalize to an absolute http(s) URL.
    #[error("invalid start URL: {0}")]
    InvalidStartUrl(String),

    /// The rendering engine could not be launched. Fatal to the crawl.
    #[error("browser engine failure")]
    Engine(#[source] anyhow::Error),
}
