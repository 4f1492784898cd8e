//! Crawl configuration.
//!
//! Provides the `CrawlConfig` struct and its type-safe builder with
//! sensible defaults for polite single-site crawling.

pub mod builder;
pub mod types;

pub use builder::{CrawlConfigBuilder, WithStartUrl};
pub use types::CrawlConfig;
