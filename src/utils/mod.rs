//! Shared helpers for URL handling and browser identification.

pub mod url;

pub use url::{domain_of, host_of, normalize_url};

/// User agent presented to crawled sites. Matches a current desktop Chrome
/// so rendering and bot heuristics treat us like a regular visitor.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
