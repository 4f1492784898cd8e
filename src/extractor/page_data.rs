//! Typed page content as extracted from the live DOM.

use serde::{Deserialize, Serialize};

/// Everything harvested from one successfully fetched page.
///
/// Records are immutable once built and owned by the crawl result. Headings
/// are emitted raw; boilerplate filtering happens in the report builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Normalized URL, unique within one crawl.
    pub url: String,
    pub title: String,
    /// Meta description; empty string when the page has none.
    pub description: String,
    pub headings: Vec<String>,
    /// Paragraph-like text, already filtered to length > 20 at extraction.
    pub paragraphs: Vec<String>,
    /// Each inner vec is one detected list's items.
    pub lists: Vec<Vec<String>>,
    pub contact_info: ContactInfo,
    /// Table -> rows -> cells.
    pub tables: Vec<Vec<Vec<String>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub addresses: Vec<String>,
}

impl ContactInfo {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phones.is_empty() && self.emails.is_empty() && self.addresses.is_empty()
    }
}

/// A same-host outbound link found on a page, with its anchor text.
/// Consumed by the frontier for classification and scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredLink {
    pub url: String,
    #[serde(default)]
    pub text: String,
}

/// Title and meta fields returned by the content script alongside the
/// body text; split out so the script result deserializes in one shot.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PageContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub headings: Vec<String>,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}
