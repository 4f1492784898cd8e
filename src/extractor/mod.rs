//! Content extraction against a live DOM.
//!
//! Extraction logic talks to the rendering engine through the
//! [`DomEvaluator`] capability trait rather than a concrete page handle,
//! so the same code runs against chromiumoxide in production and against
//! scripted fakes in tests.

pub mod extractors;
pub mod js_scripts;
pub mod page_data;

pub use extractors::extract_page_record;
pub use page_data::{ContactInfo, DiscoveredLink, PageRecord};

use std::future::Future;

use anyhow::Result;

/// Capability to evaluate a JavaScript expression in a page and get the
/// resulting value back as JSON.
pub trait DomEvaluator: Send + Sync {
    fn evaluate_json(
        &self,
        script: &str,
    ) -> impl Future<Output = Result<serde_json::Value>> + Send;
}

impl DomEvaluator for chromiumoxide::Page {
    async fn evaluate_json(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .evaluate(script)
            .await
            .map_err(|e| anyhow::anyhow!("script evaluation failed: {e}"))?;
        result
            .into_value::<serde_json::Value>()
            .map_err(|e| anyhow::anyhow!("script result was not JSON: {e}"))
    }
}
