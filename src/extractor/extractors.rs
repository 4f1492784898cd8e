//! Per-signal page extraction.
//!
//! Each signal (content, lists, contact info, tables, links) is pulled with
//! its own script evaluation and its own error handling: a failed query
//! degrades that signal to an empty collection and never aborts the rest of
//! the page.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::warn;

use super::js_scripts::{
    CONTACT_SCRIPT, CONTENT_SCRIPT, LINKS_SCRIPT, LISTS_SCRIPT, TABLES_SCRIPT,
};
use super::page_data::{ContactInfo, DiscoveredLink, PageContent, PageRecord};
use super::DomEvaluator;

async fn evaluate_as<E, T>(dom: &E, script: &str, what: &str) -> Result<T>
where
    E: DomEvaluator,
    T: DeserializeOwned,
{
    let value = dom
        .evaluate_json(script)
        .await
        .with_context(|| format!("failed to evaluate {what} script"))?;
    serde_json::from_value(value).with_context(|| format!("failed to parse {what} result"))
}

/// Extract a full [`PageRecord`] plus discovered same-host links.
///
/// Content (title/description/headings/paragraphs) comes from one script;
/// lists, contact info, tables and links each from their own. Any signal
/// that fails is logged and replaced with its empty value.
pub async fn extract_page_record<E: DomEvaluator>(
    dom: &E,
    url: &str,
) -> (PageRecord, Vec<DiscoveredLink>) {
    let content: PageContent = match evaluate_as(dom, CONTENT_SCRIPT, "content").await {
        Ok(content) => content,
        Err(e) => {
            warn!(url, "content extraction failed: {e:#}");
            PageContent::default()
        }
    };

    let lists: Vec<Vec<String>> = match evaluate_as(dom, LISTS_SCRIPT, "lists").await {
        Ok(lists) => lists,
        Err(e) => {
            warn!(url, "list extraction failed: {e:#}");
            Vec::new()
        }
    };

    let contact_info: ContactInfo = match evaluate_as(dom, CONTACT_SCRIPT, "contact info").await {
        Ok(info) => info,
        Err(e) => {
            warn!(url, "contact extraction failed: {e:#}");
            ContactInfo::default()
        }
    };

    let tables: Vec<Vec<Vec<String>>> = match evaluate_as(dom, TABLES_SCRIPT, "tables").await {
        Ok(tables) => tables,
        Err(e) => {
            warn!(url, "table extraction failed: {e:#}");
            Vec::new()
        }
    };

    let links: Vec<DiscoveredLink> = match evaluate_as(dom, LINKS_SCRIPT, "links").await {
        Ok(links) => links,
        Err(e) => {
            warn!(url, "link extraction failed: {e:#}");
            Vec::new()
        }
    };

    let record = PageRecord {
        url: url.to_string(),
        title: content.title,
        description: content.description,
        headings: content.headings,
        paragraphs: content.paragraphs,
        lists,
        contact_info,
        tables,
    };

    (record, links)
}
