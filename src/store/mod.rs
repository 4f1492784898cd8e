//! Cached report storage.
//!
//! Reports are cached so repeat requests for the same site within the
//! cache window skip the crawl and the model call entirely. The primary
//! backend is SQLite; when no database is configured the store falls back
//! to plain JSON files in a directory, with the same operations.

mod files;
mod sqlite;

pub use files::FileStore;
pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extractor::PageRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// One generated report with the crawl data it was built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredReport {
    pub id: String,
    /// Normalized start URL the report was generated for.
    pub url: String,
    pub domain: String,
    pub summary: String,
    pub pages: Vec<PageRecord>,
    pub created_at: DateTime<Utc>,
}

impl StoredReport {
    /// Build a new record with a fresh id and the current timestamp.
    #[must_use]
    pub fn new(url: &str, summary: String, pages: Vec<PageRecord>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            url: url.to_string(),
            domain: crate::utils::domain_of(url),
            summary,
            pages,
            created_at: Utc::now(),
        }
    }
}

/// Listing row; the full crawl payload stays in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportListing {
    pub id: String,
    pub url: String,
    pub domain: String,
    pub created_at: DateTime<Utc>,
}

/// Days of history shown by `list_recent`.
const LISTING_WINDOW_DAYS: i64 = 7;

/// Report store with a database and a file-based backend.
pub enum ReportStore {
    Sqlite(SqliteStore),
    Files(FileStore),
}

impl ReportStore {
    /// Open the SQLite backend, creating the database if needed.
    pub async fn open_sqlite(path: &std::path::Path) -> Result<Self, StoreError> {
        Ok(Self::Sqlite(SqliteStore::open(path).await?))
    }

    /// Open the file backend rooted at `dir`, creating it if needed.
    pub fn open_dir(dir: &std::path::Path) -> Result<Self, StoreError> {
        Ok(Self::Files(FileStore::open(dir)?))
    }

    pub async fn save(&self, report: &StoredReport) -> Result<(), StoreError> {
        match self {
            Self::Sqlite(store) => store.save(report).await,
            Self::Files(store) => store.save(report).await,
        }
    }

    /// Most recent report for `url` no older than `max_age_hours`.
    pub async fn find_recent(
        &self,
        url: &str,
        max_age_hours: i64,
    ) -> Result<Option<StoredReport>, StoreError> {
        let cutoff = Utc::now() - chrono::Duration::hours(max_age_hours);
        match self {
            Self::Sqlite(store) => store.find_recent(url, cutoff).await,
            Self::Files(store) => store.find_recent(url, cutoff).await,
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<StoredReport>, StoreError> {
        match self {
            Self::Sqlite(store) => store.get(id).await,
            Self::Files(store) => store.get(id).await,
        }
    }

    /// Reports from the last week, newest first.
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<ReportListing>, StoreError> {
        let cutoff = Utc::now() - chrono::Duration::days(LISTING_WINDOW_DAYS);
        match self {
            Self::Sqlite(store) => store.list_recent(cutoff, limit).await,
            Self::Files(store) => store.list_recent(cutoff, limit).await,
        }
    }

    /// Delete a report. Returns whether anything was removed.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        match self {
            Self::Sqlite(store) => store.delete(id).await,
            Self::Files(store) => store.delete(id).await,
        }
    }
}
