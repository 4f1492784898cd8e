//! SQLite report store.

use std::path::Path;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;
use tracing::debug;

use super::{ReportListing, StoreError, StoredReport};

/// Crawl payloads are stored as a JSON column; reports are small (page
/// budget is double digits) and never queried by content.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS reports (
        id         TEXT PRIMARY KEY,
        url        TEXT NOT NULL,
        domain     TEXT NOT NULL,
        summary    TEXT NOT NULL,
        pages      TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_reports_url_created ON reports (url, created_at)",
];

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }
        debug!("opened report database at {}", path.display());
        Ok(Self { pool })
    }

    pub async fn save(&self, report: &StoredReport) -> Result<(), StoreError> {
        let pages = serde_json::to_string(&report.pages)?;
        sqlx::query(
            "INSERT INTO reports (id, url, domain, summary, pages, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&report.id)
        .bind(&report.url)
        .bind(&report.domain)
        .bind(&report.summary)
        .bind(pages)
        .bind(report.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_recent(
        &self,
        url: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Option<StoredReport>, StoreError> {
        let row = sqlx::query(
            "SELECT id, url, domain, summary, pages, created_at FROM reports
             WHERE url = ?1 AND created_at >= ?2
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(url)
        .bind(cutoff.to_rfc3339())
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_report).transpose()
    }

    pub async fn get(&self, id: &str) -> Result<Option<StoredReport>, StoreError> {
        let row = sqlx::query(
            "SELECT id, url, domain, summary, pages, created_at FROM reports WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_report).transpose()
    }

    pub async fn list_recent(
        &self,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<ReportListing>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, url, domain, created_at FROM reports
             WHERE created_at >= ?1
             ORDER BY created_at DESC LIMIT ?2",
        )
        .bind(cutoff.to_rfc3339())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(ReportListing {
                    id: row.get("id"),
                    url: row.get("url"),
                    domain: row.get("domain"),
                    created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
                })
            })
            .collect()
    }

    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM reports WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_report(row: sqlx::sqlite::SqliteRow) -> Result<StoredReport, StoreError> {
    let pages: String = row.get("pages");
    Ok(StoredReport {
        id: row.get("id"),
        url: row.get("url"),
        domain: row.get("domain"),
        summary: row.get("summary"),
        pages: serde_json::from_str(&pages)?,
        created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
    })
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("bad timestamp {raw:?}: {e}"),
            ))
        })
}
