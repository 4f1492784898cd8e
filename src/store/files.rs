//! File-based report store: one JSON document per report.
//!
//! The fallback for database-less runs. Listing scans the directory, so
//! this stays sensible only for the handful of reports a cache window
//! holds — which is the point.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::{ReportListing, StoreError, StoredReport};

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        debug!("using file report store at {}", dir.display());
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    pub async fn save(&self, report: &StoredReport) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(report)?;
        tokio::fs::write(self.path_for(&report.id), json).await?;
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Option<StoredReport>, StoreError> {
        // Ids come from user input; refuse anything that isn't a bare file name.
        if id.contains(['/', '\\']) || id.contains("..") {
            return Ok(None);
        }
        match tokio::fs::read(self.path_for(id)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_recent(
        &self,
        url: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Option<StoredReport>, StoreError> {
        let mut best: Option<StoredReport> = None;
        for report in self.read_all().await? {
            if report.url == url
                && report.created_at >= cutoff
                && best
                    .as_ref()
                    .is_none_or(|b| report.created_at > b.created_at)
            {
                best = Some(report);
            }
        }
        Ok(best)
    }

    pub async fn list_recent(
        &self,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<ReportListing>, StoreError> {
        let mut listings: Vec<ReportListing> = self
            .read_all()
            .await?
            .into_iter()
            .filter(|r| r.created_at >= cutoff)
            .map(|r| ReportListing {
                id: r.id,
                url: r.url,
                domain: r.domain,
                created_at: r.created_at,
            })
            .collect();
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        listings.truncate(limit);
        Ok(listings)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        if id.contains(['/', '\\']) || id.contains("..") {
            return Ok(false);
        }
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn read_all(&self) -> Result<Vec<StoredReport>, StoreError> {
        let mut reports = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match tokio::fs::read(&path).await {
                Ok(bytes) => match serde_json::from_slice(&bytes) {
                    Ok(report) => reports.push(report),
                    // A corrupt file shouldn't brick the whole store.
                    Err(e) => warn!("skipping unreadable report {}: {e}", path.display()),
                },
                Err(e) => warn!("skipping unreadable report {}: {e}", path.display()),
            }
        }
        Ok(reports)
    }
}
