//! Report store behavior, exercised against both backends.

use chrono::{Duration, Utc};
use tempfile::TempDir;

use leadscout::extractor::{ContactInfo, PageRecord};
use leadscout::store::{ReportStore, StoredReport};

fn sample_pages() -> Vec<PageRecord> {
    vec![PageRecord {
        url: "https://clinic.example.com/services".to_string(),
        title: "Services".to_string(),
        description: "What we offer".to_string(),
        headings: vec!["Our Services".to_string()],
        paragraphs: vec!["We provide comprehensive joint care.".to_string()],
        lists: vec![vec!["Knee".to_string(), "Hip".to_string()]],
        contact_info: ContactInfo {
            phones: vec!["(555) 000-1111".to_string()],
            emails: vec![],
            addresses: vec![],
        },
        tables: vec![],
    }]
}

fn sample_report(url: &str) -> StoredReport {
    StoredReport::new(url, "PRACTICE OVERVIEW\nA clinic.".to_string(), sample_pages())
}

async fn stores() -> (TempDir, Vec<ReportStore>) {
    let dir = TempDir::new().unwrap();
    let sqlite = ReportStore::open_sqlite(&dir.path().join("reports.db"))
        .await
        .unwrap();
    let files = ReportStore::open_dir(&dir.path().join("reports")).unwrap();
    (dir, vec![sqlite, files])
}

#[tokio::test]
async fn save_and_get_roundtrip() {
    let (_dir, stores) = stores().await;
    for store in &stores {
        let report = sample_report("https://clinic.example.com/");
        store.save(&report).await.unwrap();

        let loaded = store.get(&report.id).await.unwrap().unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.url, "https://clinic.example.com/");
        assert_eq!(loaded.domain, "clinic.example.com");
        assert_eq!(loaded.summary, report.summary);
        assert_eq!(loaded.pages.len(), 1);
        assert_eq!(loaded.pages[0].lists[0], vec!["Knee", "Hip"]);
    }
}

#[tokio::test]
async fn get_unknown_id_is_none() {
    let (_dir, stores) = stores().await;
    for store in &stores {
        assert!(store.get("no-such-id").await.unwrap().is_none());
        assert!(store.get("../escape").await.unwrap().is_none());
    }
}

#[tokio::test]
async fn find_recent_honors_the_cache_window() {
    let (_dir, stores) = stores().await;
    for store in &stores {
        let mut stale = sample_report("https://clinic.example.com/");
        stale.created_at = Utc::now() - Duration::hours(48);
        store.save(&stale).await.unwrap();

        // Outside the 24h window: miss.
        assert!(store
            .find_recent("https://clinic.example.com/", 24)
            .await
            .unwrap()
            .is_none());

        let fresh = sample_report("https://clinic.example.com/");
        store.save(&fresh).await.unwrap();

        // The fresh one is found, and it's the newest.
        let hit = store
            .find_recent("https://clinic.example.com/", 24)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hit.id, fresh.id);

        // Other URLs don't hit this cache entry.
        assert!(store
            .find_recent("https://other.example.com/", 24)
            .await
            .unwrap()
            .is_none());
    }
}

#[tokio::test]
async fn list_recent_is_newest_first_and_windowed() {
    let (_dir, stores) = stores().await;
    for store in &stores {
        let mut old = sample_report("https://a.example.com/");
        old.created_at = Utc::now() - Duration::days(30);
        store.save(&old).await.unwrap();

        let mut earlier = sample_report("https://b.example.com/");
        earlier.created_at = Utc::now() - Duration::hours(2);
        store.save(&earlier).await.unwrap();

        let newest = sample_report("https://c.example.com/");
        store.save(&newest).await.unwrap();

        let listings = store.list_recent(50).await.unwrap();
        let domains: Vec<&str> = listings.iter().map(|l| l.domain.as_str()).collect();
        assert_eq!(domains, ["c.example.com", "b.example.com"]);
    }
}

#[tokio::test]
async fn delete_removes_exactly_once() {
    let (_dir, stores) = stores().await;
    for store in &stores {
        let report = sample_report("https://clinic.example.com/");
        store.save(&report).await.unwrap();

        assert!(store.delete(&report.id).await.unwrap());
        assert!(store.get(&report.id).await.unwrap().is_none());
        assert!(!store.delete(&report.id).await.unwrap());
    }
}
