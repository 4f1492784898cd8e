pub mod browser;
pub mod chat;
pub mod config;
pub mod crawler;
pub mod extractor;
pub mod report;
pub mod store;
pub mod utils;

pub use chat::answer_question;
pub use config::CrawlConfig;
pub use crawler::{crawl_site, CrawlError};
pub use extractor::{ContactInfo, DiscoveredLink, PageRecord};
pub use report::{
    build_corpus, render_pdf, summarize_site, LlmClient, LlmError,
};
pub use store::{ReportListing, ReportStore, StoreError, StoredReport};
pub use utils::normalize_url;
