//! Command-line surface for the report pipeline.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use leadscout::config::CrawlConfig;
use leadscout::crawler::crawl_site;
use leadscout::report::{build_corpus, render_pdf, summarize_site, LlmClient};
use leadscout::store::{ReportStore, StoredReport};
use leadscout::utils::normalize_url;

/// How long a cached report stays fresh.
const CACHE_MAX_AGE_HOURS: i64 = 24;
const LIST_LIMIT: usize = 50;

#[derive(Parser)]
#[command(name = "leadscout", version, about = "Sales-intelligence reports from business websites")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crawl a site, generate the sales report and write it as a PDF.
    Report {
        /// Website URL (scheme optional).
        url: String,
        /// Output PDF path; defaults to <domain>.pdf.
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long, default_value_t = 4)]
        max_depth: u32,
        #[arg(long, default_value_t = 20)]
        max_pages: usize,
        /// Ignore any cached report and crawl again.
        #[arg(long)]
        fresh: bool,
    },
    /// Crawl a site and print the extracted page records as JSON.
    Crawl {
        url: String,
        #[arg(long, default_value_t = 4)]
        max_depth: u32,
        #[arg(long, default_value_t = 20)]
        max_pages: usize,
    },
    /// Ask a question about a previously generated report.
    Ask {
        /// Report id as shown by `list`.
        report_id: String,
        question: String,
    },
    /// List reports generated in the last week.
    List,
    /// Delete a stored report.
    Delete { report_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("leadscout=info")),
        )
        .init();

    match Cli::parse().command {
        Command::Report {
            url,
            out,
            max_depth,
            max_pages,
            fresh,
        } => report(url, out, max_depth, max_pages, fresh).await,
        Command::Crawl {
            url,
            max_depth,
            max_pages,
        } => crawl(url, max_depth, max_pages).await,
        Command::Ask {
            report_id,
            question,
        } => ask(&report_id, &question).await,
        Command::List => list().await,
        Command::Delete { report_id } => delete(&report_id).await,
    }
}

async fn report(
    url: String,
    out: Option<PathBuf>,
    max_depth: u32,
    max_pages: usize,
    fresh: bool,
) -> Result<()> {
    let config = CrawlConfig::builder()
        .start_url(url)
        .max_depth(max_depth)
        .max_pages(max_pages)
        .build()?;
    let canonical = normalize_url(config.start_url())
        .with_context(|| format!("invalid URL: {}", config.start_url()))?;

    let store = open_store().await?;

    let stored = if fresh {
        None
    } else {
        store.find_recent(&canonical, CACHE_MAX_AGE_HOURS).await?
    };

    let stored = match stored {
        Some(report) => {
            info!(id = %report.id, "using cached report");
            report
        }
        None => {
            let client = llm_client()?;
            let pages = crawl_site(&config).await?;
            if pages.is_empty() {
                bail!("crawl produced no content; is the site reachable?");
            }
            let corpus = build_corpus(&pages);
            if corpus.is_empty() {
                bail!("no usable content extracted from {canonical}");
            }
            let summary = summarize_site(&client, &corpus).await?;
            let report = StoredReport::new(&canonical, summary, pages);
            store.save(&report).await?;
            info!(id = %report.id, "report stored");
            report
        }
    };

    let out = out.unwrap_or_else(|| PathBuf::from(format!("{}.pdf", stored.domain)));
    let title = format!("{} Sales Report", stored.domain);
    let bytes = render_pdf(&title, &stored.summary)?;
    std::fs::write(&out, bytes).with_context(|| format!("failed to write {}", out.display()))?;

    println!("report {} written to {}", stored.id, out.display());
    Ok(())
}

async fn crawl(url: String, max_depth: u32, max_pages: usize) -> Result<()> {
    let config = CrawlConfig::builder()
        .start_url(url)
        .max_depth(max_depth)
        .max_pages(max_pages)
        .build()?;
    let pages = crawl_site(&config).await?;
    println!("{}", serde_json::to_string_pretty(&pages)?);
    Ok(())
}

async fn ask(report_id: &str, question: &str) -> Result<()> {
    let store = open_store().await?;
    let Some(report) = store.get(report_id).await? else {
        bail!("no report with id {report_id}; run `leadscout list`");
    };
    let client = llm_client()?;
    let answer = leadscout::answer_question(&client, &report, question).await?;
    println!("{answer}");
    Ok(())
}

async fn list() -> Result<()> {
    let store = open_store().await?;
    let listings = store.list_recent(LIST_LIMIT).await?;
    if listings.is_empty() {
        println!("no reports in the last 7 days");
        return Ok(());
    }
    for l in listings {
        println!(
            "{}  {}  {}",
            l.id,
            l.created_at.format("%Y-%m-%d %H:%M"),
            l.domain
        );
    }
    Ok(())
}

async fn delete(report_id: &str) -> Result<()> {
    let store = open_store().await?;
    if store.delete(report_id).await? {
        println!("deleted {report_id}");
    } else {
        println!("no report with id {report_id}");
    }
    Ok(())
}

/// SQLite when `LEADSCOUT_DB` is set, otherwise JSON files under the
/// platform data directory.
async fn open_store() -> Result<ReportStore> {
    if let Ok(db_path) = std::env::var("LEADSCOUT_DB") {
        return Ok(ReportStore::open_sqlite(&PathBuf::from(db_path)).await?);
    }
    let dir = dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("leadscout")
        .join("reports");
    Ok(ReportStore::open_dir(&dir)?)
}

fn llm_client() -> Result<LlmClient> {
    let api_key =
        std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set; required to generate or query reports")?;
    let mut client = LlmClient::new(api_key)?;
    if let Ok(base_url) = std::env::var("LEADSCOUT_LLM_BASE_URL") {
        client = client.with_base_url(base_url);
    }
    if let Ok(model) = std::env::var("LEADSCOUT_MODEL") {
        client = client.with_model(model);
    }
    Ok(client)
}
