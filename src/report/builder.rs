//! Report corpus assembly.
//!
//! Takes the raw crawl output and produces the text block fed to the
//! model: near-duplicate pages collapsed, boilerplate headings and legal
//! paragraphs stripped. The crawler emits everything raw; all relevance
//! filtering lives here.

use std::collections::HashSet;

use crate::extractor::PageRecord;

const HEADING_NOISE: &[&str] = &["menu", "footer", "navigation", "cookie"];
const PARAGRAPH_NOISE: &[&str] = &[
    "copyright",
    "privacy policy",
    "terms of service",
    "cookie policy",
    "website disclaimer",
];

/// A page after filtering, ready to be rendered into the corpus.
#[derive(Debug, Clone)]
pub struct FilteredPage {
    pub url: String,
    pub title: String,
    pub description: String,
    pub headings: Vec<String>,
    pub paragraphs: Vec<String>,
}

/// Collapse duplicate pages and strip boilerplate.
///
/// Pages are deduplicated by lowercased title + meta description — sites
/// frequently serve the same content under several URLs. Pages left with
/// neither a useful heading nor a useful paragraph are dropped entirely.
#[must_use]
pub fn filter_pages(pages: &[PageRecord]) -> Vec<FilteredPage> {
    let mut seen = HashSet::new();
    let mut filtered = Vec::new();

    for page in pages {
        let key = format!("{}-{}", page.title, page.description).to_lowercase();
        if !seen.insert(key) {
            continue;
        }

        let headings: Vec<String> = page
            .headings
            .iter()
            .filter(|h| {
                let lower = h.to_lowercase();
                h.len() > 3 && !HEADING_NOISE.iter().any(|noise| lower.contains(noise))
            })
            .cloned()
            .collect();

        let paragraphs: Vec<String> = page
            .paragraphs
            .iter()
            .filter(|p| {
                let lower = p.to_lowercase();
                p.len() > 30 && !PARAGRAPH_NOISE.iter().any(|noise| lower.contains(noise))
            })
            .cloned()
            .collect();

        if headings.is_empty() && paragraphs.is_empty() {
            continue;
        }

        filtered.push(FilteredPage {
            url: page.url.clone(),
            title: page.title.clone(),
            description: page.description.clone(),
            headings,
            paragraphs,
        });
    }

    filtered
}

/// Render filtered pages into the flat text block the summary prompt
/// consumes.
#[must_use]
pub fn build_corpus(pages: &[PageRecord]) -> String {
    filter_pages(pages)
        .iter()
        .map(|page| {
            format!(
                "Page: {}\nTitle: {}\nMeta: {}\nHeadings:\n{}\nParagraphs:\n{}",
                page.url,
                page.title,
                page.description,
                page.headings.join("\n"),
                page.paragraphs.join("\n"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::ContactInfo;

    fn page(url: &str, title: &str, headings: &[&str], paragraphs: &[&str]) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            title: title.to_string(),
            description: String::new(),
            headings: headings.iter().map(|s| s.to_string()).collect(),
            paragraphs: paragraphs.iter().map(|s| s.to_string()).collect(),
            lists: Vec::new(),
            contact_info: ContactInfo::default(),
            tables: Vec::new(),
        }
    }

    const LONG_PARA: &str = "We provide comprehensive orthopedic care across three locations.";

    #[test]
    fn duplicate_pages_collapse() {
        let pages = vec![
            page("https://x.com/a", "Same Title", &["Our Services"], &[LONG_PARA]),
            page("https://x.com/b", "Same Title", &["Our Services"], &[LONG_PARA]),
        ];
        assert_eq!(filter_pages(&pages).len(), 1);
    }

    #[test]
    fn boilerplate_headings_removed() {
        let pages = vec![page(
            "https://x.com/a",
            "T",
            &["Main Menu", "Footer Links", "Cookie Notice", "Spine Surgery", "FAQ"],
            &[LONG_PARA],
        )];
        let filtered = filter_pages(&pages);
        // "FAQ" fails the length > 3 gate, the noise headings fail the
        // blocklist; only the real heading survives.
        assert_eq!(filtered[0].headings, vec!["Spine Surgery"]);
    }

    #[test]
    fn legal_paragraphs_removed() {
        let pages = vec![page(
            "https://x.com/a",
            "T",
            &["Welcome to the practice"],
            &[
                LONG_PARA,
                "Copyright 2024 Example Clinic. All rights reserved worldwide.",
                "Please read our privacy policy before submitting your details.",
                "short",
            ],
        )];
        let filtered = filter_pages(&pages);
        assert_eq!(filtered[0].paragraphs, vec![LONG_PARA.to_string()]);
    }

    #[test]
    fn empty_pages_dropped() {
        let pages = vec![page("https://x.com/a", "T", &["nav"], &["tiny"])];
        assert!(filter_pages(&pages).is_empty());
    }

    #[test]
    fn corpus_contains_page_blocks() {
        let pages = vec![
            page("https://x.com/a", "Alpha", &["Knee Care"], &[LONG_PARA]),
            page("https://x.com/b", "Beta", &["Hip Care"], &[LONG_PARA]),
        ];
        let corpus = build_corpus(&pages);
        assert!(corpus.contains("Page: https://x.com/a"));
        assert!(corpus.contains("Title: Beta"));
        assert!(corpus.contains("Headings:\nKnee Care"));
        assert!(corpus.contains("\n\nPage: https://x.com/b"));
    }
}
