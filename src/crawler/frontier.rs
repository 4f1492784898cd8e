//! Crawl frontier: the not-yet-fetched URL queues and their bookkeeping.
//!
//! All crawl state lives on a [`Frontier`] instance owned by the
//! orchestrator for the duration of one crawl; nothing is shared or
//! locked. The orchestrator only mutates it between batches, so multiple
//! independent crawls can run in one process without coordination.

use std::collections::{HashSet, VecDeque};

use crate::crawler::classifier::classify;
use crate::extractor::DiscoveredLink;
use crate::utils::{host_of, normalize_url};

/// One scheduled URL. Created at discovery, consumed exactly once when the
/// orchestrator pulls it into a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,
    pub depth: u32,
}

/// Crawl state: visited/queued sets plus the two scheduling queues.
///
/// Invariants:
/// - a URL is handed out for fetching at most once (`visited` gate);
/// - a URL is scheduled at most once even when several pages link to it
///   (`queued` gate);
/// - `visited.len()` never exceeds the page budget.
#[derive(Debug)]
pub struct Frontier {
    host: String,
    max_depth: u32,
    max_pages: usize,
    /// URLs whose fetch has been attempted. Grows monotonically.
    visited: HashSet<String>,
    /// URLs ever placed on either queue. Grows monotonically.
    queued: HashSet<String>,
    /// Physician and service candidates. Physician links enter at the
    /// front, service links at the back, so a physician bio discovered
    /// late still leapfrogs earlier service pages within a wave.
    priority: VecDeque<FrontierEntry>,
    regular: VecDeque<FrontierEntry>,
}

impl Frontier {
    /// Seed a frontier at depth 0. Fails if the seed URL doesn't normalize
    /// to an absolute http(s) URL with a host.
    pub fn new(start_url: &str, max_depth: u32, max_pages: usize) -> Option<Self> {
        let seed = normalize_url(start_url)?;
        let host = host_of(&seed)?;

        let mut queued = HashSet::new();
        queued.insert(seed.clone());

        let mut regular = VecDeque::new();
        regular.push_back(FrontierEntry { url: seed, depth: 0 });

        Some(Self {
            host,
            max_depth,
            max_pages,
            visited: HashSet::new(),
            queued,
            priority: VecDeque::new(),
            regular,
        })
    }

    /// Host the crawl is pinned to; links elsewhere are never enqueued.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// True once both queues are drained or the page budget is spent.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.visited.len() >= self.max_pages
            || (self.priority.is_empty() && self.regular.is_empty())
    }

    /// Schedule the links discovered on a page fetched at `current_depth`.
    ///
    /// Each link is normalized, then gated: drop on failed normalization,
    /// already visited, already queued, depth past the limit, or a foreign
    /// host. Survivors are classified and routed — physician links to the
    /// front of the priority queue, service links to its back, the rest to
    /// the regular queue.
    pub fn enqueue(&mut self, links: &[DiscoveredLink], current_depth: u32) {
        let depth = current_depth + 1;
        if depth > self.max_depth {
            return;
        }

        for link in links {
            let Some(url) = normalize_url(&link.url) else {
                continue;
            };
            if self.visited.contains(&url) || self.queued.contains(&url) {
                continue;
            }
            if host_of(&url).as_deref() != Some(self.host.as_str()) {
                continue;
            }

            self.queued.insert(url.clone());
            let entry = FrontierEntry { url, depth };

            let class = classify(&entry.url, &link.text);
            if class.physician {
                self.priority.push_front(entry);
            } else if class.service {
                self.priority.push_back(entry);
            } else {
                self.regular.push_back(entry);
            }
        }
    }

    /// Pull the next batch, priority queue first, respecting the page
    /// budget. Every entry handed out is recorded as visited — visited
    /// means "fetch attempted", and entries are never re-queued.
    pub fn next_batch(&mut self, size: usize) -> Vec<FrontierEntry> {
        let mut batch = Vec::with_capacity(size);

        while batch.len() < size && self.visited.len() < self.max_pages {
            let Some(entry) = self.priority.pop_front().or_else(|| self.regular.pop_front())
            else {
                break;
            };
            if !self.visited.insert(entry.url.clone()) {
                continue;
            }
            batch.push(entry);
        }

        batch
    }
}
