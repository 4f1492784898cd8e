//! Frontier scheduling behavior: dedup, budgets, priority ordering.

use leadscout::crawler::Frontier;
use leadscout::extractor::DiscoveredLink;

fn link(url: &str, text: &str) -> DiscoveredLink {
    DiscoveredLink {
        url: url.to_string(),
        text: text.to_string(),
    }
}

#[test]
fn seed_is_normalized_and_scheduled_once() {
    let mut frontier = Frontier::new("https://example.com", 3, 10).unwrap();
    assert_eq!(frontier.host(), "example.com");

    let batch = frontier.next_batch(5);
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].url, "https://example.com/");
    assert_eq!(batch[0].depth, 0);

    // Single page, no outbound links: the crawl is over.
    assert!(frontier.is_exhausted());
    assert!(frontier.next_batch(5).is_empty());
    assert_eq!(frontier.visited_count(), 1);
}

#[test]
fn invalid_seed_is_rejected() {
    assert!(Frontier::new("not a url", 3, 10).is_none());
    assert!(Frontier::new("mailto:a@b.com", 3, 10).is_none());
}

#[test]
fn physician_link_is_scheduled_before_ordinary() {
    let mut frontier = Frontier::new("https://example.com/", 3, 10).unwrap();
    frontier.next_batch(1); // consume the seed

    frontier.enqueue(
        &[
            link("https://example.com/about", "About"),
            link("https://example.com/doctors/jane-smith-md", "Dr. Jane Smith"),
        ],
        0,
    );

    let batch = frontier.next_batch(1);
    assert_eq!(batch[0].url, "https://example.com/doctors/jane-smith-md");
    let batch = frontier.next_batch(1);
    assert_eq!(batch[0].url, "https://example.com/about");
}

#[test]
fn batch_order_is_physician_then_service_then_ordinary() {
    let mut frontier = Frontier::new("https://example.com/", 3, 10).unwrap();
    frontier.next_batch(1);

    frontier.enqueue(
        &[
            link("https://example.com/about", "About"),
            link("https://example.com/services/knee-replacement", "Knee"),
            link("https://example.com/doctors/jane-smith-md", "Dr. Smith"),
        ],
        0,
    );

    let batch = frontier.next_batch(5);
    let urls: Vec<&str> = batch.iter().map(|e| e.url.as_str()).collect();
    assert_eq!(
        urls,
        [
            "https://example.com/doctors/jane-smith-md",
            "https://example.com/services/knee-replacement",
            "https://example.com/about",
        ]
    );
}

#[test]
fn late_physician_discovery_leapfrogs_earlier_service_links() {
    let mut frontier = Frontier::new("https://example.com/", 3, 10).unwrap();
    frontier.next_batch(1);

    frontier.enqueue(&[link("https://example.com/services/spine-surgery", "")], 0);
    frontier.enqueue(&[link("https://example.com/dr-john-doe", "")], 0);

    let batch = frontier.next_batch(2);
    assert_eq!(batch[0].url, "https://example.com/dr-john-doe");
    assert_eq!(batch[1].url, "https://example.com/services/spine-surgery");
}

#[test]
fn duplicate_urls_are_enqueued_once() {
    let mut frontier = Frontier::new("https://example.com/", 3, 10).unwrap();
    frontier.next_batch(1);

    // Two pages link to the same third URL, in assorted spellings.
    frontier.enqueue(&[link("https://example.com/shared", "")], 0);
    frontier.enqueue(
        &[
            link("https://example.com/shared/", ""),
            link("https://example.com/shared#section", ""),
            link("https://example.com/shared?utm=x", ""),
        ],
        0,
    );

    let batch = frontier.next_batch(10);
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].url, "https://example.com/shared");
}

#[test]
fn cross_host_links_are_never_enqueued() {
    let mut frontier = Frontier::new("https://example.com/", 3, 10).unwrap();
    frontier.next_batch(1);

    frontier.enqueue(
        &[
            link("https://other.com/page", ""),
            link("https://sub.example.com/page", ""),
            link("https://example.com/ours", ""),
        ],
        0,
    );

    let batch = frontier.next_batch(10);
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].url, "https://example.com/ours");
}

#[test]
fn depth_limit_is_respected() {
    let mut frontier = Frontier::new("https://example.com/", 1, 10).unwrap();
    frontier.next_batch(1);

    frontier.enqueue(&[link("https://example.com/depth1", "")], 0);
    let batch = frontier.next_batch(1);
    assert_eq!(batch[0].depth, 1);

    // Links found at depth 1 would land at depth 2, past the limit.
    frontier.enqueue(&[link("https://example.com/depth2", "")], 1);
    assert!(frontier.next_batch(1).is_empty());
    assert!(frontier.is_exhausted());
}

#[test]
fn malformed_links_are_dropped_silently() {
    let mut frontier = Frontier::new("https://example.com/", 3, 10).unwrap();
    frontier.next_batch(1);

    frontier.enqueue(
        &[
            link("::::", ""),
            link("javascript:void(0)", ""),
            link("", ""),
        ],
        0,
    );
    assert!(frontier.is_exhausted());
}

#[test]
fn page_budget_caps_visited_count() {
    let mut frontier = Frontier::new("https://example.com/", 3, 5).unwrap();
    frontier.next_batch(5);

    let links: Vec<DiscoveredLink> = (0..50)
        .map(|i| link(&format!("https://example.com/page-{i}"), ""))
        .collect();
    frontier.enqueue(&links, 0);

    let mut total = 1; // seed
    loop {
        let batch = frontier.next_batch(5);
        if batch.is_empty() {
            break;
        }
        total += batch.len();
    }

    assert_eq!(total, 5);
    assert_eq!(frontier.visited_count(), 5);
    assert!(frontier.is_exhausted());
}

#[test]
fn visited_urls_are_not_rescheduled() {
    let mut frontier = Frontier::new("https://example.com/", 3, 10).unwrap();
    let seed = frontier.next_batch(1);

    // A page linking back to the seed must not cause a second fetch.
    frontier.enqueue(&[link(&seed[0].url, "Home")], 0);
    assert!(frontier.next_batch(5).is_empty());
    assert_eq!(frontier.visited_count(), 1);
}
