//! URL canonicalization for crawl deduplication.
//!
//! Fragments and query strings are client-side or session-specific markers
//! that don't identify distinct pages for our purposes, so they are stripped
//! before a URL enters the frontier. Trailing slashes are trimmed for the
//! same reason (`/about` and `/about/` are the same document on the sites
//! this tool targets).

use url::Url;

/// Canonicalize a raw URL for deduplication.
///
/// Strips the fragment and query string, trims trailing slashes from the
/// path (an emptied path becomes `/`), and rejects anything that is not an
/// absolute http(s) URL with a host.
///
/// Returns `None` for unparseable input; callers drop such links silently.
#[must_use]
pub fn normalize_url(raw: &str) -> Option<String> {
    let mut parsed = Url::parse(raw.trim()).ok()?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    parsed.host_str()?;

    parsed.set_fragment(None);
    parsed.set_query(None);

    let trimmed = parsed.path().trim_end_matches('/').to_string();
    if trimmed.is_empty() {
        parsed.set_path("/");
    } else {
        parsed.set_path(&trimmed);
    }

    Some(parsed.into())
}

/// Host of an absolute URL, if it has one.
#[must_use]
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

/// Registrable-ish domain used as a report label: the host with a leading
/// `www.` removed. Falls back to the input when it doesn't parse.
#[must_use]
pub fn domain_of(url: &str) -> String {
    match host_of(url) {
        Some(host) => host.trim_start_matches("www.").to_string(),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fragment_and_query() {
        assert_eq!(
            normalize_url("https://example.com/about?utm=x#team").as_deref(),
            Some("https://example.com/about")
        );
    }

    #[test]
    fn trims_trailing_slashes() {
        assert_eq!(
            normalize_url("https://example.com/services///").as_deref(),
            Some("https://example.com/services")
        );
    }

    #[test]
    fn empty_path_becomes_root() {
        assert_eq!(
            normalize_url("https://example.com").as_deref(),
            Some("https://example.com/")
        );
        assert_eq!(
            normalize_url("https://example.com/#top").as_deref(),
            Some("https://example.com/")
        );
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert_eq!(normalize_url("mailto:info@example.com"), None);
        assert_eq!(normalize_url("javascript:void(0)"), None);
        assert_eq!(normalize_url("data:text/plain,hi"), None);
    }

    #[test]
    fn rejects_relative_and_garbage() {
        assert_eq!(normalize_url("/about"), None);
        assert_eq!(normalize_url("not a url"), None);
        assert_eq!(normalize_url(""), None);
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in [
            "https://example.com",
            "https://example.com/a/b/?q=1#frag",
            "http://www.example.com/path/",
        ] {
            let once = normalize_url(raw).unwrap();
            assert_eq!(normalize_url(&once).as_deref(), Some(once.as_str()));
        }
    }

    #[test]
    fn domain_of_strips_www() {
        assert_eq!(domain_of("https://www.example.com/x"), "example.com");
        assert_eq!(domain_of("https://clinic.org"), "clinic.org");
        assert_eq!(domain_of("nonsense"), "nonsense");
    }
}
