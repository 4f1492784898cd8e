//! Heuristic link classification.
//!
//! Candidate links are labeled from their URL and anchor text so the
//! frontier can fetch high-value pages (clinician bios, service pages)
//! before ordinary ones. The rule sets are data: ordered tables of
//! predicates evaluated with short-circuit semantics, exclusions first.
//! Exclusion-first ordering keeps things like `/contact/dr-smith-reviews`
//! from being scheduled as a physician bio.

use once_cell::sync::Lazy;
use regex::Regex;

/// Classification flags for one candidate link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageClass {
    pub physician: bool,
    pub service: bool,
}

impl PageClass {
    #[must_use]
    pub fn is_ordinary(self) -> bool {
        !self.physician && !self.service
    }
}

/// Path substrings that disqualify a URL outright, whatever else matches.
const EXCLUDED_PATH_PARTS: &[&str] = &[
    "privacy",
    "policy",
    "terms",
    "disclaimer",
    "contact",
    "appointment",
    "schedule",
    "forms",
    "insurance",
    "billing",
    "payment",
    "news",
    "blog",
    "events",
    "gallery",
    "testimonial",
    "review",
    "login",
    "logout",
    "signin",
    "sign-in",
    "signup",
    "sign-up",
    "register",
    "account",
    "portal",
    "cart",
    "checkout",
    "careers",
    "sitemap",
    "search",
    "faq",
    "cookie",
];

/// File extensions that mark non-page resources.
const EXCLUDED_EXTENSIONS: &[&str] = &[
    ".pdf", ".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".ico", ".css", ".js", ".json",
    ".xml", ".zip", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".mp3", ".mp4", ".mov",
    ".avi", ".woff", ".woff2", ".ttf",
];

/// URL substrings that indicate a clinician profile page.
const PHYSICIAN_PATH_PARTS: &[&str] = &[
    "/doctor",
    "/physician",
    "/provider",
    "/surgeon",
    "/specialist",
    "/dr-",
    "/team/",
    "/our-team",
    "/meet-",
    "/staff",
    "/bio/",
    "/bios/",
    "/profile/",
    "/faculty",
];

/// `first-last-md` style slugs: a hyphenated name ending in a medical title.
static NAME_WITH_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/[a-z]+-[a-z]+(?:-[a-z]+)?-(?:md|do|dds|dpm)(?:/|$)").expect("valid regex")
});

/// `dr-first-last` style slugs.
static DR_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/dr-[a-z]+(?:-[a-z]+)+(?:/|$)").expect("valid regex"));

/// Whole-word physician markers in anchor text.
static PHYSICIAN_TEXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z])(?:dr\.|md|physicians?)(?:[^a-z]|$)").expect("valid regex")
});

/// Strong medical-service keywords in the URL.
const SERVICE_KEYWORDS: &[&str] = &[
    "surgery",
    "surgical",
    "orthopedic",
    "orthopaedic",
    "therapy",
    "rehabilitation",
    "rehab",
    "imaging",
    "mri",
    "x-ray",
    "xray",
    "ultrasound",
    "injection",
    "arthroscopy",
    "replacement",
    "pain-management",
    "sports-medicine",
    "chiropractic",
    "acupuncture",
    "regenerative",
    "cardiology",
    "dermatology",
    "neurology",
    "oncology",
    "pediatric",
    "podiatry",
    "urgent-care",
];

/// Path segments that host service content, including body-part pages.
const SERVICE_PATH_PARTS: &[&str] = &[
    "/services",
    "/treatments",
    "/procedures",
    "/conditions",
    "/specialties",
    "/specialities",
    "/care/",
    "/what-we-treat",
    "/knee",
    "/hip",
    "/shoulder",
    "/spine",
    "/back",
    "/neck",
    "/ankle",
    "/foot",
    "/hand",
    "/wrist",
    "/elbow",
];

/// Medical terms that flag a service page from short anchor text.
const SERVICE_TEXT_TERMS: &[&str] = &[
    "surgery",
    "treatment",
    "therapy",
    "replacement",
    "injection",
    "arthroscopy",
    "imaging",
    "rehabilitation",
    "sports medicine",
    "pain management",
    "joint",
    "spine",
    "orthopedic",
];

/// One classification rule: URL (lowercased) and anchor text in, verdict out.
type Rule = fn(&str, &str) -> bool;

const EXCLUSION_RULES: &[Rule] = &[url_has_excluded_segment, url_has_excluded_extension];
const PHYSICIAN_RULES: &[Rule] = &[
    url_has_physician_segment,
    url_matches_name_pattern,
    text_mentions_physician,
];
const SERVICE_RULES: &[Rule] = &[
    url_has_service_keyword,
    url_has_service_segment,
    text_has_medical_term,
];

/// Classify a candidate link.
///
/// Exclusions win over everything; physician signals are evaluated before
/// service signals because clinician bios are the highest-value pages for
/// the downstream report.
#[must_use]
pub fn classify(url: &str, link_text: &str) -> PageClass {
    let url = url.to_lowercase();

    if EXCLUSION_RULES.iter().any(|rule| rule(&url, link_text)) {
        return PageClass::default();
    }

    let physician = PHYSICIAN_RULES.iter().any(|rule| rule(&url, link_text));
    let service = !physician && SERVICE_RULES.iter().any(|rule| rule(&url, link_text));

    PageClass { physician, service }
}

fn path_of(url: &str) -> &str {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    without_scheme.find('/').map_or("", |i| &without_scheme[i..])
}

pub(crate) fn url_has_excluded_segment(url: &str, _text: &str) -> bool {
    let path = path_of(url);
    EXCLUDED_PATH_PARTS.iter().any(|part| path.contains(part))
}

pub(crate) fn url_has_excluded_extension(url: &str, _text: &str) -> bool {
    EXCLUDED_EXTENSIONS.iter().any(|ext| url.ends_with(ext))
}

pub(crate) fn url_has_physician_segment(url: &str, _text: &str) -> bool {
    PHYSICIAN_PATH_PARTS.iter().any(|part| url.contains(part))
}

pub(crate) fn url_matches_name_pattern(url: &str, _text: &str) -> bool {
    NAME_WITH_TITLE_RE.is_match(url) || DR_NAME_RE.is_match(url)
}

pub(crate) fn text_mentions_physician(_url: &str, text: &str) -> bool {
    PHYSICIAN_TEXT_RE.is_match(text)
}

pub(crate) fn url_has_service_keyword(url: &str, _text: &str) -> bool {
    SERVICE_KEYWORDS.iter().any(|kw| url.contains(kw))
}

pub(crate) fn url_has_service_segment(url: &str, _text: &str) -> bool {
    SERVICE_PATH_PARTS.iter().any(|part| url.contains(part))
}

pub(crate) fn text_has_medical_term(_url: &str, text: &str) -> bool {
    if text.len() >= 100 {
        return false;
    }
    let text = text.to_lowercase();
    SERVICE_TEXT_TERMS.iter().any(|term| text.contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physician_url_segments() {
        assert!(classify("https://x.com/doctors/jane-smith", "").physician);
        assert!(classify("https://x.com/our-team/", "").physician);
        assert!(classify("https://x.com/providers/a-b", "").physician);
    }

    #[test]
    fn physician_name_patterns() {
        assert!(classify("https://x.com/jane-smith-md", "").physician);
        assert!(classify("https://x.com/people/john-q-doe-dpm", "").physician);
        assert!(classify("https://x.com/dr-jane-smith", "").physician);
        assert!(!classify("https://x.com/mdx-program", "").physician);
    }

    #[test]
    fn physician_link_text() {
        assert!(classify("https://x.com/p1", "Dr. Jane Smith").physician);
        assert!(classify("https://x.com/p1", "Jane Smith, MD").physician);
        assert!(classify("https://x.com/p1", "Our physicians").physician);
        assert!(!classify("https://x.com/p1", "command line").physician);
    }

    #[test]
    fn service_detection() {
        let class = classify("https://x.com/services/knee-replacement", "");
        assert!(class.service);
        assert!(!class.physician);
        assert!(classify("https://x.com/spine-surgery", "").service);
        assert!(classify("https://x.com/p2", "Knee replacement surgery").service);
    }

    #[test]
    fn long_link_text_does_not_flag_service() {
        let text = "a".repeat(90) + " surgery facts";
        assert!(!classify("https://x.com/p2", &text).service);
    }

    #[test]
    fn exclusions_beat_positive_signals() {
        // Would match the dr- name pattern without the exclusion gate.
        let class = classify("https://x.com/contact/dr-smith-reviews", "Dr. Smith");
        assert!(class.is_ordinary());

        assert!(classify("https://x.com/blog/spine-surgery", "").is_ordinary());
        assert!(classify("https://x.com/privacy", "").is_ordinary());
        assert!(classify("https://x.com/team/photo.jpg", "").is_ordinary());
    }

    #[test]
    fn physician_outranks_service() {
        // Matches both rule families; physician wins, service stays false.
        let class = classify("https://x.com/doctors/spine-surgeon-jane", "");
        assert!(class.physician);
        assert!(!class.service);
    }

    #[test]
    fn excluded_segment_only_checks_path() {
        // "contact" in the host must not exclude the page.
        assert!(!url_has_excluded_segment("https://contact-clinic.com/doctors", ""));
        assert!(url_has_excluded_segment("https://x.com/contact-us", ""));
    }

    #[test]
    fn ordinary_pages_stay_ordinary() {
        assert!(classify("https://x.com/about", "About Us").is_ordinary());
        assert!(classify("https://x.com/", "Home").is_ordinary());
    }
}
