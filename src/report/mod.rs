//! Report generation: corpus assembly, LLM summarization, output cleanup
//! and PDF rendering.

pub mod builder;
pub mod llm;
pub mod pdf;
pub mod prompt;

pub use builder::{build_corpus, filter_pages, FilteredPage};
pub use llm::{ChatMessage, ChatOptions, LlmClient, LlmError};
pub use pdf::render_pdf;

use once_cell::sync::Lazy;
use regex::Regex;

use prompt::{summary_prompt, SUMMARY_SYSTEM_PROMPT};

/// Generate the sales report text for a site's extracted content.
///
/// Runs the summary prompt, then the deterministic cleanup pass — the
/// model is told not to produce complexity-breakdown blocks, but told
/// isn't the same as doesn't.
pub async fn summarize_site(client: &LlmClient, corpus: &str) -> Result<String, LlmError> {
    let messages = [
        ChatMessage::system(SUMMARY_SYSTEM_PROMPT),
        ChatMessage::user(summary_prompt(corpus)),
    ];
    let raw = client.chat(&messages, ChatOptions::default()).await?;
    Ok(clean_summary(&raw))
}

/// Forbidden complexity-breakdown blocks; each runs to the next anchor,
/// which is restored by the `$1` capture.
static FORBIDDEN_BLOCKS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)Procedures are categorized by complexity:.*?(OPERATIONAL DETAILS|$)",
        r"(?is)• Premium:.*?(• Complex:|• Moderate:|• Simple:|OPERATIONAL DETAILS|$)",
        r"(?is)• Complex:.*?(• Moderate:|• Simple:|OPERATIONAL DETAILS|$)",
        r"(?is)• Moderate:.*?(• Simple:|OPERATIONAL DETAILS|$)",
        r"(?is)• Simple:.*?(OPERATIONAL DETAILS|$)",
        r"(?is)The patient population includes.*?(OPERATIONAL DETAILS|PATIENT INFORMATION|LEADERSHIP TEAM|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid cleanup pattern"))
    .collect()
});

static STRAY_LABELS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)Billing Complexity Analysis:",
        r"(?i)Enhanced Services Analysis:",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid cleanup pattern"))
    .collect()
});

/// `*name*` -> `**name**`, so the PDF renderer's bold detection fires.
static SINGLE_EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").expect("valid cleanup pattern"));

/// Deterministic cleanup of model output.
#[must_use]
pub fn clean_summary(raw: &str) -> String {
    let mut text = raw.trim().to_string();

    for pattern in FORBIDDEN_BLOCKS.iter() {
        text = pattern.replace_all(&text, "$1").into_owned();
    }
    for pattern in STRAY_LABELS.iter() {
        text = pattern.replace_all(&text, "").into_owned();
    }

    text = SINGLE_EMPHASIS.replace_all(&text, "**$1**").into_owned();

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_breakdown_block_is_stripped() {
        let raw = "SERVICES OFFERED\n\
                   • Spine Surgery (complex)\n\
                   Procedures are categorized by complexity:\n\
                   Premium: spine fusion\n\
                   OPERATIONAL DETAILS\nFacility locations:";
        let cleaned = clean_summary(raw);
        assert!(!cleaned.contains("categorized by complexity"));
        assert!(!cleaned.contains("Premium: spine fusion"));
        assert!(cleaned.contains("OPERATIONAL DETAILS"));
        assert!(cleaned.contains("• Spine Surgery (complex)"));
    }

    #[test]
    fn stray_labels_removed() {
        let cleaned = clean_summary("Billing Complexity Analysis: none\nreal content");
        assert!(!cleaned.contains("Billing Complexity Analysis:"));
        assert!(cleaned.contains("real content"));
    }

    #[test]
    fn single_emphasis_promoted_to_bold() {
        assert_eq!(
            clean_summary("Led by *Dr. Jane Smith* since 2003."),
            "Led by **Dr. Jane Smith** since 2003."
        );
    }

    #[test]
    fn clean_text_passes_through() {
        let text = "PRACTICE OVERVIEW\nA three-location orthopedic group.";
        assert_eq!(clean_summary(text), text);
    }
}
