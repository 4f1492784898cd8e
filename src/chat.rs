//! Conversational Q&A over a stored report.
//!
//! The model gets the generated summary plus the raw per-page crawl data,
//! flattened into one structured context block. Questions are classified
//! by keyword so factual lookups stay grounded in the data while strategic
//! asks (call prep, talking points) may layer sales methodology on top.

use std::fmt::Write as _;

use crate::report::{ChatMessage, ChatOptions, LlmClient, LlmError};
use crate::store::StoredReport;

/// Character budget for the context block; beyond it the data is cut with
/// an explicit truncation notice, mirroring the model's context limits.
pub const MAX_CONTEXT_CHARS: usize = 20_000;

const ANSWER_MAX_TOKENS: u32 = 600;
const ANSWER_TEMPERATURE: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuestionKind {
    /// "what is their phone number" - answer only from the data.
    Factual,
    /// "build me a discovery call cheat sheet" - data plus methodology.
    Strategic,
    /// Everything else.
    General,
}

pub(crate) fn classify_question(question: &str) -> QuestionKind {
    let q = question.to_lowercase();

    let strategic_markers = [
        "cheat sheet",
        "talking points",
        "discovery call",
        "questions to ask",
        "competitive",
        "strategy",
        "approach",
    ];
    if strategic_markers.iter().any(|m| q.contains(m)) {
        return QuestionKind::Strategic;
    }

    let factual_subjects = ["service", "contact", "location", "phone", "address"];
    if q.contains("what") && factual_subjects.iter().any(|m| q.contains(m)) {
        return QuestionKind::Factual;
    }

    QuestionKind::General
}

pub(crate) fn is_services_question(question: &str) -> bool {
    let q = question.to_lowercase();
    ["service", "procedure", "treatment", "offer", "provide"]
        .iter()
        .any(|m| q.contains(m))
}

/// Flatten a stored report into the context block the model reads.
pub(crate) fn build_context(report: &StoredReport) -> String {
    let mut ctx = String::new();
    let _ = writeln!(ctx, "DOMAIN: {}\n", report.domain);
    let _ = writeln!(ctx, "GENERATED REPORT SUMMARY:\n{}\n", report.summary);
    let _ = writeln!(
        ctx,
        "RAW WEBSITE DATA FROM {} PAGES:\n",
        report.pages.len()
    );

    for (i, page) in report.pages.iter().enumerate() {
        let _ = writeln!(ctx, "=== PAGE {}: {} ===", i + 1, page.url);
        let _ = writeln!(
            ctx,
            "TITLE: {}",
            if page.title.is_empty() { "No title" } else { &page.title }
        );
        let _ = writeln!(
            ctx,
            "META DESCRIPTION: {}",
            if page.description.is_empty() {
                "No description"
            } else {
                &page.description
            }
        );

        if !page.headings.is_empty() {
            let _ = writeln!(ctx, "HEADINGS:");
            for h in &page.headings {
                let _ = writeln!(ctx, "- {h}");
            }
        }
        if !page.paragraphs.is_empty() {
            let _ = writeln!(ctx, "CONTENT:");
            for p in &page.paragraphs {
                let _ = writeln!(ctx, "- {p}");
            }
        }
        if !page.lists.is_empty() {
            let _ = writeln!(ctx, "LISTS/SERVICES:");
            for (li, list) in page.lists.iter().enumerate() {
                let _ = writeln!(ctx, "List {}:", li + 1);
                for item in list {
                    let _ = writeln!(ctx, "  - {item}");
                }
            }
        }
        if !page.contact_info.is_empty() {
            let info = &page.contact_info;
            if !info.phones.is_empty() {
                let _ = writeln!(ctx, "PHONE NUMBERS: {}", info.phones.join(", "));
            }
            if !info.emails.is_empty() {
                let _ = writeln!(ctx, "EMAIL ADDRESSES: {}", info.emails.join(", "));
            }
            if !info.addresses.is_empty() {
                let _ = writeln!(ctx, "ADDRESSES:");
                for a in &info.addresses {
                    let _ = writeln!(ctx, "- {a}");
                }
            }
        }
        if !page.tables.is_empty() {
            let _ = writeln!(ctx, "TABLES/STRUCTURED DATA:");
            for (ti, table) in page.tables.iter().enumerate() {
                let _ = writeln!(ctx, "Table {}:", ti + 1);
                for row in table {
                    let _ = writeln!(ctx, "  {}", row.join(" | "));
                }
            }
        }
        ctx.push('\n');
    }

    if ctx.len() > MAX_CONTEXT_CHARS {
        let mut cut = MAX_CONTEXT_CHARS;
        while !ctx.is_char_boundary(cut) {
            cut -= 1;
        }
        ctx.truncate(cut);
        ctx.push_str("\n\n[Note: some page data truncated due to context limits]");
    }

    ctx
}

fn system_prompt(report: &StoredReport) -> String {
    format!(
        r"You are an AI sales assistant answering questions about a specific company's report on {domain}.

DATA USAGE RULES:
1. ALWAYS treat the scraped data below as your primary source of truth.
2. When asked about services, list EVERY service found anywhere in the data: the summary, headings, content, and lists.
3. Cite which page information came from (e.g. 'According to their Services page').
4. For factual questions, use ONLY the provided data; if something is not in the data, say so.
5. For strategic questions, ground every recommendation in the specific company details found here and clearly separate facts from recommendations.

FORMATTING RULES:
- Always answer in markdown.
- Use ## for main sections and ### for subsections.
- Use **bold** for names and key terms.
- Every listed item goes on its own line with a dash (-); never chain items in one line.

AVAILABLE DATA:
{context}",
        domain = report.domain,
        context = build_context(report),
    )
}

fn user_prompt(question: &str, domain: &str) -> String {
    let mut prompt = match classify_question(question) {
        QuestionKind::Factual => format!(
            "Based ONLY on the provided scraped data about {domain}, answer this factual question: {question}"
        ),
        QuestionKind::Strategic => format!(
            "Using the provided scraped data about {domain} as your foundation, create a strategic response to this request: {question}\n\n\
             Ground it in the company's specific details and make it practical and actionable."
        ),
        QuestionKind::General => format!(
            "Using the provided data about {domain} as your primary source, answer this question: {question}"
        ),
    };

    if is_services_question(question) {
        prompt.push_str(
            "\n\nFORMATTING REMINDER FOR SERVICES: group services under ### category headings, \
             one service per line as '- **Service Name** (detail)', and never put several \
             services on the same line.",
        );
    }

    prompt
}

/// Answer a question about a stored report.
pub async fn answer_question(
    client: &LlmClient,
    report: &StoredReport,
    question: &str,
) -> Result<String, LlmError> {
    let messages = [
        ChatMessage::system(system_prompt(report)),
        ChatMessage::user(user_prompt(question, &report.domain)),
    ];
    client
        .chat(
            &messages,
            ChatOptions {
                max_tokens: Some(ANSWER_MAX_TOKENS),
                temperature: Some(ANSWER_TEMPERATURE),
            },
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{ContactInfo, PageRecord};

    fn sample_report() -> StoredReport {
        StoredReport::new(
            "https://clinic.example.com/",
            "PRACTICE OVERVIEW\nA spine practice.".to_string(),
            vec![PageRecord {
                url: "https://clinic.example.com/services".to_string(),
                title: "Services".to_string(),
                description: "What we offer".to_string(),
                headings: vec!["Our Services".to_string()],
                paragraphs: vec!["We treat backs.".to_string()],
                lists: vec![vec!["Spine Surgery".to_string(), "Injections".to_string()]],
                contact_info: ContactInfo {
                    phones: vec!["(555) 123-4567".to_string()],
                    emails: vec![],
                    addresses: vec!["1 Main St, Springfield".to_string()],
                },
                tables: vec![vec![vec!["Hours".to_string(), "9-5".to_string()]]],
            }],
        )
    }

    #[test]
    fn context_includes_all_signal_sections() {
        let ctx = build_context(&sample_report());
        assert!(ctx.contains("DOMAIN: clinic.example.com"));
        assert!(ctx.contains("GENERATED REPORT SUMMARY:"));
        assert!(ctx.contains("=== PAGE 1: https://clinic.example.com/services ==="));
        assert!(ctx.contains("LISTS/SERVICES:"));
        assert!(ctx.contains("  - Spine Surgery"));
        assert!(ctx.contains("PHONE NUMBERS: (555) 123-4567"));
        assert!(ctx.contains("Hours | 9-5"));
    }

    #[test]
    fn oversized_context_is_truncated_with_notice() {
        let mut report = sample_report();
        report.pages[0].paragraphs = vec!["long paragraph text ".repeat(5000)];
        let ctx = build_context(&report);
        assert!(ctx.len() <= MAX_CONTEXT_CHARS + 100);
        assert!(ctx.ends_with("[Note: some page data truncated due to context limits]"));
    }

    #[test]
    fn question_classification() {
        assert_eq!(
            classify_question("What services do they offer?"),
            QuestionKind::Factual
        );
        assert_eq!(
            classify_question("Build me a discovery call cheat sheet"),
            QuestionKind::Strategic
        );
        assert_eq!(
            classify_question("Tell me about the practice"),
            QuestionKind::General
        );
    }

    #[test]
    fn services_detection() {
        assert!(is_services_question("What procedures do they provide?"));
        assert!(!is_services_question("Who is the CEO?"));
    }
}
