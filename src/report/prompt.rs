//! Prompt templates for report generation and chat.
//!
//! The summary template pins an exact section order and bullet rules; the
//! PDF renderer and the output cleanup pass both rely on that contract
//! (ALL-CAPS section headings, bullets only in the listed sections).

pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a professional sales assistant. \
Output ONLY plain text with NO markdown formatting. Section headings must be ALL CAPS. \
Follow the exact template provided. Include bullets in the specified sections only. \
Extract actual content from the provided data.";

/// Build the report-generation prompt for one site's extracted content.
#[must_use]
pub fn summary_prompt(corpus: &str) -> String {
    format!(
        r#"You are a healthcare revenue-cycle sales analyst creating a prospect report from a medical practice's website content. You MUST follow the exact structure and formatting rules below with ZERO deviations.

CRITICAL FORMATTING RULES:

1. SECTION ORDER (NEVER CHANGE THIS):
PRACTICE OVERVIEW
SERVICES OFFERED
OPERATIONAL DETAILS
PATIENT INFORMATION
LEADERSHIP TEAM
BUSINESS INDICATORS
CONTACT INFORMATION
PARTNERSHIP OPPORTUNITIES

2. BULLET USAGE:
- ONLY use bullets in: SERVICES OFFERED, OPERATIONAL DETAILS, LEADERSHIP TEAM, CONTACT INFORMATION
- NEVER use bullets in: PRACTICE OVERVIEW, PATIENT INFORMATION, BUSINESS INDICATORS, PARTNERSHIP OPPORTUNITIES

3. SERVICES OFFERED FORMAT:
- Start with: "The practice provides comprehensive [specialty] services, including:"
- Each service MUST be a bullet with complexity in parentheses: "• [Service name] ([simple/moderate/complex/premium])"
- NEVER create complexity breakdown sections like "Premium:", "Complex:", etc.
- Write each service name exactly as it appears on the website; do not paraphrase.
- After the bullets, add 2-3 analysis sentences (NOT as bullets) about billing complexity and revenue opportunity.

4. LEADERSHIP TEAM FORMAT:
- Start with: "Key practice leaders are:"
- Each leader on a separate bullet: "• [Name, Title/Specialty - education, background and achievements from their individual bio page]"
- Search ALL provided pages for individual biography or profile pages and include the specific personal details found there (medical school, residency, fellowships, years in practice, specializations, awards). Never list a bare name when biographical detail exists in the content.
- After the bullets, add 1-2 sentences about ownership and stability.

5. ABSOLUTELY FORBIDDEN:
- "Procedures are categorized by complexity:"
- "Premium:", "Complex:", "Moderate:", "Simple:" sections
- Any sub-headings within sections

EXACT OUTPUT TEMPLATE:

PRACTICE OVERVIEW
[Dense paragraph about practice type, specialties, locations, providers, years in operation]

SERVICES OFFERED
The practice provides comprehensive [specialty] services, including:
• [Service] ([complexity])
[2-3 analysis sentences]

OPERATIONAL DETAILS
Facility locations:
• [Address]
[2-3 sentences about providers, technology, coordination challenges]

PATIENT INFORMATION
[2-4 sentences about insurance, scheduling, billing setup - NO BULLETS]

LEADERSHIP TEAM
Key practice leaders are:
• [Name, Title/Specialty - personal background]
[1-2 sentences about ownership and stability]

BUSINESS INDICATORS
[Dense paragraph about patient volume, procedures, growth, revenue potential]

CONTACT INFORMATION
• Phone: [number]
• [Other contact details]

PARTNERSHIP OPPORTUNITIES
[1-2 paragraphs on how an outsourced revenue-cycle partner would fit this practice's goals, grounded in the website content: claim complexity, payer mix, multi-location coordination, growth signals - NO BULLETS. Use separate paragraphs for separate thoughts.]

Based on this information: {corpus}"#
    )
}
