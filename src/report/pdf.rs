//! PDF rendering of the generated report.
//!
//! Line-by-line text layout, no more: ALL-CAPS lines become section
//! headings, bullet lines and body lines are set in the text size, blank
//! lines add breathing room. Long lines wrap on a character budget and
//! the cursor starts a fresh page when it runs off the bottom margin.

use anyhow::{Context, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 17.6;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 11.0;

const BODY_LINE_MM: f32 = 5.2;
const HEADING_GAP_MM: f32 = 5.3;
const BLANK_GAP_MM: f32 = 2.8;
const BULLET_GAP_MM: f32 = 1.4;
const PARAGRAPH_GAP_MM: f32 = 2.8;

/// Character budget per wrapped line at body size; headings get less.
const BODY_WRAP_CHARS: usize = 95;
const HEADING_WRAP_CHARS: usize = 55;

/// Render the report summary into a PDF document, returned as bytes.
pub fn render_pdf(title: &str, summary: &str) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .context("failed to register body font")?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .context("failed to register heading font")?;

    let mut writer = PageWriter {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        cursor_mm: PAGE_HEIGHT_MM - MARGIN_MM,
    };

    // Centered-ish document title; a text layout engine this is not.
    let title_indent = (PAGE_WIDTH_MM - title.len() as f32 * TITLE_SIZE * 0.17) / 2.0;
    writer.write_line(title, TITLE_SIZE, title_indent.max(MARGIN_MM), &bold);
    writer.advance(HEADING_GAP_MM);

    for line in summary.lines() {
        let line = line.trim().replace("**", "");
        if line.is_empty() {
            writer.advance(BLANK_GAP_MM);
        } else if is_section_heading(&line) {
            writer.advance(HEADING_GAP_MM);
            for wrapped in wrap_line(&line, HEADING_WRAP_CHARS) {
                writer.write_line(&wrapped, HEADING_SIZE, MARGIN_MM, &bold);
                writer.advance(HEADING_GAP_MM + 1.0);
            }
        } else if line.starts_with('•') || line.starts_with("- ") {
            for wrapped in wrap_line(&line, BODY_WRAP_CHARS) {
                writer.write_line(&wrapped, BODY_SIZE, MARGIN_MM, &regular);
                writer.advance(BODY_LINE_MM);
            }
            writer.advance(BULLET_GAP_MM);
        } else {
            for wrapped in wrap_line(&line, BODY_WRAP_CHARS) {
                writer.write_line(&wrapped, BODY_SIZE, MARGIN_MM, &regular);
                writer.advance(BODY_LINE_MM);
            }
            writer.advance(PARAGRAPH_GAP_MM);
        }
    }

    drop(writer);
    doc.save_to_bytes().context("failed to serialize PDF")
}

struct PageWriter<'a> {
    doc: &'a printpdf::PdfDocumentReference,
    layer: PdfLayerReference,
    cursor_mm: f32,
}

impl PageWriter<'_> {
    fn write_line(&mut self, text: &str, size: f32, x_mm: f32, font: &IndirectFontRef) {
        if self.cursor_mm < MARGIN_MM + BODY_LINE_MM {
            self.new_page();
        }
        self.layer
            .use_text(text, size, Mm(x_mm), Mm(self.cursor_mm), font);
    }

    fn advance(&mut self, by_mm: f32) {
        self.cursor_mm -= by_mm;
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;
    }
}

/// A section heading is an ALL-CAPS line longer than five characters.
fn is_section_heading(line: &str) -> bool {
    line.len() > 5
        && line
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_whitespace())
}

/// Greedy word wrap on a character budget. Words longer than the budget
/// get a line of their own rather than being split.
fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_detection() {
        assert!(is_section_heading("PRACTICE OVERVIEW"));
        assert!(is_section_heading("SERVICES OFFERED"));
        assert!(!is_section_heading("CAPS")); // too short
        assert!(!is_section_heading("Practice Overview"));
        assert!(!is_section_heading("• BULLET LINE"));
    }

    #[test]
    fn wrap_respects_budget() {
        let wrapped = wrap_line("one two three four five", 9);
        assert_eq!(wrapped, vec!["one two", "three", "four five"]);
        for line in &wrapped {
            assert!(line.len() <= 9);
        }
    }

    #[test]
    fn wrap_keeps_short_lines_whole() {
        assert_eq!(wrap_line("short line", 95), vec!["short line"]);
    }

    #[test]
    fn oversized_word_gets_own_line() {
        let wrapped = wrap_line("a superlongunbreakableword b", 10);
        assert_eq!(wrapped, vec!["a", "superlongunbreakableword", "b"]);
    }

    #[test]
    fn renders_a_pdf_document() {
        let summary = "PRACTICE OVERVIEW\nA busy orthopedic group.\n\nSERVICES OFFERED\n• Spine Surgery (complex)\n• Joint Replacement (complex)";
        let bytes = render_pdf("Site Report", summary).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn long_reports_paginate() {
        let mut summary = String::from("PRACTICE OVERVIEW\n");
        for i in 0..200 {
            summary.push_str(&format!("Paragraph number {i} with enough words to occupy a rendered line of output.\n"));
        }
        let bytes = render_pdf("Site Report", &summary).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
