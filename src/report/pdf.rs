//! Minimal PDF 1.4 writer for calculator reports.
//!
//! Uses the standard Helvetica fonts (no embedding), A4 portrait pages and a
//! single top-down layout pass: before each line the remaining height is
//! checked and a new page is started when the line would cross the bottom
//! margin.

use std::fmt::Write as _;

use super::{ReportRenderer, ReportSection};
use crate::error::Result;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;
const LINE_HEIGHT: f32 = 16.0;
const TITLE_SIZE: f32 = 18.0;
const SECTION_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 11.0;

/// Message printed when there is nothing to report.
pub const EMPTY_REPORT_TEXT: &str = "No calculations completed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(&self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }
}

/// Renders report sections as a paginated PDF document.
#[derive(Debug, Clone, Copy)]
pub struct PdfRenderer {
    /// x offset of the value column, from the left page edge
    pub value_column: f32,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self { value_column: 330.0 }
    }
}

/// Accumulates page content streams while tracking the cursor.
struct Layout {
    pages: Vec<String>,
    current: String,
    y: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: String::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Move the cursor down by `height`, breaking the page when it would not fit.
    fn advance(&mut self, height: f32) {
        if self.y - height < MARGIN {
            self.pages.push(std::mem::take(&mut self.current));
            self.y = PAGE_HEIGHT - MARGIN;
        }
        self.y -= height;
    }

    fn text(&mut self, font: Font, size: f32, x: f32, text: &str) {
        let _ = writeln!(
            self.current,
            "BT /{} {} Tf {:.2} {:.2} Td ({}) Tj ET",
            font.resource(),
            size,
            x,
            self.y,
            escape(text)
        );
    }

    fn finish(mut self) -> Vec<String> {
        self.pages.push(self.current);
        self.pages
    }
}

/// Escape a string for a PDF literal; non-ASCII becomes `?`.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

impl PdfRenderer {
    fn layout(&self, title: &str, sections: &[ReportSection]) -> Vec<String> {
        let mut layout = Layout::new();

        layout.advance(TITLE_SIZE + 4.0);
        layout.text(Font::Bold, TITLE_SIZE, MARGIN, title);

        if sections.is_empty() {
            layout.advance(LINE_HEIGHT * 2.0);
            layout.text(Font::Regular, BODY_SIZE, MARGIN, EMPTY_REPORT_TEXT);
        }

        for section in sections {
            layout.advance(LINE_HEIGHT * 2.0);
            layout.text(Font::Bold, SECTION_SIZE, MARGIN, &section.title);

            for row in &section.rows {
                layout.advance(LINE_HEIGHT);
                layout.text(Font::Regular, BODY_SIZE, MARGIN, &row.label);
                layout.text(Font::Regular, BODY_SIZE, self.value_column, &row.value);
            }
        }

        layout.finish()
    }
}

impl ReportRenderer for PdfRenderer {
    fn render(&self, title: &str, sections: &[ReportSection]) -> Result<Vec<u8>> {
        let pages = self.layout(title, sections);

        // 1 catalog, 2 page tree, 3-4 fonts, then a (page, content) pair per page
        let page_id = |i: usize| 5 + 2 * i;
        let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", page_id(i))).collect();

        let mut objects: Vec<String> = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                pages.len()
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>".to_string(),
        ];

        for (i, content) in pages.iter().enumerate() {
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                PAGE_WIDTH,
                PAGE_HEIGHT,
                page_id(i) + 1
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{}endstream",
                content.len(),
                content
            ));
        }

        let mut out = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            let _ = write!(out, "{} 0 obj\n{}\nendobj\n", i + 1, body);
        }

        let xref_offset = out.len();
        let _ = write!(out, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in &offsets {
            let _ = write!(out, "{:010} 00000 n \n", offset);
        }
        let _ = write!(
            out,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        );

        Ok(out.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportRow;

    fn page_count(pdf: &str) -> usize {
        pdf.matches("/Type /Page ").count()
    }

    fn rows(n: usize) -> Vec<ReportRow> {
        (0..n)
            .map(|i| ReportRow {
                label: format!("Row {}", i),
                value: format!("{}.00", i),
            })
            .collect()
    }

    #[test]
    fn test_document_structure() {
        let sections = vec![ReportSection {
            title: "ROI Calculation".to_string(),
            rows: rows(3),
        }];
        let bytes = PdfRenderer::default().render("Report", &sections).unwrap();
        let pdf = String::from_utf8(bytes).unwrap();

        assert!(pdf.starts_with("%PDF-1.4\n"));
        assert!(pdf.ends_with("%%EOF\n"));
        assert!(pdf.contains("/Count 1"));
        assert!(pdf.contains("(ROI Calculation) Tj"));
        assert!(pdf.contains("(Row 2) Tj"));
        assert_eq!(page_count(&pdf), 1);
    }

    #[test]
    fn test_empty_report_still_has_a_page() {
        let bytes = PdfRenderer::default().render("Report", &[]).unwrap();
        let pdf = String::from_utf8(bytes).unwrap();
        assert_eq!(page_count(&pdf), 1);
        assert!(pdf.contains(EMPTY_REPORT_TEXT));
    }

    #[test]
    fn test_long_report_breaks_pages() {
        let sections = vec![ReportSection {
            title: "Many".to_string(),
            rows: rows(120),
        }];
        let bytes = PdfRenderer::default().render("Report", &sections).unwrap();
        let pdf = String::from_utf8(bytes).unwrap();
        assert!(page_count(&pdf) >= 3);
        assert!(pdf.contains("(Row 119) Tj"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let bytes = PdfRenderer::default().render("Report", &[]).unwrap();
        let pdf = String::from_utf8(bytes).unwrap();

        let xref_start = pdf.find("xref\n").unwrap();
        let first_entry = pdf[xref_start..].lines().nth(3).unwrap();
        let offset: usize = first_entry[..10].parse().unwrap();
        assert!(pdf[offset..].starts_with("1 0 obj"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("ROI (%)"), "ROI \\(%\\)");
        assert_eq!(escape("a\\b"), "a\\\\b");
        assert_eq!(escape("€5"), "?5");
    }
}
