//! Report assembly and export.
//!
//! The assembler turns the completed stages of a session into ordered
//! [`ReportSection`]s; renderers turn sections into bytes. Sections always
//! follow the canonical stage order, whatever order the stages ran in.

mod pdf;

pub use pdf::PdfRenderer;

use serde::Serialize;
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::info;

use crate::error::Result;
use crate::session::SessionState;
use crate::types::{ReportFormat, Stage};

/// One labelled value in a report section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

/// Titled, ordered group of rows; one per completed stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub title: String,
    pub rows: Vec<ReportRow>,
}

/// Collect the completed stages of `session` into report sections.
pub fn assemble_report(session: &SessionState) -> Vec<ReportSection> {
    Stage::iter()
        .filter_map(|stage| session.result(stage))
        .map(|result| ReportSection {
            title: result.stage().heading().to_string(),
            rows: result
                .rows()
                .into_iter()
                .map(|(label, value)| ReportRow { label, value })
                .collect(),
        })
        .collect()
}

/// Turns report sections into a document.
pub trait ReportRenderer {
    fn render(&self, title: &str, sections: &[ReportSection]) -> Result<Vec<u8>>;
}

/// Pretty-printed JSON report
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    sections: &'a [ReportSection],
}

impl ReportRenderer for JsonRenderer {
    fn render(&self, title: &str, sections: &[ReportSection]) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&JsonReport { title, sections })?)
    }
}

/// Renderer for a report format.
pub fn renderer_for(format: ReportFormat) -> Box<dyn ReportRenderer> {
    match format {
        ReportFormat::Pdf => Box::new(PdfRenderer::default()),
        ReportFormat::Json => Box::new(JsonRenderer),
    }
}

/// Render the session's report and write it to `path`.
///
/// Returns the number of bytes written.
pub fn export_report(
    session: &SessionState,
    title: &str,
    format: ReportFormat,
    path: &Path,
) -> Result<usize> {
    let sections = assemble_report(session);
    let bytes = renderer_for(format).render(title, &sections)?;
    std::fs::write(path, &bytes)?;

    info!(
        path = %path.display(),
        %format,
        sections = sections.len(),
        bytes = bytes.len(),
        "Report exported"
    );
    Ok(bytes.len())
}
