//! BDs Calculator Library
//!
//! Affiliate commission, break-even and ROI formulas, the session that carries
//! results between calculator stages, and PDF/JSON report export.

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod input;
pub mod report;
pub mod session;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use config::CalculatorConfig;
pub use engine::{Calculator, StageRequest, StageResult};
pub use error::{CalcError, Result};
pub use format::parse_number_or_default;
pub use report::{ReportSection, assemble_report, export_report};
pub use session::SessionState;
pub use types::{BreakEvenFormula, ReportFormat, RoiFormula, Stage};
