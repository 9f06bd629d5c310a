//! Calculator configuration and form option lists.
//!
//! The configuration selects the fee rate, the commission ceiling and which
//! formula variants are in effect. It can be saved to and loaded from JSON.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::CalcError;
use crate::types::{BreakEvenFormula, RoiFormula};

/// Average trading fee rate applied to volume.
pub const AVERAGE_FEE_RATE: f64 = 0.000475;

/// Effective commission above which payouts are flagged.
pub const COMMISSION_CEILING: f64 = 0.65;

/// Commission fractions closer than this are treated as equal.
///
/// Sums like `0.65 - 0.60 - 0.05` leave residue around `1e-17`.
pub const COMMISSION_EPSILON: f64 = 1e-9;

/// Default budget pre-filled in the break-even form.
pub const DEFAULT_BREAK_EVEN_BUDGET: f64 = 6000.0;

/// Default budget pre-filled in the ROI form.
pub const DEFAULT_ROI_BUDGET: f64 = 7000.0;

/// Effective commission used when none is given (first form option).
pub const DEFAULT_EFFECTIVE_COMMISSION: f64 = 0.40;

/// Affiliate commission used when none is given (first form option).
pub const DEFAULT_AFFILIATE_COMMISSION: f64 = 0.20;

/// Calculator configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Average fee rate (fraction of volume)
    pub fee_rate: f64,
    /// Effective commission ceiling (fraction)
    pub commission_ceiling: f64,
    pub roi_formula: RoiFormula,
    pub break_even_formula: BreakEvenFormula,
    /// Title printed at the top of exported reports
    pub report_title: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            fee_rate: AVERAGE_FEE_RATE,
            commission_ceiling: COMMISSION_CEILING,
            roi_formula: RoiFormula::default(),
            break_even_formula: BreakEvenFormula::default(),
            report_title: "BDs Calculator Report".to_string(),
        }
    }
}

impl CalculatorConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.fee_rate.is_finite() || self.fee_rate <= 0.0 {
            return Err(CalcError::config("Fee rate must be a positive number"));
        }

        if !self.commission_ceiling.is_finite()
            || self.commission_ceiling <= 0.0
            || self.commission_ceiling > 1.0
        {
            return Err(CalcError::config("Commission ceiling must be within (0, 1]"));
        }

        if self.report_title.trim().is_empty() {
            return Err(CalcError::config("Report title must not be empty"));
        }

        Ok(())
    }
}

/// Option lists offered by the form selections.
pub struct FormOptions;

impl FormOptions {
    /// Volume choices in millions: 10..=100 step 10, then 125..=300 step 25
    pub fn volume_millions() -> Vec<u32> {
        (10..=100).step_by(10).chain((125..=300).step_by(25)).collect()
    }

    /// Affiliate commission: 20%..=60% in 5% steps
    pub fn affiliate_commissions() -> Vec<f64> {
        (20..=60).step_by(5).map(percent).collect()
    }

    /// Master affiliate commission: 0%..=20% in 1% steps
    pub fn master_commissions() -> Vec<f64> {
        (0..=20).map(percent).collect()
    }

    /// Pre-combined effective commission: 40%..=65% in 5% steps
    pub fn effective_commissions() -> Vec<f64> {
        (40..=65).step_by(5).map(percent).collect()
    }
}

fn percent(p: u32) -> f64 {
    f64::from(p) / 100.0
}

/// Label for a commission option (`0.35` -> `"35%"`).
pub fn commission_label(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round() as i64)
}
