//! Type-safe enumerations for the calculator
//!
//! Stages, formula variants, scenario multipliers and report formats are closed
//! sets, so they are modelled as enums with strum-derived parsing and display
//! instead of free-form strings.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::config::COMMISSION_EPSILON;

/// A calculation stage.
///
/// Declaration order is the canonical order used by tabs and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    #[strum(to_string = "Effective Commission", serialize = "effective")]
    EffectiveCommission,
    #[strum(to_string = "Max Payments", serialize = "max-payments")]
    MaxPayments,
    #[strum(to_string = "Break-even", serialize = "break-even")]
    BreakEven,
    #[strum(to_string = "Target Volume", serialize = "target-volume")]
    TargetVolume,
    #[strum(to_string = "ROI", serialize = "roi")]
    Roi,
    #[strum(to_string = "Scenario", serialize = "scenario")]
    Scenario,
}

impl Stage {
    /// Upper-case label shown on the tab bar.
    pub fn tab_title(&self) -> String {
        self.to_string().to_uppercase()
    }

    /// Section heading used in results and reports.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::EffectiveCommission => "Effective Commission Calculator",
            Self::MaxPayments => "Max Bonus & Payments Calculator",
            Self::BreakEven => "Break-even Volume Calculator",
            Self::TargetVolume => "Target Bonus Volume Calculator",
            Self::Roi => "ROI Calculation",
            Self::Scenario => "Scenario Calculation",
        }
    }

    /// Position in the canonical order (0-indexed).
    pub fn index(&self) -> usize {
        Self::iter().position(|s| s == *self).unwrap_or(0)
    }

    /// Stage at a canonical position, wrapping around.
    pub fn from_index(index: usize) -> Self {
        let count = Self::iter().count();
        Self::iter().nth(index % count).unwrap_or_default()
    }

    pub fn next(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(&self) -> Self {
        let count = Self::iter().count();
        Self::from_index(self.index() + count - 1)
    }
}

/// ROI formula variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoiFormula {
    /// `(apex_fee - budget) / budget * 100`, zero budget yields 0
    #[default]
    Simple,
    /// `(apex_fee - budget) / (generated commissions + budget) * 100`
    CommissionWeighted,
}

/// Break-even formula variant.
///
/// Both evaluate `budget / (fee_rate * (1 - total_commission))`; they differ in
/// which commission figures the form collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BreakEvenFormula {
    /// A single pre-combined effective commission
    #[default]
    EffectiveCommission,
    /// Affiliate and master affiliate commissions entered separately (net-zero)
    SplitCommission,
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReportFormat {
    #[default]
    Pdf,
    Json,
}

impl ReportFormat {
    /// Pick a format from a file extension; anything but `.json` is PDF.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pdf,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Json => "json",
        }
    }
}

/// Display policy for an effective commission relative to the ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommissionLevel {
    WithinCeiling,
    AboveCeiling,
}

impl CommissionLevel {
    /// Strictly above the ceiling is flagged; at it (within
    /// `COMMISSION_EPSILON`) is still fine.
    pub fn classify(commission: f64, ceiling: f64) -> Self {
        if commission - ceiling > COMMISSION_EPSILON {
            Self::AboveCeiling
        } else {
            Self::WithinCeiling
        }
    }
}

/// How a total commission is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommissionBasis {
    /// A single effective commission rate
    Effective { rate: f64 },
    /// Affiliate and master affiliate commissions
    Split { affiliate: f64, master: f64 },
}

impl CommissionBasis {
    pub fn total(&self) -> f64 {
        match self {
            Self::Effective { rate } => *rate,
            Self::Split { affiliate, master } => affiliate + master,
        }
    }

    /// The affiliate share; an effective rate counts entirely as affiliate.
    pub fn affiliate_part(&self) -> f64 {
        match self {
            Self::Effective { rate } => *rate,
            Self::Split { affiliate, .. } => *affiliate,
        }
    }

    pub fn master_part(&self) -> f64 {
        match self {
            Self::Effective { .. } => 0.0,
            Self::Split { master, .. } => *master,
        }
    }
}

/// Common surface of the four scenario multiplier enums.
pub trait Multiplier: Copy + IntoEnumIterator + std::fmt::Display {
    /// Factor applied to the base volume.
    fn factor(&self) -> f64;
    /// Short label for the form (e.g. "Market Sentiment (MS)").
    fn field_label() -> &'static str;
}

/// Market sentiment (MS)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum MarketSentiment {
    #[default]
    #[strum(to_string = "Positive (1.2)", serialize = "positive")]
    Positive,
    #[strum(to_string = "Neutral (1.0)", serialize = "neutral")]
    Neutral,
    #[strum(to_string = "Negative (0.5)", serialize = "negative")]
    Negative,
}

impl Multiplier for MarketSentiment {
    fn factor(&self) -> f64 {
        match self {
            Self::Positive => 1.2,
            Self::Neutral => 1.0,
            Self::Negative => 0.5,
        }
    }

    fn field_label() -> &'static str {
        "Market Sentiment (MS)"
    }
}

/// Platform status, liquidity and pairs (AS)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum PlatformStatus {
    #[default]
    #[strum(to_string = "High (1.1)", serialize = "high")]
    High,
    #[strum(to_string = "Neutral (1.0)", serialize = "neutral")]
    Neutral,
    #[strum(to_string = "Low (0.9)", serialize = "low")]
    Low,
}

impl Multiplier for PlatformStatus {
    fn factor(&self) -> f64 {
        match self {
            Self::High => 1.1,
            Self::Neutral => 1.0,
            Self::Low => 0.9,
        }
    }

    fn field_label() -> &'static str {
        "ApeX Status, Liquidity & Pairs (AS)"
    }
}

/// KOL influence (KI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum KolInfluence {
    #[strum(to_string = "High (1.3)", serialize = "high")]
    High,
    #[strum(to_string = "Neutral (1.0)", serialize = "neutral")]
    Neutral,
    #[default]
    #[strum(to_string = "Low (0.7)", serialize = "low")]
    Low,
}

impl Multiplier for KolInfluence {
    fn factor(&self) -> f64 {
        match self {
            Self::High => 1.3,
            Self::Neutral => 1.0,
            Self::Low => 0.7,
        }
    }

    fn field_label() -> &'static str {
        "KOL Influence (KI)"
    }
}

/// Affiliate engagement (AE)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum AffiliateEngagement {
    #[strum(to_string = "High (1.25)", serialize = "high")]
    High,
    #[default]
    #[strum(to_string = "Neutral (1.0)", serialize = "neutral")]
    Neutral,
    #[strum(to_string = "Low (0.75)", serialize = "low")]
    Low,
}

impl Multiplier for AffiliateEngagement {
    fn factor(&self) -> f64 {
        match self {
            Self::High => 1.25,
            Self::Neutral => 1.0,
            Self::Low => 0.75,
        }
    }

    fn field_label() -> &'static str {
        "Affiliate Engagement (AE)"
    }
}

/// The four scenario multipliers selected together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScenarioMultipliers {
    pub market: MarketSentiment,
    pub status: PlatformStatus,
    pub kol: KolInfluence,
    pub engagement: AffiliateEngagement,
}

impl ScenarioMultipliers {
    /// All four multipliers at 1.0.
    pub fn neutral() -> Self {
        Self {
            market: MarketSentiment::Neutral,
            status: PlatformStatus::Neutral,
            kol: KolInfluence::Neutral,
            engagement: AffiliateEngagement::Neutral,
        }
    }

    /// MS x AS x KI x AE
    pub fn combined(&self) -> f64 {
        self.market.factor() * self.status.factor() * self.kol.factor() * self.engagement.factor()
    }
}
