//! Stage dispatch: typed request in, typed result out.
//!
//! `Calculator` binds the formulas to a [`CalculatorConfig`] (fee rate, ceiling,
//! formula variants). The scenario stage is the only one with a prerequisite;
//! its ROI snapshot is taken from the session here and handed to the formula
//! as a plain argument.

use serde::Serialize;
use tracing::{debug, warn};

use super::formulas::{
    self, BreakEvenInput, BreakEvenResult, EffectiveCommissionInput, EffectiveCommissionResult,
    MaxPaymentsInput, MaxPaymentsResult, RoiInput, RoiResult, RoiSnapshot, ScenarioInput,
    ScenarioResult, TargetVolumeInput, TargetVolumeResult,
};
use crate::config::CalculatorConfig;
use crate::error::Result;
use crate::format::{format_currency, format_number, format_percent_value, format_percentage};
use crate::session::SessionState;
use crate::types::{CommissionBasis, CommissionLevel, Stage};

/// Inputs for one stage evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "stage", content = "input", rename_all = "snake_case")]
pub enum StageRequest {
    EffectiveCommission(EffectiveCommissionInput),
    MaxPayments(MaxPaymentsInput),
    BreakEven(BreakEvenInput),
    TargetVolume(TargetVolumeInput),
    Roi(RoiInput),
    Scenario(ScenarioInput),
}

impl StageRequest {
    pub fn stage(&self) -> Stage {
        match self {
            Self::EffectiveCommission(_) => Stage::EffectiveCommission,
            Self::MaxPayments(_) => Stage::MaxPayments,
            Self::BreakEven(_) => Stage::BreakEven,
            Self::TargetVolume(_) => Stage::TargetVolume,
            Self::Roi(_) => Stage::Roi,
            Self::Scenario(_) => Stage::Scenario,
        }
    }
}

/// Output of one successful stage evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "stage", content = "result", rename_all = "snake_case")]
pub enum StageResult {
    EffectiveCommission(EffectiveCommissionResult),
    MaxPayments(MaxPaymentsResult),
    BreakEven(BreakEvenResult),
    TargetVolume(TargetVolumeResult),
    Roi {
        input: RoiInput,
        result: RoiResult,
    },
    Scenario(ScenarioResult),
}

impl StageResult {
    pub fn stage(&self) -> Stage {
        match self {
            Self::EffectiveCommission(_) => Stage::EffectiveCommission,
            Self::MaxPayments(_) => Stage::MaxPayments,
            Self::BreakEven(_) => Stage::BreakEven,
            Self::TargetVolume(_) => Stage::TargetVolume,
            Self::Roi { .. } => Stage::Roi,
            Self::Scenario(_) => Stage::Scenario,
        }
    }

    /// Display policy of the headline figure, when it has one.
    pub fn commission_level(&self) -> Option<CommissionLevel> {
        match self {
            Self::EffectiveCommission(r) => Some(r.level),
            _ => None,
        }
    }

    /// Ordered `(label, formatted value)` rows for display and export.
    pub fn rows(&self) -> Vec<(String, String)> {
        let row = |label: &str, value: String| (label.to_string(), value);

        match self {
            Self::EffectiveCommission(r) => vec![
                row("Fee Income", format_currency(r.fee_income)),
                row("Margin Commission", format_percentage(r.margin_commission)),
                row("Effective Commission", format_percentage(r.effective_commission)),
            ],
            Self::MaxPayments(r) => vec![
                row("Fee Income", format_currency(r.fee_income)),
                row("Margin Commission", format_percentage(r.margin_commission)),
                row(
                    "Maximum Allowable Bonus & Payments",
                    format_currency(r.max_bonus_payments),
                ),
            ],
            Self::BreakEven(r) => {
                let mut rows = vec![
                    row("Total Commission", format_percentage(r.total_commission)),
                    row("Break Even Trading Volume", format_number(r.break_even_volume)),
                ];
                rows.extend(
                    r.outcomes
                        .iter()
                        .map(|o| (o.label.clone(), format_number(o.volume))),
                );
                rows
            }
            Self::TargetVolume(r) => vec![
                row("Margin Commission", format_percentage(r.margin_commission)),
                row("Required Trading Volume", format_number(r.required_volume)),
            ],
            Self::Roi { input, result } => {
                let mut rows = vec![
                    row("Volume Selected", format_number(input.volume)),
                    row("Budget", format_currency(input.budget)),
                    row("Total Trading Fee", format_currency(result.total_trading_fee)),
                    row("ApeX Generated Fee", format_currency(result.apex_generated_fee)),
                ];
                if let CommissionBasis::Split { .. } = input.commission {
                    rows.push(row(
                        "Generated Affiliate Commission",
                        format_currency(result.generated_affiliate_commission),
                    ));
                    rows.push(row(
                        "Generated Master Commission",
                        format_currency(result.generated_master_commission),
                    ));
                }
                rows.push(row("ROI", format_percent_value(result.roi)));
                rows
            }
            Self::Scenario(r) => vec![
                row("Volume Selected", format_number(r.base.base_volume)),
                row("Total Trading Fee", format_currency(r.base.total_trading_fee)),
                row("ROI", format_percent_value(r.base.roi)),
                row("Market Sentiment (MS)", r.multipliers.market.to_string()),
                row("ApeX Status (AS)", r.multipliers.status.to_string()),
                row("KOL Influence (KI)", r.multipliers.kol.to_string()),
                row("Affiliate Engagement (AE)", r.multipliers.engagement.to_string()),
                row("Expected Volume with Scenario", format_number(r.expected_volume)),
                row(
                    "ApeX Generated Fee with Scenario",
                    format_currency(r.apex_generated_fee),
                ),
                row("ROI with Scenario", format_percent_value(r.roi)),
            ],
        }
    }
}

/// Evaluates stage requests under one configuration.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    config: CalculatorConfig,
}

impl Calculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Evaluate a request without touching the session.
    ///
    /// `prior_roi` is required for the scenario stage and ignored otherwise.
    pub fn evaluate(
        &self,
        request: &StageRequest,
        prior_roi: Option<&RoiSnapshot>,
    ) -> Result<StageResult> {
        let fee_rate = self.config.fee_rate;
        let ceiling = self.config.commission_ceiling;

        let result = match request {
            StageRequest::EffectiveCommission(input) => StageResult::EffectiveCommission(
                formulas::effective_commission(input, fee_rate, ceiling)?,
            ),
            StageRequest::MaxPayments(input) => {
                StageResult::MaxPayments(formulas::max_bonus_payments(input, fee_rate, ceiling))
            }
            StageRequest::BreakEven(input) => {
                StageResult::BreakEven(formulas::break_even_volume(input, fee_rate)?)
            }
            StageRequest::TargetVolume(input) => StageResult::TargetVolume(
                formulas::target_bonus_volume(input, fee_rate, ceiling)?,
            ),
            StageRequest::Roi(input) => StageResult::Roi {
                input: *input,
                result: formulas::roi(input, self.config.roi_formula, fee_rate)?,
            },
            StageRequest::Scenario(input) => {
                let base = prior_roi.ok_or_else(SessionState::roi_not_ready)?;
                StageResult::Scenario(formulas::scenario(base, input, fee_rate)?)
            }
        };

        Ok(result)
    }

    /// Evaluate a request and record a successful result in the session.
    ///
    /// Failures leave the session untouched.
    pub fn run(&self, session: &mut SessionState, request: &StageRequest) -> Result<StageResult> {
        let stage = request.stage();
        debug!(%stage, "Evaluating stage");

        let prior = match request {
            StageRequest::Scenario(_) => Some(session.roi_snapshot()),
            _ => None,
        };

        let outcome = match prior {
            Some(Err(e)) => Err(e),
            Some(Ok(snapshot)) => self.evaluate(request, Some(snapshot)),
            None => self.evaluate(request, None),
        };

        match outcome {
            Ok(result) => {
                session.record(result.clone(), self.config.roi_formula);
                Ok(result)
            }
            Err(e) => {
                warn!(%stage, error = %e, recoverable = e.is_recoverable(), "Stage evaluation failed");
                Err(e)
            }
        }
    }
}
