//! Commission, break-even and ROI formulas.
//!
//! # Formulas
//!
//! | Calculation          | Formula |
//! |----------------------|---------|
//! | Effective commission | `a + m + (bonus + payments) / (volume * fee_rate)` |
//! | Max bonus + payments | `(ceiling - a - m) * volume * fee_rate` |
//! | Break-even volume    | `budget / (fee_rate * (1 - total_commission))` |
//! | Target bonus volume  | `bonus / (ceiling - a - m) / fee_rate` |
//! | ROI (simple)         | `(apex_fee - budget) / budget * 100` |
//! | ROI (weighted)       | `(apex_fee - budget) / (aff_fee + master_fee + budget) * 100` |
//! | Scenario volume      | `base * MS * AS * KI * AE` |
//!
//! Every function here is pure: no I/O, no shared state, same input, same
//! output. Values outside the documented domain (commissions above 100%,
//! negative budgets) are propagated, not clamped.

use serde::{Deserialize, Serialize};

use crate::config::COMMISSION_EPSILON;
use crate::error::{CalcError, Result};
use crate::types::{CommissionBasis, CommissionLevel, RoiFormula, ScenarioMultipliers};

/// Percent changes shown around the break-even volume.
pub const ROI_OUTCOME_STEPS: [f64; 2] = [15.0, 30.0];

// ============================================================================
// Effective commission
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveCommissionInput {
    pub volume: f64,
    pub affiliate_commission: f64,
    pub master_commission: f64,
    pub bonus: f64,
    pub payments: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveCommissionResult {
    /// `volume * fee_rate`
    pub fee_income: f64,
    /// `(bonus + payments) / fee_income`
    pub margin_commission: f64,
    pub effective_commission: f64,
    pub level: CommissionLevel,
}

/// Total share of fee income paid out, including bonus and payment margin.
///
/// # Errors
///
/// - `InvalidInput` when both bonus and payments are zero (checked first)
/// - `DivideByZero` when the fee income is zero
pub fn effective_commission(
    input: &EffectiveCommissionInput,
    fee_rate: f64,
    ceiling: f64,
) -> Result<EffectiveCommissionResult> {
    if input.bonus == 0.0 && input.payments == 0.0 {
        return Err(CalcError::invalid_input(
            "Either Bonus or Payments must be greater than zero.",
        ));
    }

    let fee_income = input.volume * fee_rate;
    if fee_income == 0.0 {
        return Err(CalcError::divide_by_zero(
            "Fee income is zero; enter a volume greater than zero.",
        ));
    }

    let margin_commission = (input.bonus + input.payments) / fee_income;
    let effective_commission =
        input.affiliate_commission + input.master_commission + margin_commission;

    Ok(EffectiveCommissionResult {
        fee_income,
        margin_commission,
        effective_commission,
        level: CommissionLevel::classify(effective_commission, ceiling),
    })
}

// ============================================================================
// Max bonus + payments
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaxPaymentsInput {
    pub volume: f64,
    pub affiliate_commission: f64,
    pub master_commission: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaxPaymentsResult {
    pub fee_income: f64,
    /// `ceiling - a - m`, may be negative
    pub margin_commission: f64,
    /// Largest bonus + payments that keeps the effective commission at the ceiling
    pub max_bonus_payments: f64,
}

/// Largest bonus + payments sum allowed under the commission ceiling.
///
/// Negative when the commissions alone already exceed the ceiling; the value
/// is reported as-is.
pub fn max_bonus_payments(input: &MaxPaymentsInput, fee_rate: f64, ceiling: f64) -> MaxPaymentsResult {
    let fee_income = input.volume * fee_rate;
    let margin_commission = ceiling - input.affiliate_commission - input.master_commission;

    MaxPaymentsResult {
        fee_income,
        margin_commission,
        max_bonus_payments: margin_commission * fee_income,
    }
}

// ============================================================================
// Break-even volume
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenInput {
    pub budget: f64,
    pub commission: CommissionBasis,
}

/// Volume at a fixed percent change from break-even.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiOutcome {
    pub label: String,
    /// Signed percent change, e.g. `15.0` or `-30.0`
    pub change_percent: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenResult {
    pub total_commission: f64,
    pub break_even_volume: f64,
    /// Positive outcomes first, then negative, in `ROI_OUTCOME_STEPS` order
    pub outcomes: Vec<RoiOutcome>,
}

/// Volume at which the budget is recovered by fee income net of commissions.
///
/// # Errors
///
/// - `DivideByZero` when the total commission is 100% within `COMMISSION_EPSILON` (or the fee rate is zero)
///
/// A total commission above 100% yields a negative volume, which is returned unchanged.
pub fn break_even_volume(input: &BreakEvenInput, fee_rate: f64) -> Result<BreakEvenResult> {
    let total_commission = input.commission.total();
    let retained = 1.0 - total_commission;
    if retained.abs() < COMMISSION_EPSILON || fee_rate == 0.0 {
        return Err(CalcError::divide_by_zero(
            "Break-even is undefined when the total commission is 100%.",
        ));
    }

    let break_even_volume = input.budget / (fee_rate * retained);

    Ok(BreakEvenResult {
        total_commission,
        break_even_volume,
        outcomes: roi_outcomes(break_even_volume),
    })
}

fn roi_outcomes(break_even_volume: f64) -> Vec<RoiOutcome> {
    let positive = ROI_OUTCOME_STEPS.iter().enumerate().map(|(i, step)| (i, *step));
    let negative = ROI_OUTCOME_STEPS.iter().enumerate().map(|(i, step)| (i, -*step));

    positive
        .chain(negative)
        .map(|(i, change)| RoiOutcome {
            label: format!("Scenario {} ({:+}% ROI)", i + 1, change),
            change_percent: change,
            volume: break_even_volume * (1.0 + change / 100.0),
        })
        .collect()
}

// ============================================================================
// Target bonus volume
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetVolumeInput {
    pub bonus: f64,
    pub affiliate_commission: f64,
    pub master_commission: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetVolumeResult {
    /// `ceiling - a - m`
    pub margin_commission: f64,
    pub required_volume: f64,
}

/// Trading volume needed so that `bonus` fits under the commission ceiling.
///
/// # Errors
///
/// - `InvalidInput` when the commissions leave no margin under the ceiling
/// - `DivideByZero` when the fee rate is zero
pub fn target_bonus_volume(
    input: &TargetVolumeInput,
    fee_rate: f64,
    ceiling: f64,
) -> Result<TargetVolumeResult> {
    let margin_commission = ceiling - input.affiliate_commission - input.master_commission;
    if margin_commission < COMMISSION_EPSILON {
        return Err(CalcError::invalid_input(format!(
            "Affiliate and master commissions leave no margin under the {:.0}% ceiling.",
            ceiling * 100.0
        )));
    }
    if fee_rate == 0.0 {
        return Err(CalcError::divide_by_zero("Fee rate is zero."));
    }

    Ok(TargetVolumeResult {
        margin_commission,
        required_volume: input.bonus / margin_commission / fee_rate,
    })
}

// ============================================================================
// ROI
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiInput {
    pub volume: f64,
    pub budget: f64,
    pub commission: CommissionBasis,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    /// `volume * fee_rate`
    pub total_trading_fee: f64,
    /// Fee kept after commissions
    pub apex_generated_fee: f64,
    pub generated_affiliate_commission: f64,
    pub generated_master_commission: f64,
    /// ROI in percent
    pub roi: f64,
}

/// ROI percentage for a given generated fee, budget and paid commissions.
fn roi_percent(
    apex_generated_fee: f64,
    budget: f64,
    generated_commissions: f64,
    formula: RoiFormula,
) -> Result<f64> {
    match formula {
        RoiFormula::Simple => {
            if budget == 0.0 {
                Ok(0.0)
            } else {
                Ok((apex_generated_fee - budget) / budget * 100.0)
            }
        }
        RoiFormula::CommissionWeighted => {
            let denominator = generated_commissions + budget;
            if denominator == 0.0 {
                return Err(CalcError::divide_by_zero(
                    "ROI is undefined when budget and generated commissions are both zero.",
                ));
            }
            Ok((apex_generated_fee - budget) / denominator * 100.0)
        }
    }
}

/// Standard ROI of spending `budget` to acquire `volume`.
///
/// # Errors
///
/// - `DivideByZero` for `CommissionWeighted` when its denominator is zero
pub fn roi(input: &RoiInput, formula: RoiFormula, fee_rate: f64) -> Result<RoiResult> {
    let total_trading_fee = input.volume * fee_rate;
    let apex_generated_fee = total_trading_fee * (1.0 - input.commission.total());
    let generated_affiliate_commission = total_trading_fee * input.commission.affiliate_part();
    let generated_master_commission = total_trading_fee * input.commission.master_part();

    let roi = roi_percent(
        apex_generated_fee,
        input.budget,
        generated_affiliate_commission + generated_master_commission,
        formula,
    )?;

    Ok(RoiResult {
        total_trading_fee,
        apex_generated_fee,
        generated_affiliate_commission,
        generated_master_commission,
        roi,
    })
}

// ============================================================================
// Scenario
// ============================================================================

/// Figures carried from a completed ROI stage into the scenario stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiSnapshot {
    pub base_volume: f64,
    pub budget: f64,
    pub commission: CommissionBasis,
    pub total_trading_fee: f64,
    pub apex_generated_fee: f64,
    pub roi: f64,
    pub formula: RoiFormula,
}

impl RoiSnapshot {
    pub fn new(input: &RoiInput, result: &RoiResult, formula: RoiFormula) -> Self {
        Self {
            base_volume: input.volume,
            budget: input.budget,
            commission: input.commission,
            total_trading_fee: result.total_trading_fee,
            apex_generated_fee: result.apex_generated_fee,
            roi: result.roi,
            formula,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub multipliers: ScenarioMultipliers,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// The standard figures the scenario is compared against
    pub base: RoiSnapshot,
    pub multipliers: ScenarioMultipliers,
    pub expected_volume: f64,
    pub apex_generated_fee: f64,
    pub roi: f64,
}

/// `base * MS * AS * KI * AE`
pub fn scenario_volume(base_volume: f64, multipliers: &ScenarioMultipliers) -> f64 {
    base_volume * multipliers.combined()
}

/// Re-run the ROI of a completed standard calculation under scenario multipliers.
///
/// The ROI variant is the one the snapshot was produced with.
pub fn scenario(
    base: &RoiSnapshot,
    input: &ScenarioInput,
    fee_rate: f64,
) -> Result<ScenarioResult> {
    let expected_volume = scenario_volume(base.base_volume, &input.multipliers);
    let trading_fee = expected_volume * fee_rate;
    let apex_generated_fee = trading_fee * (1.0 - base.commission.total());
    let generated_commissions = trading_fee * base.commission.total();

    let roi = roi_percent(apex_generated_fee, base.budget, generated_commissions, base.formula)?;

    Ok(ScenarioResult {
        base: *base,
        multipliers: input.multipliers,
        expected_volume,
        apex_generated_fee,
        roi,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AVERAGE_FEE_RATE, COMMISSION_CEILING};
    use crate::types::{AffiliateEngagement, KolInfluence, MarketSentiment, PlatformStatus};

    const EPS: f64 = 1e-6;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_effective_commission_example() {
        let input = EffectiveCommissionInput {
            volume: 50_000_000.0,
            affiliate_commission: 0.30,
            master_commission: 0.05,
            bonus: 0.0,
            payments: 5000.0,
        };
        let result = effective_commission(&input, AVERAGE_FEE_RATE, COMMISSION_CEILING).unwrap();
        assert!(close(result.fee_income, 23_750.0));
        assert!(close(result.margin_commission, 5000.0 / 23_750.0));
        assert!((result.effective_commission - 0.5605).abs() < 1e-4);
        assert_eq!(result.level, CommissionLevel::WithinCeiling);
    }

    #[test]
    fn test_effective_commission_requires_bonus_or_payments() {
        let input = EffectiveCommissionInput {
            volume: 0.0,
            affiliate_commission: 0.3,
            master_commission: 0.0,
            bonus: 0.0,
            payments: 0.0,
        };
        let err = effective_commission(&input, AVERAGE_FEE_RATE, COMMISSION_CEILING).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(_)));
    }

    #[test]
    fn test_effective_commission_zero_volume() {
        let input = EffectiveCommissionInput {
            volume: 0.0,
            affiliate_commission: 0.3,
            master_commission: 0.0,
            bonus: 100.0,
            payments: 0.0,
        };
        let err = effective_commission(&input, AVERAGE_FEE_RATE, COMMISSION_CEILING).unwrap_err();
        assert!(matches!(err, CalcError::DivideByZero(_)));
    }

    #[test]
    fn test_effective_commission_above_ceiling() {
        let input = EffectiveCommissionInput {
            volume: 10_000_000.0,
            affiliate_commission: 0.60,
            master_commission: 0.05,
            bonus: 1000.0,
            payments: 0.0,
        };
        let result = effective_commission(&input, AVERAGE_FEE_RATE, COMMISSION_CEILING).unwrap();
        assert_eq!(result.level, CommissionLevel::AboveCeiling);
    }

    #[test]
    fn test_max_bonus_payments() {
        let input = MaxPaymentsInput {
            volume: 50_000_000.0,
            affiliate_commission: 0.30,
            master_commission: 0.05,
        };
        let result = max_bonus_payments(&input, AVERAGE_FEE_RATE, COMMISSION_CEILING);
        assert!(close(result.margin_commission, 0.30));
        assert!(close(result.max_bonus_payments, 7125.0));
    }

    #[test]
    fn test_max_bonus_payments_negative_not_clamped() {
        let input = MaxPaymentsInput {
            volume: 10_000_000.0,
            affiliate_commission: 0.60,
            master_commission: 0.20,
        };
        let result = max_bonus_payments(&input, AVERAGE_FEE_RATE, COMMISSION_CEILING);
        assert!(result.max_bonus_payments < 0.0);
        assert!(close(result.max_bonus_payments, -0.15 * 4750.0));
    }

    #[test]
    fn test_break_even_example() {
        let input = BreakEvenInput {
            budget: 6000.0,
            commission: CommissionBasis::Effective { rate: 0.50 },
        };
        let result = break_even_volume(&input, AVERAGE_FEE_RATE).unwrap();
        assert!((result.break_even_volume - 25_263_157.894_736_84).abs() < 1e-3);

        assert_eq!(result.outcomes.len(), 4);
        assert_eq!(result.outcomes[0].label, "Scenario 1 (+15% ROI)");
        assert_eq!(result.outcomes[3].label, "Scenario 2 (-30% ROI)");
        assert!(close(result.outcomes[1].volume, result.break_even_volume * 1.3));
        assert!(close(result.outcomes[2].volume, result.break_even_volume * 0.85));
    }

    #[test]
    fn test_break_even_full_commission_is_divide_by_zero() {
        let input = BreakEvenInput {
            budget: 6000.0,
            commission: CommissionBasis::Split { affiliate: 0.8, master: 0.2 },
        };
        let err = break_even_volume(&input, AVERAGE_FEE_RATE).unwrap_err();
        assert!(matches!(err, CalcError::DivideByZero(_)));
    }

    #[test]
    fn test_break_even_over_full_commission_goes_negative() {
        let input = BreakEvenInput {
            budget: 6000.0,
            commission: CommissionBasis::Effective { rate: 1.2 },
        };
        let result = break_even_volume(&input, AVERAGE_FEE_RATE).unwrap();
        assert!(result.break_even_volume < 0.0);
    }

    #[test]
    fn test_target_bonus_volume() {
        let input = TargetVolumeInput {
            bonus: 7125.0,
            affiliate_commission: 0.30,
            master_commission: 0.05,
        };
        let result = target_bonus_volume(&input, AVERAGE_FEE_RATE, COMMISSION_CEILING).unwrap();
        assert!((result.required_volume - 50_000_000.0).abs() < 1e-3);
    }

    #[test]
    fn test_target_bonus_volume_without_margin() {
        let input = TargetVolumeInput {
            bonus: 1000.0,
            affiliate_commission: 0.60,
            master_commission: 0.05,
        };
        let err = target_bonus_volume(&input, AVERAGE_FEE_RATE, COMMISSION_CEILING).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(_)));
    }

    #[test]
    fn test_target_bonus_volume_at_ceiling_from_option_lists() {
        // Every affiliate/master pair the forms offer that sums to the ceiling
        for (affiliate, master) in [(0.60, 0.05), (0.50, 0.15), (0.45, 0.20)] {
            let input = TargetVolumeInput {
                bonus: 1000.0,
                affiliate_commission: affiliate,
                master_commission: master,
            };
            let err = target_bonus_volume(&input, AVERAGE_FEE_RATE, COMMISSION_CEILING).unwrap_err();
            assert!(matches!(err, CalcError::InvalidInput(_)), "{affiliate} + {master}");
        }
    }

    #[test]
    fn test_break_even_split_summing_to_full_commission() {
        for (affiliate, master) in [(0.7, 0.3), (0.9, 0.1), (0.85, 0.15)] {
            let input = BreakEvenInput {
                budget: 6000.0,
                commission: CommissionBasis::Split { affiliate, master },
            };
            let err = break_even_volume(&input, AVERAGE_FEE_RATE).unwrap_err();
            assert!(matches!(err, CalcError::DivideByZero(_)), "{affiliate} + {master}");
        }
    }

    #[test]
    fn test_roi_simple() {
        let input = RoiInput {
            volume: 50_000_000.0,
            budget: 7000.0,
            commission: CommissionBasis::Effective { rate: 0.5 },
        };
        let result = roi(&input, RoiFormula::Simple, AVERAGE_FEE_RATE).unwrap();
        assert!(close(result.total_trading_fee, 23_750.0));
        assert!(close(result.apex_generated_fee, 11_875.0));
        assert!(close(result.roi, (11_875.0 - 7000.0) / 7000.0 * 100.0));
    }

    #[test]
    fn test_roi_simple_zero_budget_is_zero() {
        let input = RoiInput {
            volume: 50_000_000.0,
            budget: 0.0,
            commission: CommissionBasis::Effective { rate: 0.5 },
        };
        let result = roi(&input, RoiFormula::Simple, AVERAGE_FEE_RATE).unwrap();
        assert_eq!(result.roi, 0.0);
    }

    #[test]
    fn test_roi_commission_weighted() {
        let input = RoiInput {
            volume: 50_000_000.0,
            budget: 7000.0,
            commission: CommissionBasis::Split { affiliate: 0.30, master: 0.05 },
        };
        let result = roi(&input, RoiFormula::CommissionWeighted, AVERAGE_FEE_RATE).unwrap();
        assert!(close(result.generated_affiliate_commission, 7125.0));
        assert!(close(result.generated_master_commission, 1187.5));
        let expected = (23_750.0 * 0.65 - 7000.0) / (7125.0 + 1187.5 + 7000.0) * 100.0;
        assert!(close(result.roi, expected));
    }

    #[test]
    fn test_roi_commission_weighted_zero_denominator() {
        let input = RoiInput {
            volume: 0.0,
            budget: 0.0,
            commission: CommissionBasis::Split { affiliate: 0.30, master: 0.05 },
        };
        let err = roi(&input, RoiFormula::CommissionWeighted, AVERAGE_FEE_RATE).unwrap_err();
        assert!(matches!(err, CalcError::DivideByZero(_)));
    }

    #[test]
    fn test_scenario_applies_multipliers() {
        let roi_input = RoiInput {
            volume: 100_000_000.0,
            budget: 7000.0,
            commission: CommissionBasis::Effective { rate: 0.5 },
        };
        let roi_result = roi(&roi_input, RoiFormula::Simple, AVERAGE_FEE_RATE).unwrap();
        let snapshot = RoiSnapshot::new(&roi_input, &roi_result, RoiFormula::Simple);

        let input = ScenarioInput {
            multipliers: ScenarioMultipliers {
                market: MarketSentiment::Positive,
                status: PlatformStatus::High,
                kol: KolInfluence::Low,
                engagement: AffiliateEngagement::Neutral,
            },
        };
        let result = scenario(&snapshot, &input, AVERAGE_FEE_RATE).unwrap();
        let expected_volume = 100_000_000.0 * 1.2 * 1.1 * 0.7;
        assert!((result.expected_volume - expected_volume).abs() < 1e-3);
        assert!(close(result.apex_generated_fee, expected_volume * AVERAGE_FEE_RATE * 0.5));
        assert_eq!(result.base, snapshot);
    }

    #[test]
    fn test_scenario_identity_matches_standard_roi() {
        let roi_input = RoiInput {
            volume: 40_000_000.0,
            budget: 5000.0,
            commission: CommissionBasis::Effective { rate: 0.45 },
        };
        let roi_result = roi(&roi_input, RoiFormula::Simple, AVERAGE_FEE_RATE).unwrap();
        let snapshot = RoiSnapshot::new(&roi_input, &roi_result, RoiFormula::Simple);

        let input = ScenarioInput { multipliers: ScenarioMultipliers::neutral() };
        let result = scenario(&snapshot, &input, AVERAGE_FEE_RATE).unwrap();
        assert!(close(result.expected_volume, 40_000_000.0));
        assert!(close(result.roi, roi_result.roi));
    }
}
