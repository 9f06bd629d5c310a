//! Formula and guide text for each calculator tab.

use crate::config::CalculatorConfig;
use crate::theme::Styles;
use crate::types::{BreakEvenFormula, RoiFormula, Stage};
use ratatui::text::{Line, Span};

/// One-line formula shown under the tab bar.
pub fn formula(stage: Stage, config: &CalculatorConfig) -> String {
    match stage {
        Stage::EffectiveCommission => {
            "Effective Commission = Affiliate + Master Affiliate + (Bonus + Payments) / Fee Income"
                .to_string()
        }
        Stage::MaxPayments => format!(
            "Max (Bonus + Payments) = ({:.2} - Affiliate - Master Affiliate) x (Volume x Average ApeX Fee)",
            config.commission_ceiling
        ),
        Stage::BreakEven => match config.break_even_formula {
            BreakEvenFormula::EffectiveCommission => {
                "Trading Volume = Budget / (Average ApeX Fee x (1 - Affiliate Effective Commission))"
                    .to_string()
            }
            BreakEvenFormula::SplitCommission => {
                "Net-zero Volume = Budget / (Average ApeX Fee x (1 - Affiliate - Master Affiliate))"
                    .to_string()
            }
        },
        Stage::TargetVolume => format!(
            "Required Volume = Bonus / ({:.2} - Affiliate - Master Affiliate) / Average ApeX Fee",
            config.commission_ceiling
        ),
        Stage::Roi => match config.roi_formula {
            RoiFormula::Simple => "ROI = (ApeX Generated Fee - Budget) / Budget x 100".to_string(),
            RoiFormula::CommissionWeighted => {
                "ROI = (ApeX Generated Fee - Budget) / (Affiliate Fee + Master Fee + Budget) x 100"
                    .to_string()
            }
        },
        Stage::Scenario => "Expected Volume = Base Volume x MS x AS x KI x AE".to_string(),
    }
}

/// Short explanation of what the tab computes.
pub fn summary(stage: Stage) -> &'static str {
    match stage {
        Stage::EffectiveCommission => {
            "Effective commission from affiliate and master commissions plus bonus and payments."
        }
        Stage::MaxPayments => {
            "Maximum bonus + payments that keeps the effective commission under the ceiling."
        }
        Stage::BreakEven => "Volume needed to recover the budget, with +/-15% and +/-30% outcomes.",
        Stage::TargetVolume => "Volume needed to fund a bonus without passing the ceiling.",
        Stage::Roi => "Standard ROI for a volume, budget and commission. Feeds the Scenario tab.",
        Stage::Scenario => "Expected volume and ROI of the last ROI calculation under market scenarios.",
    }
}

/// Formula and summary as styled lines.
pub fn description_lines(stage: Stage, config: &CalculatorConfig) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(format!(" {}", formula(stage, config)), Styles::info())),
        Line::from(Span::styled(format!(" {}", summary(stage)), Styles::text_muted())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_follows_configured_variant() {
        let weighted = CalculatorConfig {
            roi_formula: RoiFormula::CommissionWeighted,
            ..Default::default()
        };
        assert!(formula(Stage::Roi, &weighted).contains("Master Fee"));
        assert!(!formula(Stage::Roi, &CalculatorConfig::default()).contains("Master Fee"));
    }

    #[test]
    fn test_ceiling_in_formula() {
        assert!(formula(Stage::MaxPayments, &CalculatorConfig::default()).contains("0.65"));
    }
}
