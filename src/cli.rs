use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{CalculatorConfig, DEFAULT_AFFILIATE_COMMISSION, DEFAULT_EFFECTIVE_COMMISSION};
use crate::engine::StageRequest;
use crate::engine::formulas::{
    BreakEvenInput, EffectiveCommissionInput, MaxPaymentsInput, RoiInput, ScenarioInput,
    TargetVolumeInput,
};
use crate::format::parse_number_or_default;
use crate::types::{
    AffiliateEngagement, BreakEvenFormula, CommissionBasis, KolInfluence, MarketSentiment,
    PlatformStatus, ReportFormat, RoiFormula, ScenarioMultipliers,
};

/// BDs Calculator - affiliate commission and ROI planning
///
/// Numbers may contain thousands separators; malformed numbers count as 0.
/// Commissions are fractions (0.30 for 30%).
#[derive(Parser)]
#[command(name = "bdcalc")]
#[command(about = "Affiliate commission, break-even and ROI calculator with TUI and PDF export")]
#[command(version)]
pub struct Cli {
    /// Calculator configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write a report of the results to this path
    #[arg(long, global = true)]
    pub export: Option<PathBuf>,

    /// Report format; inferred from the export extension when omitted
    #[arg(long, global = true, value_parser = parse_format)]
    pub format: Option<ReportFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

fn parse_format(value: &str) -> Result<ReportFormat, String> {
    value
        .parse()
        .map_err(|_| format!("unknown report format '{}' (expected pdf or json)", value))
}

/// Volume given in full units
#[derive(Args, Debug, Clone)]
pub struct VolumeArg {
    /// Trading volume, e.g. 50,000,000
    #[arg(long, default_value = "10,000,000")]
    pub volume: String,
}

/// Affiliate and master affiliate commissions
#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    #[arg(long, default_value = "0.20")]
    pub affiliate: String,
    #[arg(long, default_value = "0")]
    pub master: String,
}

impl SplitArgs {
    fn affiliate(&self) -> f64 {
        parse_number_or_default(&self.affiliate)
    }

    fn master(&self) -> f64 {
        parse_number_or_default(&self.master)
    }
}

/// Either a single effective commission or the affiliate/master split
#[derive(Args, Debug, Clone)]
pub struct CommissionArgs {
    /// Affiliate effective commission; takes precedence over the split
    #[arg(long, conflicts_with_all = ["affiliate", "master"])]
    pub effective: Option<String>,

    /// Affiliate commission [default: 0.20 when splitting]
    #[arg(long)]
    pub affiliate: Option<String>,

    /// Master affiliate commission [default: 0 when splitting]
    #[arg(long)]
    pub master: Option<String>,
}

impl CommissionArgs {
    /// Commission basis from the flags given.
    ///
    /// With no commission flags the basis follows the configured formula
    /// variant, pre-filled like the TUI form: 40% effective, or a 20% / 0%
    /// split.
    pub fn basis(&self, split_by_default: bool) -> CommissionBasis {
        match (&self.effective, &self.affiliate, &self.master) {
            (Some(rate), _, _) => CommissionBasis::Effective {
                rate: parse_number_or_default(rate),
            },
            (None, None, None) if !split_by_default => CommissionBasis::Effective {
                rate: DEFAULT_EFFECTIVE_COMMISSION,
            },
            (None, affiliate, master) => CommissionBasis::Split {
                affiliate: affiliate
                    .as_deref()
                    .map_or(DEFAULT_AFFILIATE_COMMISSION, parse_number_or_default),
                master: master.as_deref().map_or(0.0, parse_number_or_default),
            },
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RoiArgs {
    #[command(flatten)]
    pub volume: VolumeArg,

    /// Total budget
    #[arg(long, default_value = "7,000")]
    pub budget: String,

    #[command(flatten)]
    pub commission: CommissionArgs,
}

impl RoiArgs {
    fn input(&self, formula: RoiFormula) -> RoiInput {
        RoiInput {
            volume: parse_number_or_default(&self.volume.volume),
            budget: parse_number_or_default(&self.budget),
            commission: self
                .commission
                .basis(formula == RoiFormula::CommissionWeighted),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Effective commission from commissions, bonus and payments
    Effective {
        #[command(flatten)]
        volume: VolumeArg,
        #[command(flatten)]
        split: SplitArgs,
        #[arg(long, default_value = "0")]
        bonus: String,
        #[arg(long, default_value = "0")]
        payments: String,
    },
    /// Maximum bonus + payments under the commission ceiling
    MaxPayments {
        #[command(flatten)]
        volume: VolumeArg,
        #[command(flatten)]
        split: SplitArgs,
    },
    /// Volume needed to recover a budget
    BreakEven {
        #[arg(long, default_value = "6,000")]
        budget: String,
        #[command(flatten)]
        commission: CommissionArgs,
    },
    /// Volume needed to fund a target bonus
    TargetVolume {
        #[arg(long, default_value = "0")]
        bonus: String,
        #[command(flatten)]
        split: SplitArgs,
    },
    /// Return on investment for a volume and budget
    Roi {
        #[command(flatten)]
        roi: RoiArgs,
    },
    /// ROI under market scenario multipliers (runs the ROI stage first)
    Scenario {
        #[command(flatten)]
        roi: RoiArgs,
        #[arg(long, default_value = "positive", value_parser = parse_multiplier::<MarketSentiment>)]
        market: MarketSentiment,
        #[arg(long, default_value = "high", value_parser = parse_multiplier::<PlatformStatus>)]
        status: PlatformStatus,
        #[arg(long, default_value = "low", value_parser = parse_multiplier::<KolInfluence>)]
        kol: KolInfluence,
        #[arg(long, default_value = "neutral", value_parser = parse_multiplier::<AffiliateEngagement>)]
        engagement: AffiliateEngagement,
    },
    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(value_name = "CONFIG")]
        file: PathBuf,
    },
}

fn parse_multiplier<M: std::str::FromStr>(value: &str) -> Result<M, String> {
    value
        .parse()
        .map_err(|_| format!("'{}' is not one of positive/high, neutral, negative/low", value))
}

impl Commands {
    /// Stage requests this command runs, in order. Empty for `validate`.
    ///
    /// Commission flags left out default the way the configured formula
    /// variants pre-fill the TUI forms.
    pub fn requests(&self, config: &CalculatorConfig) -> Vec<StageRequest> {
        match self {
            Self::Effective {
                volume,
                split,
                bonus,
                payments,
            } => vec![StageRequest::EffectiveCommission(EffectiveCommissionInput {
                volume: parse_number_or_default(&volume.volume),
                affiliate_commission: split.affiliate(),
                master_commission: split.master(),
                bonus: parse_number_or_default(bonus),
                payments: parse_number_or_default(payments),
            })],
            Self::MaxPayments { volume, split } => {
                vec![StageRequest::MaxPayments(MaxPaymentsInput {
                    volume: parse_number_or_default(&volume.volume),
                    affiliate_commission: split.affiliate(),
                    master_commission: split.master(),
                })]
            }
            Self::BreakEven { budget, commission } => {
                vec![StageRequest::BreakEven(BreakEvenInput {
                    budget: parse_number_or_default(budget),
                    commission: commission
                        .basis(config.break_even_formula == BreakEvenFormula::SplitCommission),
                })]
            }
            Self::TargetVolume { bonus, split } => {
                vec![StageRequest::TargetVolume(TargetVolumeInput {
                    bonus: parse_number_or_default(bonus),
                    affiliate_commission: split.affiliate(),
                    master_commission: split.master(),
                })]
            }
            Self::Roi { roi } => vec![StageRequest::Roi(roi.input(config.roi_formula))],
            Self::Scenario {
                roi,
                market,
                status,
                kol,
                engagement,
            } => vec![
                StageRequest::Roi(roi.input(config.roi_formula)),
                StageRequest::Scenario(ScenarioInput {
                    multipliers: ScenarioMultipliers {
                        market: *market,
                        status: *status,
                        kol: *kol,
                        engagement: *engagement,
                    },
                }),
            ],
            Self::Validate { .. } => Vec::new(),
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// Export format: `--format` if given, otherwise from the export path.
    pub fn report_format(&self) -> ReportFormat {
        match (self.format, &self.export) {
            (Some(format), _) => format,
            (None, Some(path)) => ReportFormat::from_path(path),
            (None, None) => ReportFormat::Pdf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stage;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments parse")
    }

    #[test]
    fn test_cli_no_args() {
        // Running with no args should succeed (defaults to TUI mode)
        let cli = parse(&["bdcalc"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.report_format(), ReportFormat::Pdf);
    }

    #[test]
    fn test_cli_effective_parses_leniently() {
        let cli = parse(&[
            "bdcalc",
            "effective",
            "--volume",
            "50,000,000",
            "--affiliate",
            "0.30",
            "--master",
            "0.05",
            "--payments",
            "5,000",
            "--bonus",
            "abc",
        ]);
        let requests = cli.command.expect("command").requests(&CalculatorConfig::default());
        match &requests[..] {
            [StageRequest::EffectiveCommission(input)] => {
                assert_eq!(input.volume, 50_000_000.0);
                assert_eq!(input.payments, 5000.0);
                assert_eq!(input.bonus, 0.0);
                assert_eq!(input.master_commission, 0.05);
            }
            other => panic!("unexpected requests {:?}", other),
        }
    }

    #[test]
    fn test_cli_break_even_effective_basis() {
        let cli = parse(&["bdcalc", "break-even", "--effective", "0.5"]);
        match &cli.command.expect("command").requests(&CalculatorConfig::default())[..] {
            [StageRequest::BreakEven(input)] => {
                assert_eq!(input.budget, 6000.0);
                assert_eq!(input.commission, CommissionBasis::Effective { rate: 0.5 });
            }
            other => panic!("unexpected requests {:?}", other),
        }
    }

    #[test]
    fn test_cli_default_commission_follows_configured_variant() {
        let simple = CalculatorConfig::default();
        let split = CalculatorConfig {
            roi_formula: RoiFormula::CommissionWeighted,
            break_even_formula: BreakEvenFormula::SplitCommission,
            ..Default::default()
        };

        let commissions = |args: &[&str], config: &CalculatorConfig| -> Vec<CommissionBasis> {
            parse(args)
                .command
                .expect("command")
                .requests(config)
                .iter()
                .filter_map(|request| match request {
                    StageRequest::Roi(input) => Some(input.commission),
                    StageRequest::BreakEven(input) => Some(input.commission),
                    _ => None,
                })
                .collect()
        };

        let effective = CommissionBasis::Effective { rate: 0.40 };
        let default_split = CommissionBasis::Split { affiliate: 0.20, master: 0.0 };
        for command in ["roi", "break-even"] {
            assert_eq!(commissions(&["bdcalc", command], &simple), vec![effective]);
            assert_eq!(commissions(&["bdcalc", command], &split), vec![default_split]);
        }

        // An explicit split flag wins over the configured variant
        assert_eq!(
            commissions(&["bdcalc", "roi", "--master", "0.05"], &simple),
            vec![CommissionBasis::Split { affiliate: 0.20, master: 0.05 }]
        );
    }

    #[test]
    fn test_cli_effective_conflicts_with_split() {
        let result =
            Cli::try_parse_from(["bdcalc", "roi", "--effective", "0.5", "--affiliate", "0.3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_scenario_runs_roi_first() {
        let cli = parse(&["bdcalc", "scenario", "--effective", "0.4", "--kol", "high"]);
        let stages: Vec<Stage> = cli
            .command
            .expect("command")
            .requests(&CalculatorConfig::default())
            .iter()
            .map(StageRequest::stage)
            .collect();
        assert_eq!(stages, vec![Stage::Roi, Stage::Scenario]);

        let cli = parse(&["bdcalc", "scenario", "--kol", "High"]);
        match cli.command {
            Some(Commands::Scenario { kol, market, .. }) => {
                assert_eq!(kol, KolInfluence::High);
                assert_eq!(market, MarketSentiment::Positive);
            }
            _ => panic!("Expected Scenario command"),
        }
    }

    #[test]
    fn test_cli_global_export_options() {
        let cli = parse(&["bdcalc", "roi", "--export", "out/report.json"]);
        assert_eq!(cli.report_format(), ReportFormat::Json);

        let cli = parse(&["bdcalc", "--export", "out/report.json", "--format", "pdf", "roi"]);
        assert_eq!(cli.report_format(), ReportFormat::Pdf);
    }

    #[test]
    fn test_cli_validate_command() {
        let cli = parse(&["bdcalc", "validate", "/path/to/config.json"]);
        match cli.command {
            Some(Commands::Validate { file }) => {
                assert_eq!(file, PathBuf::from("/path/to/config.json"));
            }
            _ => panic!("Expected Validate command"),
        }
    }
}
