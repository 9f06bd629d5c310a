//! Tests for Calculator Configuration
//!
//! These tests verify:
//! - Defaults match the documented constants
//! - JSON save/load round-trip through a temp file
//! - Partial files fall back to defaults
//! - Validation rejects unusable values

use bdcalc::config::{AVERAGE_FEE_RATE, COMMISSION_CEILING, CalculatorConfig};
use bdcalc::types::{BreakEvenFormula, RoiFormula};
use bdcalc::CalcError;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = CalculatorConfig::default();
    assert_eq!(config.fee_rate, AVERAGE_FEE_RATE);
    assert_eq!(config.commission_ceiling, COMMISSION_CEILING);
    assert_eq!(config.roi_formula, RoiFormula::Simple);
    assert_eq!(config.break_even_formula, BreakEvenFormula::EffectiveCommission);
    assert!(config.validate().is_ok());
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("bdcalc.json");

    let config = CalculatorConfig {
        roi_formula: RoiFormula::CommissionWeighted,
        break_even_formula: BreakEvenFormula::SplitCommission,
        report_title: "Q3 Affiliates".to_string(),
        ..Default::default()
    };
    config.save_to_file(&path).expect("save");

    let loaded = CalculatorConfig::load_from_file(&path).expect("load");
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("partial.json");
    std::fs::write(&path, r#"{ "roi_formula": "commission_weighted" }"#).expect("write");

    let loaded = CalculatorConfig::load_from_file(&path).expect("load");
    assert_eq!(loaded.roi_formula, RoiFormula::CommissionWeighted);
    assert_eq!(loaded.fee_rate, AVERAGE_FEE_RATE);
}

#[test]
fn test_load_missing_file_has_context() {
    let dir = TempDir::new().expect("temp dir");
    let err = CalculatorConfig::load_from_file(dir.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read configuration"));
}

#[test]
fn test_load_malformed_json() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ fee_rate: ").expect("write");

    let err = CalculatorConfig::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse configuration JSON"));
}

#[test]
fn test_validate_rejects_bad_values() {
    let zero_fee = CalculatorConfig {
        fee_rate: 0.0,
        ..Default::default()
    };
    assert!(zero_fee.validate().is_err());

    let ceiling_over_one = CalculatorConfig {
        commission_ceiling: 1.5,
        ..Default::default()
    };
    assert!(ceiling_over_one.validate().is_err());

    let blank_title = CalculatorConfig {
        report_title: "  ".to_string(),
        ..Default::default()
    };
    assert!(blank_title.validate().is_err());
}

#[test]
fn test_validation_failures_are_config_errors() {
    let config = CalculatorConfig {
        commission_ceiling: 0.0,
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, CalcError::Config(_)));
    assert!(err.to_string().contains("Commission ceiling"));
}
