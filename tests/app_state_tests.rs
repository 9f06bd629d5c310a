//! Tests for Application State Management
//!
//! These tests verify:
//! - AppState default initialization
//! - Tab navigation and key handling through App
//! - Calculation results, errors and clearing
//! - Exports triggered from the keyboard

use bdcalc::app::{App, AppState};
use bdcalc::input::FieldId;
use bdcalc::session::ROI_NOT_READY_MESSAGE;
use bdcalc::theme::Severity;
use bdcalc::types::{ReportFormat, Stage};
use bdcalc::Calculator;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(app: &mut App, c: char) -> bool {
    app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

// =============================================================================
// AppState Default Tests
// =============================================================================

#[test]
fn test_app_state_default_stage_is_first_tab() {
    let state = AppState::default();
    assert_eq!(state.active_stage, Stage::EffectiveCommission);
}

#[test]
fn test_app_state_default_has_welcome_message() {
    let state = AppState::default();
    assert!(state.status.text.contains("Welcome"));
    assert_eq!(state.status.severity, Severity::Info);
}

#[test]
fn test_app_state_has_one_form_per_stage() {
    let state = AppState::default();
    assert_eq!(state.forms.len(), 6);
    assert_eq!(state.form(Stage::Scenario).stage, Stage::Scenario);
}

#[test]
fn test_app_state_default_help_not_visible() {
    let state = AppState::default();
    assert!(!state.help_visible);
    assert!(state.session.is_empty());
}

// =============================================================================
// Navigation Tests
// =============================================================================

#[test]
fn test_tab_cycles_through_stages() {
    let mut app = App::new(Calculator::default(), None);

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.state().active_stage, Stage::MaxPayments);

    press(&mut app, KeyCode::BackTab);
    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.state().active_stage, Stage::Scenario);
}

#[test]
fn test_quit_keys() {
    let mut app = App::new(Calculator::default(), None);
    assert!(ctrl(&mut app, 'c'));
    assert!(app.should_quit());

    let mut app = App::new(Calculator::default(), None);
    assert!(press(&mut app, KeyCode::Esc));
}

#[test]
fn test_help_overlay_esc_closes_ctrl_c_quits() {
    let mut app = App::new(Calculator::default(), None);
    press(&mut app, KeyCode::F(1));
    assert!(!press(&mut app, KeyCode::Esc));
    assert!(!app.state().help_visible);

    press(&mut app, KeyCode::F(1));
    assert!(ctrl(&mut app, 'c'));
    assert!(app.should_quit());
}

// =============================================================================
// Calculation Tests
// =============================================================================

#[test]
fn test_enter_calculates_active_stage() {
    let mut app = App::new(Calculator::default(), None);
    app.state_mut()
        .form_mut(Stage::EffectiveCommission)
        .set_text(FieldId::Payments, "5,000");

    press(&mut app, KeyCode::Enter);

    assert!(app.state().session.is_completed(Stage::EffectiveCommission));
    assert_eq!(app.state().status.severity, Severity::Success);
}

#[test]
fn test_invalid_input_recorded_as_stage_error() {
    let mut app = App::new(Calculator::default(), None);

    // bonus and payments both default to zero
    press(&mut app, KeyCode::Enter);

    let state = app.state();
    assert!(!state.session.is_completed(Stage::EffectiveCommission));
    assert!(state.stage_errors.contains_key(&Stage::EffectiveCommission));
    assert_eq!(state.status.severity, Severity::Error);
}

#[test]
fn test_scenario_requires_roi_then_succeeds() {
    let mut app = App::new(Calculator::default(), None);
    app.state_mut().active_stage = Stage::Scenario;

    press(&mut app, KeyCode::Enter);
    assert_eq!(
        app.state().stage_errors.get(&Stage::Scenario).map(String::as_str),
        Some(ROI_NOT_READY_MESSAGE)
    );

    app.state_mut().active_stage = Stage::Roi;
    press(&mut app, KeyCode::Enter);
    app.state_mut().active_stage = Stage::Scenario;
    press(&mut app, KeyCode::Enter);

    assert!(app.state().session.is_completed(Stage::Scenario));
    assert!(!app.state().stage_errors.contains_key(&Stage::Scenario));
}

#[test]
fn test_clear_session() {
    let mut app = App::new(Calculator::default(), None);
    app.state_mut().active_stage = Stage::Roi;
    press(&mut app, KeyCode::Enter);
    assert!(!app.state().session.is_empty());

    ctrl(&mut app, 'r');

    assert!(app.state().session.is_empty());
    assert!(app.state().stage_errors.is_empty());
}

// =============================================================================
// Export Tests
// =============================================================================

#[test]
fn test_keyboard_exports_both_formats() {
    let dir = TempDir::new().expect("temp dir");
    let base = dir.path().join("weekly.pdf");
    let mut app = App::new(Calculator::default(), Some(&base));

    app.state_mut().active_stage = Stage::Roi;
    press(&mut app, KeyCode::Enter);

    ctrl(&mut app, 'p');
    ctrl(&mut app, 'j');

    assert!(app.report_path(ReportFormat::Pdf).exists());
    let json = std::fs::read_to_string(app.report_path(ReportFormat::Json)).expect("json export");
    assert!(json.contains("ROI Calculation"));
    assert_eq!(app.state().status.severity, Severity::Success);
}
