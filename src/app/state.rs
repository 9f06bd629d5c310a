//! Application state definitions
//!
//! Contains the state rendered by the UI: the active tab, one form per stage,
//! the session of completed results and the status line.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use crate::config::CalculatorConfig;
use crate::input::FormState;
use crate::session::SessionState;
use crate::theme::Severity;
use crate::types::Stage;

/// Message shown in the status bar
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), severity: Severity::Info }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), severity: Severity::Success }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), severity: Severity::Error }
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Tab currently shown
    pub active_stage: Stage,
    /// One form per stage, in canonical order
    pub forms: Vec<FormState>,
    /// Completed results carried between tabs
    pub session: SessionState,
    /// Last failure per stage, shown in place of results until the next success
    pub stage_errors: HashMap<Stage, String>,
    /// Status message for user feedback
    pub status: StatusMessage,
    /// Whether help overlay is visible
    pub help_visible: bool,
}

impl AppState {
    pub fn new(config: &CalculatorConfig) -> Self {
        Self {
            active_stage: Stage::default(),
            forms: Stage::iter().map(|s| FormState::for_stage(s, config)).collect(),
            session: SessionState::new(),
            stage_errors: HashMap::new(),
            status: StatusMessage::info("Welcome to the BDs Calculator. Press F1 for help."),
            help_visible: false,
        }
    }

    pub fn form(&self, stage: Stage) -> &FormState {
        &self.forms[stage.index()]
    }

    pub fn form_mut(&mut self, stage: Stage) -> &mut FormState {
        &mut self.forms[stage.index()]
    }

    pub fn active_form(&self) -> &FormState {
        self.form(self.active_stage)
    }

    pub fn active_form_mut(&mut self) -> &mut FormState {
        self.form_mut(self.active_stage)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&CalculatorConfig::default())
    }
}
