//! Application module
//!
//! Contains the main application logic, state management, and event handling.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, StatusMessage)
//! - Main module - App struct and event loop

mod state;

pub use state::{AppState, StatusMessage};

use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::Backend};
use tracing::{debug, info};

use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::engine::Calculator;
use crate::input::FormAction;
use crate::report::export_report;
use crate::types::ReportFormat;
use crate::ui;

/// File name stem used for exports when no path was given.
pub const DEFAULT_REPORT_STEM: &str = "bdcalc-report";

/// Main application struct
pub struct App {
    state: AppState,
    calculator: Calculator,
    keybinding_context: KeybindingContext,
    /// Export path without extension; the format picks the extension
    report_base: PathBuf,
    should_quit: bool,
}

impl App {
    /// Create a new application instance
    pub fn new(calculator: Calculator, report_path: Option<&Path>) -> Self {
        info!("Creating new App instance");
        let report_base = report_path
            .map(|p| p.with_extension(""))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_STEM));

        Self {
            state: AppState::new(calculator.config()),
            calculator,
            keybinding_context: KeybindingContext::new(),
            report_base,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Where an export in `format` is written
    pub fn report_path(&self, format: ReportFormat) -> PathBuf {
        self.report_base.with_extension(format.extension())
    }

    /// Run the main loop until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        info!("Starting main application loop");

        while !self.should_quit {
            terminal.draw(|f| {
                ui::render(
                    f,
                    &self.state,
                    self.calculator.config(),
                    &self.keybinding_context,
                )
            })?;

            if crossterm::event::poll(Duration::from_millis(100))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    // Ignore key release/repeat events reported by some terminals
                    if key_event.kind == KeyEventKind::Press {
                        self.handle_key_event(key_event);
                    }
                }
            }
        }

        info!("Main loop finished");
        Ok(())
    }

    /// Handle one key press. Returns true when the app should exit.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        let action = self.keybinding_context.resolve(&key);

        if self.state.help_visible {
            match action {
                Some(KeyAction::Quit) if is_interrupt(&key) => self.should_quit = true,
                Some(KeyAction::Help) | Some(KeyAction::Quit) => self.state.help_visible = false,
                _ => {}
            }
            return self.should_quit;
        }

        match action {
            Some(KeyAction::NextTab) => self.state.active_stage = self.state.active_stage.next(),
            Some(KeyAction::PreviousTab) => {
                self.state.active_stage = self.state.active_stage.previous()
            }
            Some(KeyAction::Calculate) => self.calculate(),
            Some(KeyAction::ExportPdf) => self.export(ReportFormat::Pdf),
            Some(KeyAction::ExportJson) => self.export(ReportFormat::Json),
            Some(KeyAction::ClearSession) => {
                self.state.session.clear();
                self.state.stage_errors.clear();
                self.state.status = StatusMessage::info("All results cleared.");
            }
            Some(KeyAction::Help) => self.state.help_visible = true,
            Some(KeyAction::Quit) => self.should_quit = true,
            Some(KeyAction::FormEdit) | None => {
                if self.state.active_form_mut().handle_key(key) == FormAction::Submit {
                    self.calculate();
                }
            }
        }

        self.should_quit
    }

    /// Evaluate the active tab's form
    fn calculate(&mut self) {
        let stage = self.state.active_stage;
        let request = self.state.active_form().to_request();
        debug!(%stage, ?request, "Calculate requested");

        match self.calculator.run(&mut self.state.session, &request) {
            Ok(_) => {
                self.state.stage_errors.remove(&stage);
                self.state.status = StatusMessage::success(format!("{} calculated.", stage));
            }
            Err(e) => {
                // Only errors the form can fix are pinned to the results panel
                if e.is_recoverable() {
                    self.state.stage_errors.insert(stage, e.to_string());
                }
                self.state.status = StatusMessage::error(e.to_string());
            }
        }
    }

    fn export(&mut self, format: ReportFormat) {
        let path = self.report_path(format);
        let title = self.calculator.config().report_title.clone();

        self.state.status = match export_report(&self.state.session, &title, format, &path) {
            Ok(bytes) => StatusMessage::success(format!(
                "Report saved to {} ({} bytes).",
                path.display(),
                bytes
            )),
            Err(e) => StatusMessage::error(format!("Export failed: {}", e)),
        };
    }
}

/// Ctrl-C quits from anywhere, including the help overlay.
fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
