//! User interface rendering module
//!
//! This module is organized into submodules for better maintainability:
//! - `header` - Title, tab bar, status and navigation bars
//! - `descriptions` - Formula and guide text per tab
//! - `forms` - Input form panel
//! - `results` - Result panel

mod descriptions;
mod forms;
mod header;
mod results;

pub use descriptions::{formula, summary};

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::config::CalculatorConfig;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::Paragraph,
};

/// Render the complete UI
pub fn render(
    f: &mut Frame,
    state: &AppState,
    config: &CalculatorConfig,
    keybinding_ctx: &KeybindingContext,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Tabs
            Constraint::Length(2), // Formula
            Constraint::Min(8),    // Form + results
            Constraint::Length(1), // Status
            Constraint::Length(1), // Navigation bar
        ])
        .split(f.area());

    let stage = state.active_stage;

    header::render_title(f, chunks[0], &config.report_title);
    header::render_tabs(f, chunks[1], state);
    f.render_widget(
        Paragraph::new(descriptions::description_lines(stage, config)),
        chunks[2],
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[3]);
    forms::render_form(f, body[0], state.form(stage));
    results::render_results(f, body[1], state, stage);

    header::render_status_bar(f, chunks[4], state);
    header::render_nav_bar(f, chunks[5], keybinding_ctx);

    if state.help_visible {
        let area = f.area();
        HelpOverlay::new(keybinding_ctx).render(f, area);
    }
}
