//! Header, tab bar and status bar rendering

use crate::app::AppState;
use crate::components::keybindings::KeybindingContext;
use crate::theme::{Colors, Styles, Theme};
use crate::types::Stage;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};
use strum::IntoEnumIterator;

/// Render a title section
pub fn render_title(f: &mut Frame, area: Rect, title: &str) {
    let title_widget = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .style(Styles::title());
    f.render_widget(title_widget, area);
}

/// Render the stage tab bar, marking completed stages
pub fn render_tabs(f: &mut Frame, area: Rect, state: &AppState) {
    let titles: Vec<Line> = Stage::iter()
        .map(|stage| {
            let marker = if state.session.is_completed(stage) { " ✓" } else { "" };
            Line::from(format!("{}{}", stage.tab_title(), marker))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(state.active_stage.index())
        .style(Styles::text_muted())
        .highlight_style(
            Style::default()
                .fg(Colors::SECONDARY)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

/// Render the status message
pub fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let status = Paragraph::new(Span::styled(
        format!(" {}", state.status.text),
        Theme::severity_style(state.status.severity),
    ));
    f.render_widget(status, area);
}

/// Render the navigation hints
pub fn render_nav_bar(f: &mut Frame, area: Rect, keybinding_ctx: &KeybindingContext) {
    let spans: Vec<Span> = keybinding_ctx
        .get_nav_items()
        .into_iter()
        .flat_map(|(key, description)| {
            vec![
                Span::styled(format!(" {} ", key), Styles::title()),
                Span::styled(format!("{}  ", description), Styles::nav_hint()),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
