//! Help overlay component
//!
//! Centered popup listing every keybinding.

use super::keybindings::{HelpSection, KeybindingContext};
use crate::theme::{Colors, Styles};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    pub fn new(keybinding_ctx: &KeybindingContext) -> Self {
        Self {
            content: Self::build_content(&keybinding_ctx.get_help_content()),
        }
    }

    fn build_content(sections: &[HelpSection]) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = vec![
            Line::from(Span::styled("  BDs Calculator Help  ", Styles::title())),
            Line::from(""),
        ];

        for section in sections {
            lines.push(Line::from(Span::styled(
                format!("  {}  ", section.title),
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )));

            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        format!("{:<10}", key),
                        Style::default()
                            .fg(Colors::PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(description.clone(), Styles::text()),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "Press F1 to close",
            Styles::text_muted(),
        )));
        lines
    }

    /// Number of content lines (used to size the popup)
    pub fn height(&self) -> u16 {
        self.content.len() as u16 + 2
    }

    pub fn render(&self, f: &mut Frame, parent: Rect) {
        let area = centered_rect(60, self.height(), parent);
        f.render_widget(Clear, area);
        let help = Paragraph::new(self.content.clone()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .border_style(Styles::border_active())
                .style(Style::default().bg(Colors::BG_PRIMARY)),
        );
        f.render_widget(help, area);
    }
}

/// Rectangle of `width_percent` x `height` rows centered in `parent`.
pub fn centered_rect(width_percent: u16, height: u16, parent: Rect) -> Rect {
    let height = height.min(parent.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(parent);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}
