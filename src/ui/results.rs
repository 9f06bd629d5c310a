//! Result panel rendering

use crate::app::AppState;
use crate::session::ROI_NOT_READY_MESSAGE;
use crate::theme::{Styles, Theme};
use crate::types::Stage;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Lines shown for `stage`: its last error, its result rows or a prompt.
pub fn result_lines(state: &AppState, stage: Stage) -> Vec<Line<'static>> {
    if let Some(err) = state.stage_errors.get(&stage) {
        return vec![Line::from(Span::styled(err.clone(), Styles::error()))];
    }

    let Some(result) = state.session.result(stage) else {
        if stage == Stage::Scenario && !state.session.is_completed(Stage::Roi) {
            return vec![Line::from(Span::styled(ROI_NOT_READY_MESSAGE, Styles::info()))];
        }
        return vec![Line::from(Span::styled(
            "Press Enter to calculate",
            Styles::text_muted(),
        ))];
    };

    let headline = result.commission_level().map(Theme::commission_style);
    let rows = result.rows();
    let last = rows.len().saturating_sub(1);

    rows.into_iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let value_style = match headline {
                Some(style) if i == last => style,
                _ => Styles::text(),
            };
            Line::from(vec![
                Span::styled(format!("{}: ", label), Styles::text_muted()),
                Span::styled(value, value_style),
            ])
        })
        .collect()
}

pub fn render_results(f: &mut Frame, area: Rect, state: &AppState, stage: Stage) {
    let widget = Paragraph::new(result_lines(state, stage))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", stage.heading()))
                .border_style(Styles::border_inactive()),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}
