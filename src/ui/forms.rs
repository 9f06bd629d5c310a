//! Form panel rendering

use crate::input::{FieldWidget, FormState};
use crate::theme::Styles;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Two lines per field: label, then value. The focused value is highlighted.
pub fn form_lines(form: &FormState) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(form.fields.len() * 3);

    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focused;
        let value = match &field.widget {
            FieldWidget::Text { value } if focused => format!(" {}_ ", value),
            FieldWidget::Text { value } => format!(" {} ", value),
            FieldWidget::Selection { .. } => format!(" ◀ {} ▶ ", field.display_value()),
        };
        let value_style = if focused { Styles::focused() } else { Styles::text() };
        let label_style = if focused { Styles::title() } else { Styles::text_muted() };

        lines.push(Line::from(Span::styled(field.label.clone(), label_style)));
        lines.push(Line::from(Span::styled(value, value_style)));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Enter: calculate  ↑/↓: field  ←/→: option",
        Styles::nav_hint(),
    )));
    lines
}

pub fn render_form(f: &mut Frame, area: Rect, form: &FormState) {
    let widget = Paragraph::new(form_lines(form))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Inputs ")
                .border_style(Styles::border_active()),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
