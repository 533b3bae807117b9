use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    app::{AppState, FormField},
    ui::{components::card::Card, screens::expenses::centered, theme::Theme},
};

/// Create/edit dialog drawn over the expenses list.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let Some(form) = &state.expenses.form else {
        return;
    };
    let theme = Theme::default();
    let title = if form.editing.is_some() {
        "Edit expense"
    } else {
        "New expense"
    };

    let mut lines = Vec::new();
    for field in FormField::ALL {
        let focused = field == form.focus;
        let label_style = if focused {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        };
        let cursor = if focused { "▏" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(format!("{:<9}", field.label()), label_style),
            Span::raw(format!("{}{cursor}", field.value(&form.draft))),
        ]));
        if let Some(error) = field.error(&form.errors) {
            lines.push(Line::from(Span::styled(
                format!("         {error}"),
                Style::default().fg(theme.error),
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Date as YYYY-MM-DD, blank fields are left empty",
        Style::default().fg(theme.dim),
    )));

    let height = lines.len() as u16 + 2;
    let rect = centered(area, 64, height);
    frame.render_widget(Clear, rect);
    Card::new(title, &theme)
        .focused(true)
        .render_with(frame, rect, Paragraph::new(lines));
}
