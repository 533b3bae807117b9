use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::Section, ui::theme::Theme};

/// Renders the open tabs, numbered by their shortcut.
pub fn render_tabs(
    frame: &mut Frame<'_>,
    area: Rect,
    open: &[Section],
    active: Section,
    theme: &Theme,
) {
    let mut spans = vec![Span::raw(" ")];

    for (i, section) in open.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }

        let label = format!("{} {}", shortcut(*section), section.label());
        if *section == active {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(label, Style::default().fg(theme.text_muted)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn shortcut(section: Section) -> char {
    match section {
        Section::Dashboard => '1',
        Section::Expenses => '2',
    }
}
