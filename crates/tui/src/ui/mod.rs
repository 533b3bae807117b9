pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Section};
use theme::Theme;

use components::hints::{context_hints, global_hints, hint_separator, hints_to_spans};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], &state.open_tabs, state.section, &theme);

    match state.section {
        Section::Dashboard => screens::dashboard::render(frame, layout[2], state),
        Section::Expenses => screens::expenses::render(frame, layout[2], state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
    components::toast::render(frame, area, state.toast.as_ref(), &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let loading = state.dashboard.controller.is_loading() || state.expenses.controller.is_loading();
    let (status, status_style) = if loading {
        ("SYNC", Style::default().fg(theme.warning))
    } else {
        ("OK", Style::default().fg(theme.positive))
    };
    let sound = if state.prefs.sound_effect { "on" } else { "off" };

    let line = Line::from(vec![
        Span::styled("Server", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Today", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.today.format("%Y-%m-%d"))),
        Span::styled("Currency", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.settings.currency)),
        Span::styled("Sound", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {sound}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = hints_to_spans(&context_hints(state), theme);
    if !state.is_text_entry() {
        parts.push(hint_separator(theme));
        parts.extend(hints_to_spans(&global_hints(), theme));
    }
    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
