use ratatui::{style::Style, text::Span};

use crate::{
    app::{AppState, ExpensesMode, Section},
    ui::theme::Theme,
};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Hints for whatever currently receives key presses.
pub fn context_hints(state: &AppState) -> Vec<KeyHint> {
    match state.section {
        Section::Dashboard => vec![
            KeyHint::new("[ ]", "range"),
            KeyHint::new("r", "refresh"),
        ],
        Section::Expenses => match state.expenses.mode {
            ExpensesMode::List => vec![
                KeyHint::new("←→", "page"),
                KeyHint::new("+-", "size"),
                KeyHint::new("/", "search"),
                KeyHint::new("f", "field"),
                KeyHint::new("c", "category"),
                KeyHint::new("s S", "sort"),
                KeyHint::new("[ ]", "range"),
                KeyHint::new("x", "clear"),
                KeyHint::new("a e d", "add/edit/del"),
                KeyHint::new("E", "csv"),
            ],
            ExpensesMode::Search | ExpensesMode::Category => vec![
                KeyHint::new("Enter", "done"),
                KeyHint::new("Esc", "back"),
            ],
            ExpensesMode::Form => vec![
                KeyHint::new("Tab", "next"),
                KeyHint::new("Enter", "save"),
                KeyHint::new("Esc", "cancel"),
            ],
            ExpensesMode::ConfirmDelete => vec![
                KeyHint::new("y", "delete"),
                KeyHint::new("n", "keep"),
            ],
        },
    }
}

/// Shortcuts that work everywhere outside text entry.
pub fn global_hints() -> Vec<KeyHint> {
    vec![
        KeyHint::new("1 2", "tabs"),
        KeyHint::new("w", "close"),
        KeyHint::new("v", "view"),
        KeyHint::new("m", "sound"),
        KeyHint::new("q", "quit"),
    ]
}
