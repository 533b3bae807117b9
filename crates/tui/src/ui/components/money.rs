use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Formats `amount` with two decimals, thousands separators and the
/// currency symbol in front (`$1,234.50`, `-$3.00`).
#[must_use]
pub fn format_amount(amount: f64, symbol: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{:02}", cents % 100)
}

/// Amount of a single expense; expenses are shown as spending.
#[must_use]
pub fn styled_amount(amount: f64, symbol: &str, theme: &Theme) -> Span<'static> {
    let color = if amount > 0.0 { theme.warning } else { theme.text };
    Span::styled(format_amount(amount, symbol), Style::default().fg(color))
}

/// Bold variant for totals.
#[must_use]
pub fn styled_amount_bold(amount: f64, symbol: &str, theme: &Theme) -> Span<'static> {
    Span::styled(
        format_amount(amount, symbol),
        Style::default()
            .fg(theme.text)
            .add_modifier(Modifier::BOLD),
    )
}
