use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use listing::ViewState;

use crate::{
    app::{AppState, RECENT_ROWS},
    ui::{
        components::{
            card::{Card, StatCard},
            money::{format_amount, styled_amount},
            text::truncate,
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    render_headline(frame, layout[0], state, &theme);
    render_summary(frame, layout[1], state, &theme);
    render_recent(frame, layout[2], state, &theme);
}

fn render_headline(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let Some(headline) = &state.dashboard.headline else {
        for (column, title) in columns.iter().zip(["Revenue", "Profit", "Orders", "Net"]) {
            StatCard::new(title, "...", theme).render(frame, *column);
        }
        return;
    };

    let symbol = state.currency_symbol();
    let stats = &headline.stats;
    let account = &headline.account;
    StatCard::new("Revenue", format_amount(stats.total_revenue, symbol), theme)
        .render(frame, columns[0]);
    StatCard::new("Profit", format_amount(stats.total_profit, symbol), theme)
        .subtitle(format!("cargo {}", format_amount(stats.total_cargo_fee, symbol)))
        .render(frame, columns[1]);
    StatCard::new("Orders", stats.total_orders.to_string(), theme)
        .subtitle(format!("{} customers", stats.total_customers))
        .render(frame, columns[2]);
    StatCard::new("Net", format_amount(account.net_balance, symbol), theme)
        .subtitle(state.dashboard.preset.label())
        .render(frame, columns[3]);
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let summary = state.dashboard.controller.summary();
    let symbol = state.currency_symbol();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    StatCard::new("Expenses", summary.count.to_string(), theme)
        .subtitle(state.dashboard.preset.label())
        .render(frame, columns[0]);
    StatCard::new("Total", format_amount(summary.total, symbol), theme).render(frame, columns[1]);
    StatCard::new("This month", format_amount(summary.month_total, symbol), theme)
        .render(frame, columns[2]);
    StatCard::new("Average", format_amount(summary.average, symbol), theme)
        .render(frame, columns[3]);
}

fn render_recent(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let controller = &state.dashboard.controller;
    let title = format!(
        "Last {RECENT_ROWS} expenses · {}{}",
        state.dashboard.preset.label(),
        if controller.is_loading() { " · loading" } else { "" }
    );
    let card = Card::new(title, theme);

    if controller.view() == ViewState::InitialLoading {
        let text = Paragraph::new("Loading...").alignment(Alignment::Center);
        card.render_with(frame, area, text);
        return;
    }
    if controller.view().shows_empty() {
        let text = Paragraph::new(Line::from(Span::styled(
            "No expenses in this range.",
            Style::default().fg(theme.dim),
        )))
        .alignment(Alignment::Center);
        card.render_with(frame, area, text);
        return;
    }

    let symbol = state.currency_symbol();
    let items = controller
        .items()
        .iter()
        .map(|expense| {
            let date = expense.expense_date.as_deref().unwrap_or("-");
            let category = expense.category.as_deref().unwrap_or("");
            ListItem::new(Line::from(vec![
                Span::styled(format!("{date}  "), Style::default().fg(theme.dim)),
                Span::raw(format!("{:<32} ", truncate(&expense.title, 32))),
                styled_amount(expense.amount, symbol, theme),
                Span::styled(format!("  {category}"), Style::default().fg(theme.text_muted)),
            ]))
        })
        .collect::<Vec<_>>();

    card.render_with(frame, area, List::new(items));
}
