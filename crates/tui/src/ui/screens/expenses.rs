use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState,
    },
};

use api_types::expense::{Expense, SortOrder};
use listing::{CategoryFilter, ViewState, preferences::ViewMode};

use crate::{
    app::{AppState, ExpensesMode},
    ui::{
        components::{
            card::Card,
            money::{format_amount, styled_amount, styled_amount_bold},
            text::truncate,
        },
        screens::expense_form,
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_filters(frame, layout[0], state, &theme);
    render_summary(frame, layout[1], state, &theme);
    render_rows(frame, layout[2], state, &theme);
    render_pager(frame, layout[3], state, &theme);

    match state.expenses.mode {
        ExpensesMode::Form => expense_form::render(frame, area, state),
        ExpensesMode::ConfirmDelete => render_confirm_delete(frame, area, state, &theme),
        _ => {}
    }
}

fn render_filters(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let expenses = &state.expenses;
    let query = expenses.controller.query();
    let label = |text: &'static str| Span::styled(text, Style::default().fg(theme.dim));

    let search_style = if expenses.mode == ExpensesMode::Search {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };
    let cursor = if expenses.mode == ExpensesMode::Search { "▏" } else { "" };

    let category = if expenses.mode == ExpensesMode::Category {
        Span::styled(
            format!("{}▏", expenses.category_input),
            Style::default().fg(theme.accent),
        )
    } else {
        match &query.category {
            CategoryFilter::All => Span::raw("All"),
            CategoryFilter::Only(name) => Span::raw(name.clone()),
        }
    };

    let arrow = match query.sort_order {
        SortOrder::Asc => "↑",
        SortOrder::Desc => "↓",
    };

    let line = Line::from(vec![
        label("Search "),
        Span::styled(
            format!("({})", query.search_key.label()),
            Style::default().fg(theme.text_muted),
        ),
        Span::raw(": "),
        Span::styled(
            format!("{}{cursor}", expenses.controller.search_input()),
            search_style,
        ),
        Span::raw("   "),
        label("Category: "),
        category,
        Span::raw("   "),
        label("Range: "),
        Span::raw(expenses.preset.label()),
        Span::raw("   "),
        label("Sort: "),
        Span::raw(format!("{} {arrow}", query.sort_by.label())),
    ]);

    let card = Card::new("Expenses", theme).focused(expenses.mode.is_text_entry());
    card.render_with(frame, area, Paragraph::new(line));
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let summary = state.expenses.controller.summary();
    let symbol = state.currency_symbol();
    let line = Line::from(vec![
        Span::styled(" Matching ", Style::default().fg(theme.dim)),
        Span::raw(summary.count.to_string()),
        Span::styled("   Total ", Style::default().fg(theme.dim)),
        styled_amount_bold(summary.total, symbol, theme),
        Span::styled("   This month ", Style::default().fg(theme.dim)),
        Span::raw(format_amount(summary.month_total, symbol)),
        Span::styled("   Average ", Style::default().fg(theme.dim)),
        Span::raw(format_amount(summary.average, symbol)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_rows(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let controller = &state.expenses.controller;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    if controller.view() == ViewState::InitialLoading {
        frame.render_widget(
            Paragraph::new("Loading expenses...")
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }
    if controller.view().shows_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No expenses match these filters.",
                Style::default().fg(theme.dim),
            )))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    }

    let selected = (!controller.items().is_empty()).then_some(state.expenses.selected);
    let highlight = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let symbol = state.currency_symbol();

    match state.prefs.view_mode {
        ViewMode::Table => {
            let header = Row::new(["ID", "Date", "Title", "Amount", "Category", "Payment"])
                .style(Style::default().fg(theme.text_muted));
            let rows = controller
                .items()
                .iter()
                .map(|expense| table_row(expense, symbol, theme))
                .collect::<Vec<_>>();
            let widths = [
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Min(16),
                Constraint::Length(14),
                Constraint::Length(14),
                Constraint::Length(12),
            ];
            let table = Table::new(rows, widths)
                .header(header)
                .block(block)
                .row_highlight_style(highlight)
                .highlight_symbol("» ");
            let mut table_state = TableState::default().with_selected(selected);
            frame.render_stateful_widget(table, area, &mut table_state);
        }
        ViewMode::Compact => {
            let items = controller
                .items()
                .iter()
                .map(|expense| {
                    ListItem::new(Line::from(vec![
                        Span::raw(format!("{:<28} ", truncate(&expense.title, 28))),
                        styled_amount(expense.amount, symbol, theme),
                    ]))
                })
                .collect::<Vec<_>>();
            let list = List::new(items)
                .block(block)
                .highlight_style(highlight)
                .highlight_symbol("» ");
            let mut list_state = ListState::default().with_selected(selected);
            frame.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn table_row(expense: &Expense, symbol: &str, theme: &Theme) -> Row<'static> {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    Row::new(vec![
        Cell::from(text(&expense.expense_id)),
        Cell::from(text(&expense.expense_date)),
        Cell::from(expense.title.clone()),
        Cell::from(styled_amount(expense.amount, symbol, theme)),
        Cell::from(text(&expense.category)),
        Cell::from(text(&expense.payment_method)),
    ])
}

fn render_pager(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let controller = &state.expenses.controller;
    let query = controller.query();
    let status = if controller.view().is_transitioning() {
        Span::styled("  loading...", Style::default().fg(theme.warning))
    } else {
        Span::raw("")
    };

    let line = Line::from(vec![
        Span::styled(" Page ", Style::default().fg(theme.dim)),
        Span::raw(format!("{} of {}", query.page, controller.total_pages())),
        Span::styled("   Rows ", Style::default().fg(theme.dim)),
        Span::raw(query.page_size.label()),
        Span::styled("   Results ", Style::default().fg(theme.dim)),
        Span::raw(controller.total().to_string()),
        status,
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_confirm_delete(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(expense) = &state.expenses.pending_delete else {
        return;
    };
    let rect = centered(area, 50, 5);
    let lines = vec![
        Line::from(format!("Delete \"{}\"?", truncate(&expense.title, 36))),
        Line::from(Span::styled(
            format!(
                "{}  {}",
                expense.expense_date.as_deref().unwrap_or("-"),
                format_amount(expense.amount, state.currency_symbol())
            ),
            Style::default().fg(theme.dim),
        )),
        Line::from(Span::styled("y / n", Style::default().fg(theme.accent))),
    ];
    frame.render_widget(Clear, rect);
    Card::new("Confirm", theme)
        .focused(true)
        .render_with(frame, rect, Paragraph::new(lines).alignment(Alignment::Center));
}

/// A `width` x `height` rectangle centred in `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
