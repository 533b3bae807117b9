use api_types::expense::Expense;
use chrono::{Datelike, NaiveDate};

/// Aggregates over the full (unpaged) set of matching expenses.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub total: f64,
    /// Sum of the expenses dated in the calendar month of `today`.
    pub month_total: f64,
    pub average: f64,
}

impl Summary {
    pub fn from_expenses(expenses: &[Expense], today: NaiveDate) -> Self {
        let mut total = 0.0;
        let mut month_total = 0.0;

        for expense in expenses {
            total += expense.amount;
            if effective_date(expense)
                .is_some_and(|date| date.year() == today.year() && date.month() == today.month())
            {
                month_total += expense.amount;
            }
        }

        let count = expenses.len();
        let average = if count == 0 {
            0.0
        } else {
            total / count as f64
        };

        Self {
            count,
            total,
            month_total,
            average,
        }
    }
}

/// The date an expense is booked on: its own date, or the day it was created.
pub fn effective_date(expense: &Expense) -> Option<NaiveDate> {
    expense
        .expense_date
        .as_deref()
        .and_then(leading_date)
        .or_else(|| expense.created_at.as_deref().and_then(leading_date))
}

// Accepts both `YYYY-MM-DD` and `YYYY-MM-DD HH:MM:SS`.
fn leading_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
