//! CSV export of expense records, produced client side.

use std::io::Write;

use api_types::expense::Expense;
use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};

use crate::error::Result;

pub const HEADER: [&str; 9] = [
    "ID",
    "Expense ID",
    "Title",
    "Amount",
    "Category",
    "Payment Method",
    "Date",
    "Notes",
    "Created At",
];

/// Writes `expenses` as CSV: a header row, then one row per record in the
/// given order. Every field is quoted; embedded quotes are doubled.
pub fn write_csv<W: Write>(expenses: &[Expense], out: W) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(out);

    writer.write_record(HEADER)?;
    for expense in expenses {
        writer.write_record(row(expense))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv_string(expenses: &[Expense]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(expenses, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// `expenses_2026-10-18.csv`
pub fn export_file_name(today: NaiveDate) -> String {
    format!("expenses_{}.csv", today.format("%Y-%m-%d"))
}

fn row(expense: &Expense) -> [String; 9] {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        expense.id.to_string(),
        text(&expense.expense_id),
        expense.title.clone(),
        expense.amount.to_string(),
        text(&expense.category),
        text(&expense.payment_method),
        text(&expense.expense_date),
        text(&expense.notes),
        text(&expense.created_at),
    ]
}
