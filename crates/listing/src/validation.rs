//! Form-level checks run before anything is sent to the backend.

use api_types::expense::{Expense, ExpenseInput};
use chrono::NaiveDate;

pub const MAX_TITLE_LEN: usize = 120;
pub const MAX_LABEL_LEN: usize = 60;
pub const MAX_NOTES_LEN: usize = 500;

/// Raw form fields, as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: String,
    pub category: String,
    pub expense_date: String,
    pub payment_method: String,
    pub notes: String,
}

impl ExpenseDraft {
    /// Pre-fills the form for editing an existing record.
    pub fn from_expense(expense: &Expense) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            title: expense.title.clone(),
            amount: expense.amount.to_string(),
            category: text(&expense.category),
            expense_date: text(&expense.expense_date),
            payment_method: text(&expense.payment_method),
            notes: text(&expense.notes),
        }
    }

    /// Checks every field and returns the sanitized payload, or the message
    /// to show next to each offending field.
    pub fn validate(&self) -> Result<ExpenseInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.title = Some("Title is required.".to_string());
        } else if title.chars().count() > MAX_TITLE_LEN {
            errors.title = Some(format!("At most {MAX_TITLE_LEN} characters."));
        }

        let amount = match self.amount.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => value,
            Ok(_) => {
                errors.amount = Some("Amount must be zero or more.".to_string());
                0.0
            }
            Err(_) => {
                errors.amount = Some("Amount must be a number.".to_string());
                0.0
            }
        };

        let category = sanitize_optional(&self.category);
        if exceeds(&category, MAX_LABEL_LEN) {
            errors.category = Some(format!("At most {MAX_LABEL_LEN} characters."));
        }

        let payment_method = sanitize_optional(&self.payment_method);
        if exceeds(&payment_method, MAX_LABEL_LEN) {
            errors.payment_method = Some(format!("At most {MAX_LABEL_LEN} characters."));
        }

        let notes = sanitize_optional(&self.notes);
        if exceeds(&notes, MAX_NOTES_LEN) {
            errors.notes = Some(format!("At most {MAX_NOTES_LEN} characters."));
        }

        let expense_date = sanitize_optional(&self.expense_date);
        if let Some(date) = &expense_date
            && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err()
        {
            errors.expense_date = Some("Use the YYYY-MM-DD format.".to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ExpenseInput {
            title: title.to_string(),
            amount,
            category,
            expense_date,
            payment_method,
            notes,
        })
    }
}

/// Inline message per form field; `None` means the field is fine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub title: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    pub expense_date: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.expense_date.is_none()
            && self.payment_method.is_none()
            && self.notes.is_none()
    }
}

/// Trims the value; blank input becomes `None`.
pub fn sanitize_optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn exceeds(value: &Option<String>, max: usize) -> bool {
    value.as_ref().is_some_and(|v| v.chars().count() > max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, amount: &str) -> ExpenseDraft {
        ExpenseDraft {
            title: title.to_string(),
            amount: amount.to_string(),
            ..ExpenseDraft::default()
        }
    }

    #[test]
    fn valid_draft_is_trimmed() {
        let mut form = draft("  Printer ink ", "12.5");
        form.category = "  Supplies ".to_string();
        form.notes = "   ".to_string();
        form.expense_date = "2026-10-01".to_string();

        let input = form.validate().unwrap();
        assert_eq!(input.title, "Printer ink");
        assert_eq!(input.amount, 12.5);
        assert_eq!(input.category.as_deref(), Some("Supplies"));
        assert_eq!(input.notes, None);
        assert_eq!(input.expense_date.as_deref(), Some("2026-10-01"));
    }

    #[test]
    fn title_is_required() {
        let errors = draft("   ", "1").validate().unwrap_err();
        assert!(errors.title.is_some());
        assert!(errors.amount.is_none());
    }

    #[test]
    fn amount_must_be_a_non_negative_number() {
        assert!(draft("Rent", "-1").validate().unwrap_err().amount.is_some());
        assert!(draft("Rent", "abc").validate().unwrap_err().amount.is_some());
        assert!(draft("Rent", "NaN").validate().unwrap_err().amount.is_some());
        assert!(draft("Rent", "inf").validate().unwrap_err().amount.is_some());
        assert!(draft("Rent", "0").validate().is_ok());
    }

    #[test]
    fn length_limits_are_enforced() {
        let mut form = draft(&"x".repeat(MAX_TITLE_LEN + 1), "1");
        form.notes = "n".repeat(MAX_NOTES_LEN + 1);
        form.category = "c".repeat(MAX_LABEL_LEN + 1);
        let errors = form.validate().unwrap_err();
        assert!(errors.title.is_some());
        assert!(errors.notes.is_some());
        assert!(errors.category.is_some());
        assert!(errors.payment_method.is_none());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let mut form = draft("Rent", "1");
        form.expense_date = "18/10/2026".to_string();
        assert!(form.validate().unwrap_err().expense_date.is_some());
    }

    #[test]
    fn edit_form_round_trips_existing_record() {
        let expense = Expense {
            id: 4,
            expense_id: Some("EXP-00004".to_string()),
            title: "Toner".to_string(),
            amount: 30.0,
            category: Some("Supplies".to_string()),
            payment_method: None,
            notes: None,
            expense_date: Some("2026-10-02".to_string()),
            created_at: None,
            updated_at: None,
            deleted_at: None,
        };
        let input = ExpenseDraft::from_expense(&expense).validate().unwrap();
        assert_eq!(input.title, "Toner");
        assert_eq!(input.amount, 30.0);
        assert_eq!(input.payment_method, None);
    }
}
