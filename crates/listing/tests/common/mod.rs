#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use api_types::{
    dashboard::{AccountSummary, DashboardStats},
    expense::{
        Expense, ExpenseInput, ExpenseList, PAGE_SIZE_ALL, PaginatedExpenses, SearchKey, SortBy,
        SortOrder,
    },
    settings::AppSettings,
};
use listing::{BackendError, ExpenseBackend};

/// In-memory backend following the list semantics of the real service,
/// with per-search-term latency and failure injection.
#[derive(Default)]
pub struct FakeBackend {
    rows: Mutex<Vec<Expense>>,
    settings: Mutex<AppSettings>,
    delays: Mutex<HashMap<String, Duration>>,
    failures: Mutex<HashMap<String, BackendError>>,
    unpaged_failure: Mutex<Option<BackendError>>,
    stats: Mutex<DashboardStats>,
    list_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn with_rows(rows: Vec<Expense>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    /// Every list call searching for `term` sleeps `delay` before answering.
    pub fn delay_term(&self, term: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(term.to_string(), delay);
    }

    pub fn fail_term(&self, term: &str, err: BackendError) {
        self.failures.lock().unwrap().insert(term.to_string(), err);
    }

    /// Fails only the unpaged (`PAGE_SIZE_ALL`) requests, so the page
    /// request of a cycle still succeeds.
    pub fn fail_unpaged(&self, err: BackendError) {
        *self.unpaged_failure.lock().unwrap() = Some(err);
    }

    pub fn set_stats(&self, stats: DashboardStats) {
        *self.stats.lock().unwrap() = stats;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn rows(&self) -> Vec<Expense> {
        self.rows.lock().unwrap().clone()
    }

    fn answer(&self, query: &ExpenseList) -> PaginatedExpenses {
        let rows = self.rows.lock().unwrap();
        let term = query
            .search_term
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_lowercase();
        let category = query
            .category_filter
            .as_deref()
            .filter(|c| !c.eq_ignore_ascii_case("all"))
            .map(str::to_lowercase);

        let mut matching: Vec<Expense> = rows
            .iter()
            .filter(|row| row.deleted_at.is_none())
            .filter(|row| {
                if term.is_empty() {
                    return true;
                }
                let column = match query.search_key.unwrap_or_default() {
                    SearchKey::Title => Some(row.title.clone()),
                    SearchKey::ExpenseId => row.expense_id.clone(),
                    SearchKey::Category => row.category.clone(),
                    SearchKey::PaymentMethod => row.payment_method.clone(),
                };
                column.unwrap_or_default().to_lowercase().contains(&term)
            })
            .filter(|row| match &category {
                Some(category) => row
                    .category
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase() == *category),
                None => true,
            })
            .filter(|row| {
                let date = row_date(row);
                query.date_from.as_deref().is_none_or(|from| date.as_str() >= from)
                    && query.date_to.as_deref().is_none_or(|to| date.as_str() <= to)
            })
            .cloned()
            .collect();

        match query.sort_by.unwrap_or_default() {
            SortBy::Title => matching.sort_by(|a, b| a.title.cmp(&b.title)),
            SortBy::Amount => matching.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
            SortBy::ExpenseDate => matching.sort_by_key(row_date),
            SortBy::CreatedAt => matching.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortBy::ExpenseId => matching.sort_by_key(|row| row.id),
        }
        if query.sort_order.unwrap_or_default() == SortOrder::Desc {
            matching.reverse();
        }

        let total = matching.len() as i64;
        let requested = query.page_size.unwrap_or(10);
        if requested <= 0 {
            return PaginatedExpenses {
                expenses: matching,
                total,
                page: 1,
                page_size: total,
                total_pages: if total == 0 { 0 } else { 1 },
            };
        }

        let page_size = requested.clamp(5, 100);
        let page = query.page.unwrap_or(1).max(1);
        let offset = ((page - 1) * page_size) as usize;
        let expenses = matching
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect();
        PaginatedExpenses {
            expenses,
            total,
            page,
            page_size,
            total_pages: (total + page_size - 1) / page_size,
        }
    }
}

impl ExpenseBackend for FakeBackend {
    async fn list(&self, query: ExpenseList) -> Result<PaginatedExpenses, BackendError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let term = query.search_term.clone().unwrap_or_default();
        let delay = self.delays.lock().unwrap().get(&term).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let failure = self.failures.lock().unwrap().get(&term).cloned();
        if let Some(err) = failure {
            return Err(err);
        }
        if query.page_size == Some(PAGE_SIZE_ALL) {
            let failure = self.unpaged_failure.lock().unwrap().clone();
            if let Some(err) = failure {
                return Err(err);
            }
        }
        Ok(self.answer(&query))
    }

    async fn create(&self, input: ExpenseInput) -> Result<i64, BackendError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
        rows.push(Expense {
            id,
            expense_id: Some(format!("EXP-{id:05}")),
            title: input.title,
            amount: input.amount,
            category: input.category,
            payment_method: input.payment_method,
            notes: input.notes,
            expense_date: input.expense_date,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        });
        Ok(id)
    }

    async fn update(&self, id: i64, input: ExpenseInput) -> Result<(), BackendError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(BackendError::NotFound)?;
        row.title = input.title;
        row.amount = input.amount;
        row.category = input.category;
        row.payment_method = input.payment_method;
        row.notes = input.notes;
        row.expense_date = input.expense_date;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), BackendError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(BackendError::NotFound)?;
        row.deleted_at = Some("2026-10-18 12:00:00".to_string());
        Ok(())
    }

    async fn settings(&self) -> Result<AppSettings, BackendError> {
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn update_settings(&self, settings: AppSettings) -> Result<(), BackendError> {
        *self.settings.lock().unwrap() = settings;
        Ok(())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, BackendError> {
        Ok(self.stats.lock().unwrap().clone())
    }

    async fn account_summary(
        &self,
        date_from: Option<String>,
        date_to: Option<String>,
    ) -> Result<AccountSummary, BackendError> {
        let rows = self.rows.lock().unwrap();
        let in_range = |row: &&Expense| {
            let date = row_date(row);
            date_from.as_deref().is_none_or(|from| date.as_str() >= from)
                && date_to.as_deref().is_none_or(|to| date.as_str() <= to)
        };
        let live: Vec<&Expense> = rows
            .iter()
            .filter(|row| row.deleted_at.is_none())
            .filter(in_range)
            .collect();
        let total_expenses: f64 = live.iter().map(|row| row.amount).sum();
        let total_income = self.stats.lock().unwrap().total_revenue;
        Ok(AccountSummary {
            total_income,
            total_expenses,
            net_balance: total_income - total_expenses,
            total_orders: 0,
            total_expense_records: live.len() as i64,
            this_month_income: 0.0,
            this_month_expenses: 0.0,
        })
    }
}

fn row_date(row: &Expense) -> String {
    row.expense_date
        .clone()
        .or_else(|| row.created_at.as_deref().map(|c| c.chars().take(10).collect()))
        .unwrap_or_default()
}

pub fn expense(id: i64, title: &str, amount: f64, date: &str) -> Expense {
    Expense {
        id,
        expense_id: Some(format!("EXP-{id:05}")),
        title: title.to_string(),
        amount,
        category: Some("Supplies".to_string()),
        payment_method: Some("Cash".to_string()),
        notes: None,
        expense_date: Some(date.to_string()),
        created_at: Some(format!("{date} 09:00:00")),
        updated_at: None,
        deleted_at: None,
    }
}

/// `ink_rows` expenses titled "Printer ink #n" plus `other_rows` unrelated ones.
pub fn catalogue(ink_rows: i64, other_rows: i64) -> Vec<Expense> {
    let mut rows = Vec::new();
    for n in 1..=ink_rows {
        rows.push(expense(n, &format!("Printer ink #{n}"), 10.0, "2026-10-05"));
    }
    for n in 1..=other_rows {
        let id = ink_rows + n;
        rows.push(expense(id, &format!("Rent #{n}"), 100.0, "2026-09-01"));
    }
    rows
}
