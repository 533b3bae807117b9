use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;

    /// Page size value understood by the backend as "no limit".
    ///
    /// Any value `<= 0` disables the limit server side; the client always sends
    /// this one.
    pub const PAGE_SIZE_ALL: i64 = -1;

    /// Column matched by the free-text search.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub enum SearchKey {
        #[default]
        Title,
        ExpenseId,
        Category,
        PaymentMethod,
    }

    impl SearchKey {
        pub const ALL: [SearchKey; 4] = [
            Self::Title,
            Self::ExpenseId,
            Self::Category,
            Self::PaymentMethod,
        ];

        pub fn label(self) -> &'static str {
            match self {
                Self::Title => "Title",
                Self::ExpenseId => "Expense ID",
                Self::Category => "Category",
                Self::PaymentMethod => "Payment method",
            }
        }
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SortBy {
        Title,
        Amount,
        #[default]
        ExpenseDate,
        CreatedAt,
        ExpenseId,
    }

    impl SortBy {
        pub const ALL: [SortBy; 5] = [
            Self::ExpenseDate,
            Self::Amount,
            Self::Title,
            Self::CreatedAt,
            Self::ExpenseId,
        ];

        pub fn label(self) -> &'static str {
            match self {
                Self::Title => "Title",
                Self::Amount => "Amount",
                Self::ExpenseDate => "Date",
                Self::CreatedAt => "Created",
                Self::ExpenseId => "ID",
            }
        }
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SortOrder {
        Asc,
        #[default]
        Desc,
    }

    impl SortOrder {
        pub fn toggled(self) -> Self {
            match self {
                Self::Asc => Self::Desc,
                Self::Desc => Self::Asc,
            }
        }
    }

    /// A stored expense as returned by the backend.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Expense {
        pub id: i64,
        /// Human facing id (e.g. `EXP-00042`).
        pub expense_id: Option<String>,
        pub title: String,
        pub amount: f64,
        pub category: Option<String>,
        pub payment_method: Option<String>,
        pub notes: Option<String>,
        /// `YYYY-MM-DD`.
        pub expense_date: Option<String>,
        /// `YYYY-MM-DD HH:MM:SS` as stored by the backend.
        pub created_at: Option<String>,
        #[serde(default)]
        pub updated_at: Option<String>,
        #[serde(default)]
        pub deleted_at: Option<String>,
    }

    /// Request body for listing expenses.
    ///
    /// Every field is optional: the backend applies its own defaults and
    /// clamps, the client sends already-normalized values.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseList {
        pub page: Option<i64>,
        /// `PAGE_SIZE_ALL` (or any value `<= 0`) returns every matching row.
        pub page_size: Option<i64>,
        pub search_key: Option<SearchKey>,
        pub search_term: Option<String>,
        /// Category name, or `"all"`.
        pub category_filter: Option<String>,
        /// Inclusive, `YYYY-MM-DD`.
        pub date_from: Option<String>,
        /// Inclusive, `YYYY-MM-DD`.
        pub date_to: Option<String>,
        pub sort_by: Option<SortBy>,
        pub sort_order: Option<SortOrder>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct PaginatedExpenses {
        pub expenses: Vec<Expense>,
        pub total: i64,
        pub page: i64,
        pub page_size: i64,
        pub total_pages: i64,
    }

    /// Request body for creating or updating an expense.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseInput {
        pub title: String,
        pub amount: f64,
        pub category: Option<String>,
        pub expense_date: Option<String>,
        pub payment_method: Option<String>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub id: i64,
        #[serde(flatten)]
        pub input: ExpenseInput,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseDelete {
        pub id: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub id: i64,
    }
}

pub mod settings {
    use super::*;

    /// Application settings persisted by the backend.
    ///
    /// Unknown or missing keys fall back to the defaults below, so older
    /// backends keep working.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct AppSettings {
        pub language: String,
        pub sound_effect: bool,
        pub theme: String,
        pub accent_color: String,
        pub currency: String,
        pub currency_symbol: String,
        pub font_size: String,
    }

    impl Default for AppSettings {
        fn default() -> Self {
            Self {
                language: "en".to_string(),
                sound_effect: true,
                theme: "light".to_string(),
                accent_color: "blue".to_string(),
                currency: "USD".to_string(),
                currency_symbol: "$".to_string(),
                font_size: "normal".to_string(),
            }
        }
    }
}

pub mod dashboard {
    use super::*;

    /// Shop-wide headline figures. Recent orders are not carried: orders are
    /// not modelled on this client.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct DashboardStats {
        pub total_revenue: f64,
        pub total_profit: f64,
        pub total_cargo_fee: f64,
        pub total_orders: i64,
        pub total_customers: i64,
    }

    /// Request body for the account summary. Both bounds are inclusive
    /// `YYYY-MM-DD`; absent means unbounded.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct AccountSummaryQuery {
        pub date_from: Option<String>,
        pub date_to: Option<String>,
    }

    /// Income from orders against recorded expenses.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct AccountSummary {
        pub total_income: f64,
        pub total_expenses: f64,
        pub net_balance: f64,
        pub total_orders: i64,
        pub total_expense_records: i64,
        pub this_month_income: f64,
        pub this_month_expenses: f64,
    }
}
