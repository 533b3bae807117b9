use std::future::Future;

use api_types::{
    dashboard::{AccountSummary, DashboardStats},
    expense::{ExpenseInput, ExpenseList, PaginatedExpenses},
    settings::AppSettings,
};
use thiserror::Error;

/// Failure reported by the backend RPC service.
///
/// Mirrors the status classes the service uses; `Transport` covers every
/// failure that happened before a response was received.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("server unreachable: {0}")]
    Transport(String),
}

impl BackendError {
    /// Short message suitable for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized | Self::Forbidden => "Not allowed.".to_string(),
            Self::NotFound => "Record not found.".to_string(),
            Self::Conflict(message) => format!("Conflict: {message}"),
            Self::Validation(message) => format!("Invalid data: {message}"),
            Self::Server(message) => format!("Server error: {message}"),
            Self::Transport(_) => "Server unreachable.".to_string(),
        }
    }
}

/// The RPC surface consumed by the front-end.
///
/// Reads are assumed idempotent and side-effect free: the orchestrator may
/// leave superseded `list` calls running and ignore their results.
pub trait ExpenseBackend: Send + Sync {
    fn list(
        &self,
        query: ExpenseList,
    ) -> impl Future<Output = Result<PaginatedExpenses, BackendError>> + Send;

    /// Returns the id of the new record.
    fn create(&self, input: ExpenseInput)
    -> impl Future<Output = Result<i64, BackendError>> + Send;

    fn update(
        &self,
        id: i64,
        input: ExpenseInput,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn delete(&self, id: i64) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn settings(&self) -> impl Future<Output = Result<AppSettings, BackendError>> + Send;

    fn update_settings(
        &self,
        settings: AppSettings,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn dashboard_stats(&self) -> impl Future<Output = Result<DashboardStats, BackendError>> + Send;

    /// Income against expenses between two inclusive `YYYY-MM-DD` bounds.
    fn account_summary(
        &self,
        date_from: Option<String>,
        date_to: Option<String>,
    ) -> impl Future<Output = Result<AccountSummary, BackendError>> + Send;
}
