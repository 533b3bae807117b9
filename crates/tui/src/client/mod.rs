use api_types::{
    dashboard::{AccountSummary, AccountSummaryQuery, DashboardStats},
    expense::{
        ExpenseCreated, ExpenseDelete, ExpenseInput, ExpenseList, ExpenseUpdate, PaginatedExpenses,
    },
    settings::AppSettings,
};
use listing::{BackendError, ExpenseBackend};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// HTTP binding of the expense RPC service: every call is a JSON `POST`.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::InvalidBaseUrl(format!("{base_url}: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    async fn send<P: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &P,
    ) -> std::result::Result<reqwest::Response, BackendError> {
        let endpoint = self
            .base_url
            .join(path)
            .map_err(|err| BackendError::Server(format!("invalid base_url: {err}")))?;

        let res = self
            .http
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(transport)?;

        if res.status().is_success() {
            return Ok(res);
        }

        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(status_error(status, body))
    }

    async fn call<P, R>(&self, path: &str, payload: &P) -> std::result::Result<R, BackendError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let res = self.send(path, payload).await?;
        res.json::<R>().await.map_err(transport)
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

fn status_error(status: StatusCode, body: String) -> BackendError {
    match status.as_u16() {
        401 => BackendError::Unauthorized,
        403 => BackendError::Forbidden,
        404 => BackendError::NotFound,
        409 => BackendError::Conflict(body),
        422 => BackendError::Validation(body),
        _ => BackendError::Server(body),
    }
}

impl ExpenseBackend for Client {
    async fn list(
        &self,
        query: ExpenseList,
    ) -> std::result::Result<PaginatedExpenses, BackendError> {
        self.call("expenses/list", &query).await
    }

    async fn create(&self, input: ExpenseInput) -> std::result::Result<i64, BackendError> {
        let created: ExpenseCreated = self.call("expenses/create", &input).await?;
        Ok(created.id)
    }

    async fn update(&self, id: i64, input: ExpenseInput) -> std::result::Result<(), BackendError> {
        self.send("expenses/update", &ExpenseUpdate { id, input })
            .await
            .map(|_| ())
    }

    async fn delete(&self, id: i64) -> std::result::Result<(), BackendError> {
        self.send("expenses/delete", &ExpenseDelete { id })
            .await
            .map(|_| ())
    }

    async fn settings(&self) -> std::result::Result<AppSettings, BackendError> {
        self.call("settings/get", &serde_json::json!({})).await
    }

    async fn update_settings(
        &self,
        settings: AppSettings,
    ) -> std::result::Result<(), BackendError> {
        self.send("settings/update", &settings).await.map(|_| ())
    }

    async fn dashboard_stats(&self) -> std::result::Result<DashboardStats, BackendError> {
        self.call("dashboard/stats", &serde_json::json!({})).await
    }

    async fn account_summary(
        &self,
        date_from: Option<String>,
        date_to: Option<String>,
    ) -> std::result::Result<AccountSummary, BackendError> {
        let query = AccountSummaryQuery { date_from, date_to };
        self.call("account/summary", &query).await
    }
}
