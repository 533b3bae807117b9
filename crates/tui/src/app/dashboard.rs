use api_types::{
    dashboard::{AccountSummary, DashboardStats},
    expense::{SortBy, SortOrder},
};
use chrono::NaiveDate;
use listing::{
    BackendError, DatePreset, ExpenseBackend, FetchRequest, ListController, PageSize, Query,
};

/// Rows shown in the "recent expenses" panel.
pub const RECENT_ROWS: u32 = 5;

/// Shop totals plus the account balance over the preset range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Headline {
    pub stats: DashboardStats,
    pub account: AccountSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineRequest {
    generation: u64,
    date_from: Option<String>,
    date_to: Option<String>,
}

#[derive(Debug)]
pub struct HeadlineOutcome {
    generation: u64,
    result: Result<Headline, BackendError>,
}

/// Recent expenses and their summary within a preset date range, next to
/// the shop-wide headline figures.
#[derive(Debug)]
pub struct DashboardState {
    pub controller: ListController,
    pub preset: DatePreset,
    pub headline: Option<Headline>,
    headline_generation: u64,
}

impl DashboardState {
    pub fn new(today: NaiveDate) -> Self {
        let preset = DatePreset::default();
        let (date_from, date_to) = preset.range(today).unzip();
        let query = Query {
            sort_by: SortBy::ExpenseDate,
            sort_order: SortOrder::Desc,
            date_from,
            date_to,
            ..Query::new(PageSize::Limited(RECENT_ROWS))
        };
        Self {
            controller: ListController::new(query),
            preset,
            headline: None,
            headline_generation: 0,
        }
    }

    pub fn set_preset(&mut self, preset: DatePreset, today: NaiveDate) -> Option<FetchRequest> {
        self.preset = preset;
        let (from, to) = preset.range(today).unzip();
        self.controller.set_date_range(from, to)
    }

    /// Starts a headline load for the current preset; older loads in flight
    /// become stale.
    pub fn begin_headline(&mut self, today: NaiveDate) -> HeadlineRequest {
        self.headline_generation += 1;
        let (from, to) = self.preset.range(today).unzip();
        let format = |date: NaiveDate| date.format("%Y-%m-%d").to_string();
        HeadlineRequest {
            generation: self.headline_generation,
            date_from: from.map(format),
            date_to: to.map(format),
        }
    }

    /// Commits a headline load. Stale outcomes are dropped; a failure keeps
    /// the figures already shown and is handed back to the caller.
    pub fn complete_headline(&mut self, outcome: HeadlineOutcome) -> Option<BackendError> {
        if outcome.generation != self.headline_generation {
            tracing::debug!("dropping stale headline {}", outcome.generation);
            return None;
        }
        match outcome.result {
            Ok(headline) => {
                self.headline = Some(headline);
                None
            }
            Err(err) => Some(err),
        }
    }
}

/// Fetches shop stats and the account summary together; either failure
/// fails the load.
pub async fn load_headline<B: ExpenseBackend>(
    backend: &B,
    request: HeadlineRequest,
) -> HeadlineOutcome {
    let HeadlineRequest {
        generation,
        date_from,
        date_to,
    } = request;
    let (stats, account) = tokio::join!(
        backend.dashboard_stats(),
        backend.account_summary(date_from, date_to)
    );
    let result = match (stats, account) {
        (Ok(stats), Ok(account)) => Ok(Headline { stats, account }),
        (Err(err), _) | (_, Err(err)) => Err(err),
    };
    HeadlineOutcome { generation, result }
}
