use std::time::{Duration, Instant};

use api_types::expense::{Expense, SearchKey, SortBy, SortOrder};
use chrono::NaiveDate;

use crate::{
    backend::BackendError,
    debounce::Debouncer,
    fetch::{FetchOutcome, FetchRequest, FetchToken},
    query::{CategoryFilter, PageSize, Query, normalize_date_range, normalize_page},
    summary::Summary,
    view::ViewState,
};

/// What the caller has to do after handing a fetch outcome to the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
    /// The result was committed.
    Applied,
    /// A newer fetch superseded this one; nothing changed.
    Discarded,
    /// The requested page is out of range; run this corrected request.
    Refetch(FetchRequest),
    /// The current fetch failed; the previous rows are still displayed.
    Failed(BackendError),
}

/// Owns the state of a filtered, paginated list view.
///
/// Every filter change goes through a method returning the [`FetchRequest`]
/// to run (or `None` when nothing changed). Results come back through
/// [`complete`](Self::complete), which applies them only if they belong to
/// the most recently issued request.
#[derive(Debug)]
pub struct ListController {
    query: Query,
    search_input: String,
    debouncer: Debouncer<String>,
    last_token: u64,
    current: Option<FetchToken>,
    loading: bool,
    items: Vec<Expense>,
    total: u64,
    total_pages: u32,
    summary: Summary,
    view: ViewState,
}

impl ListController {
    pub fn new(query: Query) -> Self {
        let query = query.normalized();
        Self {
            search_input: query.search_term.clone(),
            query,
            debouncer: Debouncer::default(),
            last_token: 0,
            current: None,
            loading: false,
            items: Vec::new(),
            total: 0,
            total_pages: 0,
            summary: Summary::default(),
            view: ViewState::default(),
        }
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debouncer = Debouncer::new(delay);
        self
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// The free-text field as typed, possibly not yet committed.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn items(&self) -> &[Expense] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn current_token(&self) -> Option<FetchToken> {
        self.current
    }

    /// Issues a new fetch for the current query, superseding any in flight.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.last_token += 1;
        let token = FetchToken::new(self.last_token);
        self.current = Some(token);
        self.loading = true;
        self.view = self.view.fetch_started();

        let page_query = self.query.to_request();
        FetchRequest {
            token,
            page: page_query.page.unwrap_or(1) as u32,
            page_query,
            summary_query: self.query.to_summary_request(),
        }
    }

    /// Re-runs the current query as is.
    pub fn refresh(&mut self) -> FetchRequest {
        self.begin_fetch()
    }

    /// Records a keystroke in the search field. The term is committed by
    /// [`poll_search`](Self::poll_search) once typing pauses.
    pub fn set_search_input(&mut self, input: impl Into<String>, now: Instant) {
        let input = input.into();
        self.search_input = input.clone();
        self.debouncer.push(input, now);
    }

    /// Commits the debounced search term, resetting to the first page.
    pub fn poll_search(&mut self, now: Instant) -> Option<FetchRequest> {
        let term = self.debouncer.poll(now)?;
        self.apply(Query {
            page: 1,
            search_term: term.trim().to_string(),
            ..self.query.clone()
        })
    }

    pub fn search_due_in(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_until_due(now)
    }

    pub fn set_page(&mut self, raw: i64) -> Option<FetchRequest> {
        self.apply(Query {
            page: normalize_page(Some(raw)),
            ..self.query.clone()
        })
    }

    pub fn next_page(&mut self) -> Option<FetchRequest> {
        if self.query.page_size == PageSize::All || self.query.page >= self.total_pages {
            return None;
        }
        self.set_page(i64::from(self.query.page) + 1)
    }

    pub fn prev_page(&mut self) -> Option<FetchRequest> {
        if self.query.page <= 1 {
            return None;
        }
        self.set_page(i64::from(self.query.page) - 1)
    }

    pub fn set_page_size(&mut self, page_size: PageSize) -> Option<FetchRequest> {
        self.apply(Query {
            page: 1,
            page_size,
            ..self.query.clone()
        })
    }

    pub fn set_search_key(&mut self, search_key: SearchKey) -> Option<FetchRequest> {
        self.apply(Query {
            page: 1,
            search_key,
            ..self.query.clone()
        })
    }

    pub fn set_category(&mut self, raw: &str) -> Option<FetchRequest> {
        self.apply(Query {
            page: 1,
            category: CategoryFilter::from_raw(raw),
            ..self.query.clone()
        })
    }

    pub fn set_date_range(
        &mut self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Option<FetchRequest> {
        let (date_from, date_to) = normalize_date_range(from, to);
        self.apply(Query {
            page: 1,
            date_from,
            date_to,
            ..self.query.clone()
        })
    }

    pub fn set_sort(&mut self, sort_by: SortBy, sort_order: SortOrder) -> Option<FetchRequest> {
        self.apply(Query {
            page: 1,
            sort_by,
            sort_order,
            ..self.query.clone()
        })
    }

    /// Drops every filter, keeping page size and sorting.
    pub fn clear_filters(&mut self) -> Option<FetchRequest> {
        self.debouncer.cancel();
        self.search_input.clear();
        self.apply(Query {
            page: 1,
            search_key: self.query.search_key,
            page_size: self.query.page_size,
            sort_by: self.query.sort_by,
            sort_order: self.query.sort_order,
            ..Query::default()
        })
    }

    /// Removes a row from the displayed page ahead of the backend confirming
    /// the deletion. The next committed fetch replaces the rows wholesale.
    pub fn remove_local(&mut self, id: i64) -> Option<Expense> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let removed = self.items.remove(index);
        self.total = self.total.saturating_sub(1);
        Some(removed)
    }

    /// Applies the outcome of a fetch cycle.
    pub fn complete(&mut self, outcome: FetchOutcome, today: NaiveDate) -> Completion {
        if self.current != Some(outcome.token) {
            tracing::debug!(
                "discarding stale expense list result (token {})",
                outcome.token.value()
            );
            return Completion::Discarded;
        }

        let fetched = match outcome.result {
            Ok(fetched) => fetched,
            Err(err) => {
                tracing::error!("failed to load expenses: {err}");
                self.loading = false;
                self.view = self.view.fetch_failed(self.items.len());
                return Completion::Failed(err);
            }
        };

        let total = fetched.page.total.max(0) as u64;
        let total_pages = if total == 0 {
            0
        } else {
            fetched.page.total_pages.clamp(0, i64::from(u32::MAX)) as u32
        };

        if total_pages > 0 && outcome.page > total_pages {
            tracing::debug!(
                "page {} out of range ({total_pages} pages), refetching last page",
                outcome.page
            );
            self.query.page = total_pages;
            return Completion::Refetch(self.begin_fetch());
        }
        if total_pages == 0 && outcome.page > 1 {
            tracing::debug!("no results on page {}, refetching first page", outcome.page);
            self.query.page = 1;
            return Completion::Refetch(self.begin_fetch());
        }

        self.items = fetched.page.expenses;
        self.total = total;
        self.total_pages = total_pages;
        self.summary = Summary::from_expenses(&fetched.matching.expenses, today);
        self.loading = false;
        self.view = self.view.fetch_committed(self.items.len());
        Completion::Applied
    }

    fn apply(&mut self, next: Query) -> Option<FetchRequest> {
        let mut next = next.normalized();
        if next.page_size == PageSize::All {
            next.page = 1;
        }
        if next == self.query {
            return None;
        }
        self.query = next;
        Some(self.begin_fetch())
    }
}

impl Default for ListController {
    fn default() -> Self {
        Self::new(Query::new(PageSize::default()))
    }
}
