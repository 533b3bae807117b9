//! Canonical list query and the normalization rules applied to raw filter
//! input.
//!
//! Nothing here fails: out-of-range values are coerced, blank strings become
//! absent filters.

use api_types::expense::{ExpenseList, PAGE_SIZE_ALL, SearchKey, SortBy, SortOrder};
use chrono::NaiveDate;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MIN_PAGE_SIZE: u32 = 5;
pub const MAX_PAGE_SIZE: u32 = 100;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of rows per page, or every matching row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageSize {
    Limited(u32),
    All,
}

impl Default for PageSize {
    fn default() -> Self {
        Self::Limited(DEFAULT_PAGE_SIZE)
    }
}

impl PageSize {
    /// Choices offered by the page size selector, in cycling order.
    pub const CHOICES: [PageSize; 6] = [
        Self::Limited(5),
        Self::Limited(10),
        Self::Limited(20),
        Self::Limited(50),
        Self::Limited(100),
        Self::All,
    ];

    /// Builds a page size from raw input. `PAGE_SIZE_ALL` selects every row,
    /// anything else is clamped to `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]`.
    pub fn from_raw(raw: Option<i64>) -> Self {
        match raw {
            Some(PAGE_SIZE_ALL) => Self::All,
            Some(value) => {
                Self::Limited(value.clamp(MIN_PAGE_SIZE as i64, MAX_PAGE_SIZE as i64) as u32)
            }
            None => Self::default(),
        }
    }

    pub fn normalize(self) -> Self {
        match self {
            Self::Limited(size) => Self::Limited(size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)),
            Self::All => Self::All,
        }
    }

    /// Wire representation.
    pub fn to_raw(self) -> i64 {
        match self {
            Self::Limited(size) => i64::from(size),
            Self::All => PAGE_SIZE_ALL,
        }
    }

    pub fn limit(self) -> Option<u32> {
        match self {
            Self::Limited(size) => Some(size),
            Self::All => None,
        }
    }

    pub fn next(self) -> Self {
        self.step(1)
    }

    pub fn prev(self) -> Self {
        self.step(Self::CHOICES.len() - 1)
    }

    fn step(self, offset: usize) -> Self {
        let current = self.normalize();
        let index = Self::CHOICES
            .iter()
            .position(|choice| *choice == current)
            .unwrap_or(1);
        Self::CHOICES[(index + offset) % Self::CHOICES.len()]
    }

    pub fn label(self) -> String {
        match self {
            Self::Limited(size) => size.to_string(),
            Self::All => "All".to_string(),
        }
    }
}

/// Clamps a raw page number to `>= 1`.
pub fn normalize_page(raw: Option<i64>) -> u32 {
    raw.unwrap_or(1).clamp(1, i64::from(u32::MAX)) as u32
}

/// Number of pages needed for `total` rows.
pub fn total_pages(total: u64, page_size: PageSize) -> u32 {
    if total == 0 {
        return 0;
    }
    match page_size {
        PageSize::Limited(size) => total.div_ceil(u64::from(size.max(1))) as u32,
        PageSize::All => 1,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Blank input or `all` (any case) disables the filter.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.as_str(),
        }
    }
}

/// Parses a `YYYY-MM-DD` string, treating blank or malformed input as absent.
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
}

/// Orders an inclusive date range so that `from <= to` when both are set.
pub fn normalize_date_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> (Option<NaiveDate>, Option<NaiveDate>) {
    match (from, to) {
        (Some(from), Some(to)) if from > to => (Some(to), Some(from)),
        other => other,
    }
}

/// The canonical filter/sort/pagination state of a list view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pub page: u32,
    pub page_size: PageSize,
    pub search_key: SearchKey,
    /// Committed (already debounced) search term, trimmed.
    pub search_term: String,
    pub category: CategoryFilter,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Query {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page: 1,
            page_size: page_size.normalize(),
            ..Self::default()
        }
    }

    /// Re-applies every clamp. Idempotent.
    pub fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        self.page_size = self.page_size.normalize();
        self.search_term = self.search_term.trim().to_string();
        (self.date_from, self.date_to) = normalize_date_range(self.date_from, self.date_to);
        self
    }

    /// Payload for the visible page.
    pub fn to_request(&self) -> ExpenseList {
        let page = match self.page_size {
            PageSize::Limited(_) => self.page,
            PageSize::All => 1,
        };
        self.request_with(page, self.page_size)
    }

    /// Same filter, every matching row. Feeds the summary.
    pub fn to_summary_request(&self) -> ExpenseList {
        self.request_with(1, PageSize::All)
    }

    fn request_with(&self, page: u32, page_size: PageSize) -> ExpenseList {
        let search_term = if self.search_term.is_empty() {
            None
        } else {
            Some(self.search_term.clone())
        };
        ExpenseList {
            page: Some(i64::from(page)),
            page_size: Some(page_size.to_raw()),
            search_key: Some(self.search_key),
            search_term,
            category_filter: Some(self.category.as_wire().to_string()),
            date_from: self.date_from.map(|d| d.format(DATE_FORMAT).to_string()),
            date_to: self.date_to.map(|d| d.format(DATE_FORMAT).to_string()),
            sort_by: Some(self.sort_by),
            sort_order: Some(self.sort_order),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_to_one_and_never_goes_below() {
        assert_eq!(normalize_page(None), 1);
        assert_eq!(normalize_page(Some(0)), 1);
        assert_eq!(normalize_page(Some(-7)), 1);
        assert_eq!(normalize_page(Some(4)), 4);
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(PageSize::from_raw(None), PageSize::Limited(10));
        assert_eq!(PageSize::from_raw(Some(1)), PageSize::Limited(5));
        assert_eq!(PageSize::from_raw(Some(0)), PageSize::Limited(5));
        assert_eq!(PageSize::from_raw(Some(-20)), PageSize::Limited(5));
        assert_eq!(PageSize::from_raw(Some(37)), PageSize::Limited(37));
        assert_eq!(PageSize::from_raw(Some(5_000)), PageSize::Limited(100));
        assert_eq!(PageSize::from_raw(Some(PAGE_SIZE_ALL)), PageSize::All);
    }

    #[test]
    fn page_size_normalization_is_idempotent() {
        for raw in [-100, -1, 0, 1, 4, 5, 6, 10, 99, 100, 101, i64::MAX, i64::MIN] {
            let once = PageSize::from_raw(Some(raw));
            match once {
                PageSize::Limited(size) => assert!((MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&size)),
                PageSize::All => assert_eq!(raw, PAGE_SIZE_ALL),
            }
            assert_eq!(PageSize::from_raw(Some(once.to_raw())), once);
            assert_eq!(once.normalize(), once);
        }
    }

    #[test]
    fn page_size_cycles_through_choices() {
        assert_eq!(PageSize::Limited(100).next(), PageSize::All);
        assert_eq!(PageSize::All.next(), PageSize::Limited(5));
        assert_eq!(PageSize::Limited(5).prev(), PageSize::All);
        // off-grid sizes snap back to the default slot
        assert_eq!(PageSize::Limited(37).next(), PageSize::Limited(20));
    }

    #[test]
    fn total_pages_rounds_up_and_is_zero_when_empty() {
        assert_eq!(total_pages(0, PageSize::Limited(10)), 0);
        assert_eq!(total_pages(0, PageSize::All), 0);
        assert_eq!(total_pages(22, PageSize::Limited(10)), 3);
        assert_eq!(total_pages(20, PageSize::Limited(10)), 2);
        assert_eq!(total_pages(22, PageSize::All), 1);
    }

    #[test]
    fn category_all_is_case_insensitive() {
        assert_eq!(CategoryFilter::from_raw("  "), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_raw("ALL"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_raw(" Supplies "),
            CategoryFilter::Only("Supplies".to_string())
        );
    }

    #[test]
    fn inverted_date_range_is_swapped() {
        let from = parse_date(Some("2026-10-31"));
        let to = parse_date(Some("2026-10-01"));
        let (from, to) = normalize_date_range(from, to);
        assert_eq!(from, NaiveDate::from_ymd_opt(2026, 10, 1));
        assert_eq!(to, NaiveDate::from_ymd_opt(2026, 10, 31));
    }

    #[test]
    fn malformed_dates_are_dropped() {
        assert_eq!(parse_date(Some("31/10/2026")), None);
        assert_eq!(parse_date(Some("")), None);
        assert_eq!(parse_date(None), None);
    }

    #[test]
    fn all_page_size_always_requests_first_page() {
        let query = Query {
            page: 4,
            page_size: PageSize::All,
            ..Query::new(PageSize::All)
        };
        let request = query.to_request();
        assert_eq!(request.page, Some(1));
        assert_eq!(request.page_size, Some(PAGE_SIZE_ALL));
    }

    #[test]
    fn summary_request_keeps_filters() {
        let query = Query {
            page: 3,
            search_term: "ink".to_string(),
            category: CategoryFilter::Only("Supplies".to_string()),
            date_from: NaiveDate::from_ymd_opt(2026, 1, 1),
            ..Query::new(PageSize::Limited(10))
        };
        let request = query.to_summary_request();
        assert_eq!(request.page, Some(1));
        assert_eq!(request.page_size, Some(PAGE_SIZE_ALL));
        assert_eq!(request.search_term.as_deref(), Some("ink"));
        assert_eq!(request.category_filter.as_deref(), Some("Supplies"));
        assert_eq!(request.date_from.as_deref(), Some("2026-01-01"));
    }

    #[test]
    fn normalized_query_is_stable() {
        let query = Query {
            page: 0,
            page_size: PageSize::Limited(500),
            search_term: "  ink ".to_string(),
            date_from: NaiveDate::from_ymd_opt(2026, 5, 1),
            date_to: NaiveDate::from_ymd_opt(2026, 4, 1),
            ..Query::default()
        }
        .normalized();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, PageSize::Limited(100));
        assert_eq!(query.search_term, "ink");
        assert_eq!(query.clone().normalized(), query);
    }
}
