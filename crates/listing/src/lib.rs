//! Client-side logic of the expense list views.
//!
//! The centre of the crate is [`ListController`]: it owns the query, the
//! displayed rows and the summary of a filtered, paginated list, and decides
//! which backend responses are allowed to reach the screen. Network calls go
//! through the [`ExpenseBackend`] trait and are run by [`fetch`]; the
//! controller itself never awaits.
//!
//! Around it sit the pieces the views need and that do not depend on a
//! terminal or on HTTP: form [`validation`], CSV [`export`], date-range
//! presets and UI [`preferences`].

pub use backend::{BackendError, ExpenseBackend};
pub use controller::{Completion, ListController};
pub use date_range::DatePreset;
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use error::{ListingError, Result};
pub use fetch::{FetchOutcome, FetchRequest, FetchToken, FetchedPages};
pub use query::{CategoryFilter, PageSize, Query};
pub use summary::Summary;
pub use view::{LoadedPhase, ViewState};

pub mod backend;
pub mod date_range;
pub mod debounce;
pub mod export;
pub mod fetch;
pub mod preferences;
pub mod query;
pub mod summary;
pub mod validation;
pub mod view;

mod controller;
mod error;
