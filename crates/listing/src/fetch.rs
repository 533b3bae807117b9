//! One fetch cycle: the visible page and the full matching set, requested
//! together and reported back tagged with the token they were issued under.

use std::sync::Arc;

use api_types::expense::{ExpenseList, PaginatedExpenses};
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};

use crate::backend::{BackendError, ExpenseBackend};

/// Identifies a fetch cycle. Tokens only grow; the controller applies a
/// result only while its token is the latest one issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchToken(u64);

impl FetchToken {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FetchRequest {
    pub token: FetchToken,
    /// Page the visible slice was requested for.
    pub page: u32,
    pub page_query: ExpenseList,
    /// Same filter without paging; feeds the summary.
    pub summary_query: ExpenseList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FetchedPages {
    pub page: PaginatedExpenses,
    pub matching: PaginatedExpenses,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FetchOutcome {
    pub token: FetchToken,
    pub page: u32,
    pub result: Result<FetchedPages, BackendError>,
}

/// Runs both requests of a cycle concurrently.
///
/// The cycle fails as a whole if either request fails; a half result is never
/// reported.
pub async fn execute<B: ExpenseBackend>(backend: &B, request: FetchRequest) -> FetchOutcome {
    let FetchRequest {
        token,
        page,
        page_query,
        summary_query,
    } = request;

    let (visible, matching) = tokio::join!(backend.list(page_query), backend.list(summary_query));

    let result = match (visible, matching) {
        (Ok(page), Ok(matching)) => Ok(FetchedPages { page, matching }),
        (Err(err), _) | (_, Err(err)) => Err(err),
    };

    FetchOutcome {
        token,
        page,
        result,
    }
}

/// Runs [`execute`] on its own task and posts the outcome to `tx`.
///
/// `wrap` lets several controllers share one channel.
pub fn spawn<B, M>(
    backend: Arc<B>,
    request: FetchRequest,
    tx: UnboundedSender<M>,
    wrap: fn(FetchOutcome) -> M,
) -> JoinHandle<()>
where
    B: ExpenseBackend + 'static,
    M: Send + 'static,
{
    tokio::spawn(async move {
        let token = request.token;
        let outcome = execute(backend.as_ref(), request).await;
        if tx.send(wrap(outcome)).is_err() {
            tracing::debug!("fetch {} finished after the receiver closed", token.value());
        }
    })
}
