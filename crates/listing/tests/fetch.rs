mod common;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use api_types::expense::ExpenseInput;
use chrono::NaiveDate;
use listing::{
    BackendError, Completion, ExpenseBackend, FetchOutcome, ListController, PageSize, Query,
    export, fetch,
};
use tokio::sync::mpsc;

use common::{FakeBackend, catalogue};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

/// Runs a request and every corrective refetch it triggers.
async fn settle(
    controller: &mut ListController,
    backend: &FakeBackend,
    request: listing::FetchRequest,
) -> Completion {
    let mut request = request;
    loop {
        let outcome = fetch::execute(backend, request).await;
        match controller.complete(outcome, today()) {
            Completion::Refetch(next) => request = next,
            other => return other,
        }
    }
}

#[tokio::test]
async fn searching_ink_pages_through_twenty_two_rows() {
    let backend = FakeBackend::with_rows(catalogue(22, 8));
    let mut controller = ListController::new(Query::new(PageSize::Limited(10)));
    let start = Instant::now();

    controller.set_search_input("ink", start);
    let request = controller
        .poll_search(start + Duration::from_millis(300))
        .unwrap();
    assert_eq!(settle(&mut controller, &backend, request).await, Completion::Applied);
    assert_eq!(controller.total(), 22);
    assert_eq!(controller.total_pages(), 3);

    let request = controller.set_page(3).unwrap();
    assert_eq!(settle(&mut controller, &backend, request).await, Completion::Applied);
    assert_eq!(controller.query().page, 3);
    assert_eq!(controller.items().len(), 2);

    let request = controller.set_page(5).unwrap();
    assert_eq!(settle(&mut controller, &backend, request).await, Completion::Applied);
    assert_eq!(controller.query().page, 3);
    assert_eq!(controller.total_pages(), 3);
    assert_eq!(controller.items().len(), 2);

    // summary covers every matching row, not only the visible slice
    assert_eq!(controller.summary().count, 22);
    assert_eq!(controller.summary().total, 220.0);
    assert_eq!(controller.summary().month_total, 220.0);
    assert_eq!(controller.summary().average, 10.0);
}

#[tokio::test]
async fn no_match_settles_on_first_page_with_zero_pages() {
    let backend = FakeBackend::with_rows(catalogue(22, 0));
    let mut controller = ListController::default();
    let request = controller.begin_fetch();
    settle(&mut controller, &backend, request).await;

    let request = controller.set_page(3).unwrap();
    settle(&mut controller, &backend, request).await;
    assert_eq!(controller.query().page, 3);

    controller.set_search_input("toner", Instant::now());
    let request = controller
        .poll_search(Instant::now() + Duration::from_secs(1))
        .unwrap();
    settle(&mut controller, &backend, request).await;

    assert_eq!(controller.total(), 0);
    assert_eq!(controller.total_pages(), 0);
    assert_eq!(controller.query().page, 1);
    assert!(controller.view().shows_empty());
    assert_eq!(controller.summary().average, 0.0);
}

#[tokio::test(start_paused = true)]
async fn last_request_wins_over_last_response() {
    let backend = Arc::new(FakeBackend::with_rows(catalogue(12, 5)));
    backend.delay_term("rent", Duration::from_millis(800));
    backend.delay_term("ink", Duration::from_millis(50));

    let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();
    let mut controller = ListController::default();
    let start = Instant::now();

    controller.set_search_input("rent", start);
    let slow = controller.poll_search(start + Duration::from_secs(1)).unwrap();
    fetch::spawn(backend.clone(), slow, tx.clone(), |outcome| outcome);

    controller.set_search_input("ink", start + Duration::from_secs(2));
    let fast = controller.poll_search(start + Duration::from_secs(3)).unwrap();
    fetch::spawn(backend.clone(), fast, tx.clone(), |outcome| outcome);
    drop(tx);

    let mut completions = Vec::new();
    while let Some(outcome) = rx.recv().await {
        completions.push(controller.complete(outcome, today()));
    }

    assert_eq!(
        completions,
        vec![Completion::Applied, Completion::Discarded]
    );
    assert_eq!(controller.total(), 12);
    assert!(controller.items().iter().all(|row| row.title.contains("ink")));
    assert!(!controller.is_loading());
    assert_eq!(backend.list_calls(), 4);
}

#[tokio::test]
async fn failed_cycle_keeps_previous_rows() {
    let backend = FakeBackend::with_rows(catalogue(3, 0));
    backend.fail_term("ink", BackendError::Server("boom".to_string()));

    let mut controller = ListController::default();
    let request = controller.begin_fetch();
    settle(&mut controller, &backend, request).await;
    assert_eq!(controller.total(), 3);

    controller.set_search_input("ink", Instant::now());
    let request = controller
        .poll_search(Instant::now() + Duration::from_secs(1))
        .unwrap();
    let completion = settle(&mut controller, &backend, request).await;

    assert_eq!(
        completion,
        Completion::Failed(BackendError::Server("boom".to_string()))
    );
    // no retry, previous rows stay on screen
    assert_eq!(controller.total(), 3);
    assert_eq!(controller.items().len(), 3);
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn summary_failure_discards_the_successful_page() {
    let backend = FakeBackend::with_rows(catalogue(12, 3));
    let mut controller = ListController::new(Query::new(PageSize::Limited(10)));
    let request = controller.begin_fetch();
    assert_eq!(settle(&mut controller, &backend, request).await, Completion::Applied);
    let items = controller.items().to_vec();
    let summary = controller.summary();
    let total = controller.total();

    backend.fail_unpaged(BackendError::Transport("timed out".to_string()));
    controller.set_search_input("ink", Instant::now());
    let request = controller
        .poll_search(Instant::now() + Duration::from_secs(1))
        .unwrap();
    let completion = settle(&mut controller, &backend, request).await;

    assert_eq!(
        completion,
        Completion::Failed(BackendError::Transport("timed out".to_string()))
    );
    // the page answered, but nothing of the cycle is committed
    assert_eq!(controller.items(), items.as_slice());
    assert_eq!(controller.summary(), summary);
    assert_eq!(controller.total(), total);
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn created_expense_shows_up_after_refresh() {
    let backend = FakeBackend::with_rows(catalogue(2, 0));
    let mut controller = ListController::default();
    let request = controller.begin_fetch();
    settle(&mut controller, &backend, request).await;

    let id = backend
        .create(ExpenseInput {
            title: "Paper".to_string(),
            amount: 4.0,
            expense_date: Some("2026-10-17".to_string()),
            ..ExpenseInput::default()
        })
        .await
        .unwrap();
    assert_eq!(id, 3);

    let request = controller.refresh();
    settle(&mut controller, &backend, request).await;
    assert_eq!(controller.total(), 3);
    assert_eq!(controller.summary().total, 24.0);

    backend.delete(id).await.unwrap();
    controller.remove_local(id);
    let request = controller.refresh();
    settle(&mut controller, &backend, request).await;
    assert_eq!(controller.total(), 2);
}

#[tokio::test]
async fn export_of_full_matching_set() {
    let backend = FakeBackend::with_rows(catalogue(12, 3));
    let mut controller = ListController::default();
    controller.set_search_input("ink", Instant::now());
    let request = controller
        .poll_search(Instant::now() + Duration::from_secs(1))
        .unwrap();

    let outcome = fetch::execute(&backend, request).await;
    let matching = outcome.result.clone().unwrap().matching.expenses;
    controller.complete(outcome, today());

    let csv = export::to_csv_string(&matching).unwrap();
    assert_eq!(csv.lines().count(), 13);
    assert_eq!(controller.items().len(), 10);
}
