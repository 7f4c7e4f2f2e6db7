//! Pagination behavior of the history walker against a scripted API.

mod common;

use common::*;
use sensit_api::ApiResponse;
use sensit_core::config::PageOrder;
use sensit_core::error::SensitError;
use sensit_models::{RawRecord, SelectionCriterion};
use sensit_services::HistoryPaginator;

const RESOURCE: &str = "/devices/1/sensors/10";

fn days(records: &[RawRecord]) -> Vec<u32> {
    use chrono::Datelike;
    records.iter().map(|r| r.date.day()).collect()
}

/// Nine daily records, three per page, served oldest first.
fn oldest_first() -> (std::sync::Arc<MockGateway>, HistoryPaginator) {
    let mock = MockGateway::new();
    serve_history(&mock, RESOURCE, &day_pages(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]], "1"));
    let paginator = HistoryPaginator::new(api(&mock), PageOrder::OldestFirst);
    (mock, paginator)
}

/// The same nine records served newest first.
fn newest_first() -> (std::sync::Arc<MockGateway>, HistoryPaginator) {
    let mock = MockGateway::new();
    serve_history(&mock, RESOURCE, &day_pages(&[&[9, 8, 7], &[6, 5, 4], &[3, 2, 1]], "1"));
    let paginator = HistoryPaginator::new(api(&mock), PageOrder::NewestFirst);
    (mock, paginator)
}

#[tokio::test]
async fn count_stops_once_satisfied() {
    let (mock, paginator) = oldest_first();
    let records = paginator.fetch(RESOURCE, &SelectionCriterion::Count(2)).await.unwrap();
    assert_eq!(days(&records), vec![1, 2]);
    assert_eq!(mock.get_paths().len(), 1);

    let (mock, paginator) = oldest_first();
    let records = paginator.fetch(RESOURCE, &SelectionCriterion::Count(5)).await.unwrap();
    assert_eq!(days(&records), vec![1, 2, 3, 4, 5]);
    assert_eq!(mock.get_paths(), vec![page_path(RESOURCE, 0), page_path(RESOURCE, 1)]);
}

#[tokio::test]
async fn count_larger_than_history() {
    let (mock, paginator) = oldest_first();
    let records = paginator.fetch(RESOURCE, &SelectionCriterion::Count(50)).await.unwrap();
    assert_eq!(records.len(), 9);
    assert_eq!(mock.get_paths().len(), 3);
}

#[tokio::test]
async fn single_page_without_next_link() {
    let mock = MockGateway::new();
    serve_history(&mock, RESOURCE, &day_pages(&[&[1, 2]], "1"));
    let paginator = HistoryPaginator::new(api(&mock), PageOrder::OldestFirst);

    let records = paginator.fetch(RESOURCE, &SelectionCriterion::Count(10)).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(mock.get_paths(), vec![RESOURCE.to_string()]);
}

#[tokio::test]
async fn range_is_strict() {
    let (mock, paginator) = oldest_first();
    let criterion = SelectionCriterion::Range {
        begin: Some(july(2)),
        end: Some(july(5)),
    };
    let records = paginator.fetch(RESOURCE, &criterion).await.unwrap();
    assert_eq!(days(&records), vec![3, 4]);
    // The second page already reaches the end date.
    assert_eq!(mock.get_paths().len(), 2);
}

#[tokio::test]
async fn range_newest_first_walks_to_begin() {
    let (mock, paginator) = newest_first();
    let criterion = SelectionCriterion::Range {
        begin: Some(july(2)),
        end: Some(july(5)),
    };
    let records = paginator.fetch(RESOURCE, &criterion).await.unwrap();
    assert_eq!(days(&records), vec![3, 4]);
    assert_eq!(mock.get_paths().len(), 3);
}

#[tokio::test]
async fn begin_only_reads_to_the_end() {
    let (mock, paginator) = oldest_first();
    let criterion = SelectionCriterion::Range {
        begin: Some(july(7)),
        end: None,
    };
    let records = paginator.fetch(RESOURCE, &criterion).await.unwrap();
    assert_eq!(days(&records), vec![8, 9]);
    assert_eq!(mock.get_paths().len(), 3);
}

#[tokio::test]
async fn end_only_never_returns_later_records() {
    let (mock, paginator) = oldest_first();
    let criterion = SelectionCriterion::Range {
        begin: None,
        end: Some(july(3)),
    };
    let records = paginator.fetch(RESOURCE, &criterion).await.unwrap();
    assert_eq!(days(&records), vec![1, 2]);
    assert_eq!(mock.get_paths().len(), 1);

    let (_, paginator) = newest_first();
    let records = paginator.fetch(RESOURCE, &criterion).await.unwrap();
    assert_eq!(days(&records), vec![1, 2]);
}

#[tokio::test]
async fn count_from_start_takes_earliest_after_begin() {
    let (mock, paginator) = oldest_first();
    let criterion = SelectionCriterion::CountFromStart { begin: july(2), n: 4 };
    let records = paginator.fetch(RESOURCE, &criterion).await.unwrap();
    assert_eq!(days(&records), vec![3, 4, 5, 6]);
    assert_eq!(mock.get_paths().len(), 2);

    let (_, paginator) = newest_first();
    let criterion = SelectionCriterion::CountFromStart { begin: july(2), n: 2 };
    let records = paginator.fetch(RESOURCE, &criterion).await.unwrap();
    assert_eq!(days(&records), vec![3, 4]);
}

#[tokio::test]
async fn count_until_end_takes_latest_before_end() {
    let (_, paginator) = oldest_first();
    let criterion = SelectionCriterion::CountUntilEnd { end: july(8), n: 2 };
    let records = paginator.fetch(RESOURCE, &criterion).await.unwrap();
    assert_eq!(days(&records), vec![6, 7]);

    let (mock, paginator) = newest_first();
    let records = paginator.fetch(RESOURCE, &criterion).await.unwrap();
    assert_eq!(days(&records), vec![6, 7]);
    assert_eq!(mock.get_paths().len(), 2);
}

#[tokio::test]
async fn results_are_sorted_ascending() {
    let (_, paginator) = newest_first();
    let records = paginator.fetch(RESOURCE, &SelectionCriterion::Count(6)).await.unwrap();
    assert_eq!(days(&records), vec![4, 5, 6, 7, 8, 9]);
}

#[tokio::test]
async fn link_cycle_is_not_followed() {
    let mock = MockGateway::new();
    let first = ApiResponse::accepted(history_json(&[(july(1), "1")]))
        .with_link("next", &format!("https://api.sensit.io/api/v1{}", page_path(RESOURCE, 1)));
    let second = ApiResponse::accepted(history_json(&[(july(2), "1")]))
        .with_link("next", &format!("https://api.sensit.io/api/v1{RESOURCE}"));
    mock.respond(RESOURCE, first);
    mock.respond(&page_path(RESOURCE, 1), second);

    let paginator = HistoryPaginator::new(api(&mock), PageOrder::OldestFirst);
    let records = paginator.fetch(RESOURCE, &SelectionCriterion::Count(10)).await.unwrap();
    assert_eq!(days(&records), vec![1, 2]);
    assert_eq!(mock.get_paths().len(), 2);
}

#[tokio::test]
async fn empty_page_ends_walk() {
    let mock = MockGateway::new();
    serve_history(&mock, RESOURCE, &day_pages(&[&[1], &[], &[3]], "1"));
    let paginator = HistoryPaginator::new(api(&mock), PageOrder::OldestFirst);

    let records = paginator.fetch(RESOURCE, &SelectionCriterion::Count(10)).await.unwrap();
    assert_eq!(days(&records), vec![1]);
    assert_eq!(mock.get_paths().len(), 2);
}

#[tokio::test]
async fn failed_page_is_an_error() {
    let mock = MockGateway::new();
    let first = ApiResponse::accepted(history_json(&[(july(1), "1")]))
        .with_link("next", &format!("https://api.sensit.io/api/v1{}", page_path(RESOURCE, 1)));
    mock.respond(RESOURCE, first);
    mock.respond(&page_path(RESOURCE, 1), ApiResponse::new(500, None));

    let paginator = HistoryPaginator::new(api(&mock), PageOrder::OldestFirst);
    let err = paginator
        .fetch(RESOURCE, &SelectionCriterion::Count(5))
        .await
        .unwrap_err();
    assert!(matches!(err, SensitError::Upstream { status: 500, .. }));
}

#[tokio::test]
async fn invalid_criterion_fetches_nothing() {
    let (mock, paginator) = oldest_first();
    let err = paginator
        .fetch(RESOURCE, &SelectionCriterion::Count(0))
        .await
        .unwrap_err();
    assert!(matches!(err, SensitError::Argument { ref method, .. } if method == "fetch"));

    let backwards = SelectionCriterion::Range {
        begin: Some(july(5)),
        end: Some(july(2)),
    };
    assert!(paginator.fetch(RESOURCE, &backwards).await.is_err());
    assert!(mock.get_paths().is_empty());
}

#[tokio::test]
async fn token_sent_with_every_page() {
    let (mock, paginator) = oldest_first();
    paginator.fetch(RESOURCE, &SelectionCriterion::Count(9)).await.unwrap();
    assert!(mock
        .calls()
        .iter()
        .all(|c| c.token.as_deref() == Some("test-token")));
}
