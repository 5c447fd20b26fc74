/// Integration tests for the engine over the HTTP task store.
///
/// These tests run the full stack (engine, cache, action gate, HTTP
/// adapter) against a mock server.
///
/// Test coverage:
/// - List caching within the validity window
/// - Transition round-trip: validate, POST, refetch
/// - Checklist gating stops the request before it is sent
/// - Bulk assignment input validation without network traffic
/// - Idempotent day generation
/// - Remote error message extraction
/// - Transport error classification
use std::collections::HashMap;

use chrono::NaiveDate;
use mockito::{Matcher, Server, ServerGuard};

use turnover::domain::models::staff::{Actor, Role};
use turnover::{
    CacheConfig, ChecklistProgress, EngineError, HousekeepingEngine, HttpStoreConfig,
    HttpTaskStore, TaskAction, TaskStatus,
};

const DATE: &str = "2026-03-14";

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

fn manager() -> Actor {
    Actor::new(100, Role::Manager)
}

/// Helper to build a task row as the server would send it
fn task_json(id: i64, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "room": 100 + id,
        "zone": null,
        "cleaning_type": "checkout",
        "status": status,
        "assigned_to": 5,
        "scheduled_date": DATE,
        "due_time": null,
        "is_rush": false,
        "checklist_data": []
    })
}

fn engine_for(server: &ServerGuard) -> HousekeepingEngine<HttpTaskStore> {
    let store = HttpTaskStore::new(HttpStoreConfig {
        base_url: server.url(),
        timeout_secs: 5,
        bearer_token: None,
    })
    .expect("Failed to create store");
    HousekeepingEngine::new(store, &CacheConfig { enabled: true, ttl_ms: 300_000 })
}

fn list_matcher() -> Matcher {
    Matcher::UrlEncoded("scheduled_date".into(), DATE.into())
}

#[tokio::test]
async fn test_list_is_cached_within_ttl() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/tasks")
        .match_query(list_matcher())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!([task_json(1, "assigned")]).to_string())
        .expect(1)
        .create_async()
        .await;

    let engine = engine_for(&server);
    let first = engine.list_tasks_for_date(date()).await.unwrap();
    let second = engine.list_tasks_for_date(date()).await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(first[0].status, TaskStatus::Assigned);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_start_transition_posts_and_refetches() {
    let mut server = Server::new_async().await;
    // Two list fetches: initial prime and post-mutation refresh.
    let list_mock = server
        .mock("GET", "/tasks")
        .match_query(list_matcher())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!([task_json(1, "assigned")]).to_string())
        .expect(2)
        .create_async()
        .await;
    let start_mock = server
        .mock("POST", "/tasks/1/start")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(task_json(1, "in_progress").to_string())
        .expect(1)
        .create_async()
        .await;

    let engine = engine_for(&server);
    engine.list_tasks_for_date(date()).await.unwrap();

    let updated = engine
        .transition(1, TaskAction::Start, &manager(), &HashMap::new())
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::InProgress);

    list_mock.assert_async().await;
    start_mock.assert_async().await;
}

#[tokio::test]
async fn test_incomplete_checklist_blocks_before_request() {
    let mut server = Server::new_async().await;
    let mut task = task_json(1, "in_progress");
    task["checklist_data"] = serde_json::json!([{
        "id": 10,
        "name": "bathroom",
        "items": [
            {"id": 1, "text": "towels"},
            {"id": 2, "text": "sink"},
            {"id": 3, "text": "floor"}
        ]
    }]);
    let list_mock = server
        .mock("GET", "/tasks")
        .match_query(list_matcher())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!([task]).to_string())
        .expect(1)
        .create_async()
        .await;
    // No POST mock registered: a sent request would fail the test with
    // an unexpected 501 from mockito.
    let complete_mock = server
        .mock("POST", "/tasks/1/complete")
        .expect(0)
        .create_async()
        .await;

    let engine = engine_for(&server);
    engine.list_tasks_for_date(date()).await.unwrap();

    let partial: HashMap<i64, ChecklistProgress> =
        [(10, ChecklistProgress::new(3, 2))].into_iter().collect();
    let err = engine
        .transition(1, TaskAction::Complete, &manager(), &partial)
        .await
        .unwrap_err();

    match err {
        EngineError::ChecklistIncomplete { percent } => {
            assert!((percent - 200.0 / 3.0).abs() < 1e-9);
        }
        other => panic!("expected ChecklistIncomplete, got {other:?}"),
    }
    list_mock.assert_async().await;
    complete_mock.assert_async().await;
}

#[tokio::test]
async fn test_bulk_assign_validation_sends_nothing() {
    let server = Server::new_async().await;
    let engine = engine_for(&server);

    let err = engine.assign_many(&[], Some(5), date()).await.unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let err = engine.assign_many(&[1, 2], None, date()).await.unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
    // No mocks registered; any request would have panicked on refresh.
}

#[tokio::test]
async fn test_auto_generate_reports_zero_on_rerun() {
    let mut server = Server::new_async().await;
    let list_mock = server
        .mock("GET", "/tasks")
        .match_query(list_matcher())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!([task_json(1, "unassigned"), task_json(2, "unassigned")])
                .to_string(),
        )
        .expect(2)
        .create_async()
        .await;
    let first_mock = server
        .mock("POST", "/tasks/auto_generate")
        .match_body(Matcher::JsonString(format!(r#"{{"scheduled_date":"{DATE}"}}"#)))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"created_count": 2}"#)
        .expect(1)
        .create_async()
        .await;

    let engine = engine_for(&server);
    let report = engine.auto_generate(date()).await.unwrap();
    assert_eq!(report.created_count, 2);

    // Later registration takes precedence in mockito.
    let rerun_mock = server
        .mock("POST", "/tasks/auto_generate")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"created_count": 0}"#)
        .expect(1)
        .create_async()
        .await;

    let report = engine.auto_generate(date()).await.unwrap();
    assert_eq!(report.created_count, 0);

    list_mock.assert_async().await;
    first_mock.assert_async().await;
    rerun_mock.assert_async().await;
}

#[tokio::test]
async fn test_remote_error_detail_is_surfaced() {
    let mut server = Server::new_async().await;
    let list_mock = server
        .mock("GET", "/tasks")
        .match_query(list_matcher())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!([task_json(1, "assigned")]).to_string())
        .create_async()
        .await;
    let start_mock = server
        .mock("POST", "/tasks/1/start")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "task already started by another user"}"#)
        .create_async()
        .await;

    let engine = engine_for(&server);
    engine.list_tasks_for_date(date()).await.unwrap();

    let err = engine
        .transition(1, TaskAction::Start, &manager(), &HashMap::new())
        .await
        .unwrap_err();

    match err {
        EngineError::Remote { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "task already started by another user");
        }
        other => panic!("expected Remote, got {other:?}"),
    }
    list_mock.assert_async().await;
    start_mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    let store = HttpTaskStore::new(HttpStoreConfig {
        // Reserved TEST-NET-1 address, nothing listens there.
        base_url: "http://192.0.2.1:9/api".to_string(),
        timeout_secs: 1,
        bearer_token: None,
    })
    .expect("Failed to create store");
    let engine = HousekeepingEngine::new(store, &CacheConfig { enabled: true, ttl_ms: 300_000 });

    let err = engine.list_tasks_for_date(date()).await.unwrap_err();
    assert!(matches!(err, EngineError::Transport(_)));
    assert!(!err.is_client_side());
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/tasks")
        .match_query(list_matcher())
        .match_header("authorization", "Bearer secret-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let store = HttpTaskStore::new(HttpStoreConfig {
        base_url: server.url(),
        timeout_secs: 5,
        bearer_token: Some("secret-token".to_string()),
    })
    .expect("Failed to create store");
    let engine = HousekeepingEngine::new(store, &CacheConfig { enabled: true, ttl_ms: 300_000 });

    let tasks = engine.list_tasks_for_date(date()).await.unwrap();
    assert!(tasks.is_empty());
    mock.assert_async().await;
}
