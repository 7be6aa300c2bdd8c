use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use sequence_timers::{create_router, AppState};

fn app() -> Router {
    create_router(Arc::new(AppState::new(0, "127.0.0.1".to_string())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_sequence(app: &Router, name: &str, durations: &[&str]) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/sequences",
        Some(json!({ "name": name, "durations": durations })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_and_list_sequences() {
    let app = app();
    let created = create_sequence(&app, "pomodoro", &["25:00", "5:00", "1:00:00"]).await;

    assert_eq!(created["name"], "pomodoro");
    assert_eq!(created["timers"], json!(["25:00", "05:00", "01:00:00"]));
    assert_eq!(created["durationsMs"], json!([1_500_000, 300_000, 3_600_000]));
    assert_eq!(created["totalDurationMs"], 5_400_000);

    let (status, list) = send(&app, Method::GET, "/sequences?page=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
    assert_eq!(list["items"][0]["id"], created["id"]);

    let uri = format!("/sequences/{}", created["id"].as_str().unwrap());
    let (status, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "pomodoro");
}

#[tokio::test]
async fn rejects_invalid_sequences() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/sequences",
        Some(json!({ "name": "bad", "durations": ["10:00", "soon"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("timer 2"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/sequences",
        Some(json!({ "name": "empty", "durations": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/sequences",
        Some(json!({ "name": "zero", "durations": ["0:00"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_timers_are_rejected_and_store_stays_usable() {
    let app = app();

    for huge in ["1e13", "1e300", "10000000:00:00"] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/sequences",
            Some(json!({ "name": "huge", "durations": [huge] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{huge}: {body}");
    }

    let (status, list) = send(&app, Method::GET, "/sequences", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 0);

    let longest = create_sequence(&app, "week", &["168:00:00"]).await;
    let id = longest["id"].as_str().unwrap();
    let (status, run) = send(&app, Method::POST, &format!("/sequences/{id}/runs"), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(run["projection"]["state"], "running");
}

#[tokio::test]
async fn run_lifecycle() {
    let app = app();
    let sequence = create_sequence(&app, "focus", &["10:00", "25:00"]).await;
    let id = sequence["id"].as_str().unwrap();

    let (status, run) = send(&app, Method::POST, &format!("/sequences/{id}/runs"), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(run["sequenceName"], "focus");
    assert_eq!(run["projection"]["state"], "running");
    assert_eq!(run["projection"]["currentTimer"], 600_000);
    assert_eq!(run["projection"]["futureTimers"], json!([1_500_000]));
    assert!(run["projection"]["endsAt"].is_string());

    let run_uri = format!("/runs/{}", run["id"].as_str().unwrap());

    let (status, paused) = send(&app, Method::POST, &format!("{run_uri}/toggle"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paused["projection"]["state"], "paused");
    assert!(paused["projection"]["endsAt"].is_null());

    let (status, body) = send(&app, Method::POST, &format!("{run_uri}/pause"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already paused"));

    let (status, resumed) = send(&app, Method::POST, &format!("{run_uri}/unpause"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resumed["projection"]["state"], "running");

    let (status, fetched) = send(&app, Method::GET, &run_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], run["id"]);

    let (status, stray) = send(&app, Method::POST, &format!("{run_uri}/unpause"), None).await;
    assert_eq!(status, StatusCode::CONFLICT, "{stray}");
}

#[tokio::test]
async fn unknown_ids() {
    let app = app();
    let missing = "00000000-0000-4000-8000-000000000000";

    let (status, _) = send(&app, Method::GET, &format!("/runs/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, &format!("/sequences/{missing}/runs"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/runs/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_counts_store_contents() {
    let app = app();
    let sequence = create_sequence(&app, "s", &["1:00"]).await;
    let id = sequence["id"].as_str().unwrap();
    send(&app, Method::POST, &format!("/sequences/{id}/runs"), None).await;

    let (status, body) = send(&app, Method::GET, "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sequences"], 1);
    assert_eq!(body["runs"], 1);
    assert_eq!(body["lastAction"], "start-run");
}
