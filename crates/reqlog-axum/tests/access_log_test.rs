//! Integration tests driving a real router through the access-log middleware.

use std::sync::Arc;

use axum::body::Body;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::{Extension, Router};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use reqlog_axum::{access_log, failure_response};
use reqlog_core::{
    Failure, HeaderMode, LoggerConfig, MemorySink, RedactFilter, RequestLogger, RouteDescriptor,
};

fn logger_with(sink: MemorySink) -> Arc<RequestLogger> {
    Arc::new(RequestLogger::new(
        LoggerConfig::builder().sink(sink).build(),
    ))
}

fn assert_contains(records: &[String], expected: &str) {
    assert!(
        records.iter().any(|r| r == expected),
        "expected record {expected:?} in {records:?}"
    );
}

fn assert_completed(records: &[String], status: u16) {
    assert!(
        records
            .iter()
            .any(|r| r.starts_with(&format!("Completed {status} in ")) && r.ends_with("ms")),
        "expected Completed {status} record in {records:?}"
    );
}

#[tokio::test]
async fn logs_matched_route_query_and_path_params() {
    let sink = MemorySink::new();
    let app = Router::new()
        .route("/users/{id}", get(|| async { "ok" }))
        .layer(from_fn_with_state(logger_with(sink.clone()), access_log));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/users/1?debug=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let records = sink.records();
    assert!(records[1].starts_with("Started GET \"/users/1\" at "));
    assert_contains(&records, "Processing by /users/{id}");
    assert_contains(&records, "  Parameters: {\"debug\"=>\"true\", \"id\"=>\"1\"}");
    assert_completed(&records, 200);
}

#[tokio::test]
async fn form_body_params_are_logged_and_body_reaches_the_handler() {
    let sink = MemorySink::new();
    let app = Router::new()
        .route("/login", post(|body: String| async move { body }))
        .layer(from_fn_with_state(logger_with(sink.clone()), access_log));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::CONTENT_LENGTH, "19")
                .body(Body::from("user=bob&remember=1"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"user=bob&remember=1");

    assert_contains(
        &sink.records(),
        "  Parameters: {\"remember\"=>\"1\", \"user\"=>\"bob\"}",
    );
}

#[tokio::test]
async fn json_body_overrides_query_params_on_collision() {
    let sink = MemorySink::new();
    let app = Router::new()
        .route("/items", post(|| async { StatusCode::CREATED }))
        .layer(from_fn_with_state(logger_with(sink.clone()), access_log));

    let payload = r#"{"id":"2"}"#;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/items?id=1")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::CONTENT_LENGTH, payload.len().to_string())
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let records = sink.records();
    assert_contains(&records, "  Parameters: {\"id\"=>\"2\"}");
    assert_completed(&records, 201);
}

#[tokio::test]
async fn structured_failure_logs_message_and_declared_status() {
    let sink = MemorySink::new();
    let app = Router::new()
        .route(
            "/users/{id}",
            get(|| async { failure_response(Failure::with_message(422, "invalid id")) }),
        )
        .layer(from_fn_with_state(logger_with(sink.clone()), access_log));

    let response = app
        .oneshot(Request::builder().uri("/users/x").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let records = sink.records();
    assert_contains(&records, "  Error: invalid id");
    assert_completed(&records, 422);
}

#[tokio::test]
async fn plain_error_status_logs_without_error_line() {
    let sink = MemorySink::new();
    let app = Router::new()
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
        .layer(from_fn_with_state(logger_with(sink.clone()), access_log));

    let response = app
        .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let records = sink.records();
    assert!(!records.iter().any(|r| r.starts_with("  Error:")));
    assert_completed(&records, 404);
}

#[tokio::test]
async fn selected_headers_are_logged() {
    let sink = MemorySink::new();
    let logger = Arc::new(RequestLogger::new(
        LoggerConfig::builder()
            .headers(HeaderMode::Only(vec!["x-request-id".to_string()]))
            .sink(sink.clone())
            .build(),
    ));
    let app = Router::new()
        .route("/ping", get(|| async { "pong" }))
        .layer(from_fn_with_state(logger, access_log));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/ping")
                .header("X-Request-Id", "abc123")
                .header("Accept", "text/plain")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_contains(&sink.records(), "  Headers: {\"x-request-id\"=>\"abc123\"}");
}

#[tokio::test]
async fn form_params_are_redacted_by_the_configured_filter() {
    let sink = MemorySink::new();
    let logger = Arc::new(RequestLogger::new(
        LoggerConfig::builder()
            .filter(RedactFilter::new(["password"]))
            .sink(sink.clone())
            .build(),
    ));
    let app = Router::new()
        .route("/login", post(|| async { StatusCode::OK }))
        .layer(from_fn_with_state(logger, access_log));

    let body = "user=bob&password=hunter2";
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::CONTENT_LENGTH, body.len().to_string())
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_contains(
        &sink.records(),
        "  Parameters: {\"password\"=>\"[FILTERED]\", \"user\"=>\"bob\"}",
    );
}

#[tokio::test]
async fn host_route_descriptor_extension_wins_over_matched_path() {
    let sink = MemorySink::new();
    let route = RouteDescriptor {
        owner: Some("AdminAPI".to_string()),
        namespace: "/".to_string(),
        path: vec!["/users".to_string()],
    };
    let app = Router::new()
        .route("/admin/users", get(|| async { "ok" }))
        .layer(from_fn_with_state(logger_with(sink.clone()), access_log))
        .layer(Extension(route));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_contains(&sink.records(), "Processing by AdminAPI/users");
}
