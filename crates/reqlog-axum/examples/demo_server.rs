//! Minimal server showing the access-log middleware wired into a router.
//!
//! Run with `cargo run -p reqlog-axum --example demo_server`, then:
//!
//! ```text
//! curl 'http://127.0.0.1:3000/users/1?debug=true'
//! curl -d 'user=bob&password=hunter2' http://127.0.0.1:3000/login
//! ```

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tracing_subscriber::EnvFilter;

use reqlog_axum::{access_log, failure_response};
use reqlog_core::{Failure, LoggerConfig, LoggerSettings, RedactFilter, RequestLogger, TracingSink};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Layered settings: reqlog.toml (optional) + REQLOG_* env vars, falling
    // back to a programmatic config with redaction and a tracing sink.
    let config = match LoggerSettings::load("reqlog") {
        Ok(settings) => settings.into_config(),
        Err(err) => {
            tracing::warn!("settings unavailable ({err}), using defaults");
            LoggerConfig::builder()
                .filter(RedactFilter::new(["password"]))
                .sink(TracingSink)
                .build()
        }
    };
    let logger = Arc::new(RequestLogger::new(config));

    let app: Router = Router::new()
        .route("/users/{id}", get(show_user))
        .route("/login", post(login))
        .layer(from_fn_with_state(logger, access_log));

    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind: {err}");
            std::process::exit(1);
        }
    };
    tracing::info!("demo server listening on 127.0.0.1:3000");

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("server error: {err}");
        std::process::exit(1);
    }
}

async fn show_user() -> (StatusCode, &'static str) {
    (StatusCode::OK, "user 1")
}

async fn login(body: String) -> axum::response::Response {
    if body.contains("password=hunter2") {
        failure_response(Failure::with_message(401, "bad credentials"))
    } else {
        failure_response(Failure::new(422))
    }
}
