//! # reqlog-axum
//!
//! Axum adapter for the `reqlog` request access-logging interceptor.
//!
//! The [`access_log`](middleware::access_log) middleware builds a
//! [`RequestContext`](reqlog_core::RequestContext) from each incoming request
//! (query string, urlencoded form body, JSON body, headers, matched route)
//! and drives the core interceptor around the downstream call.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use axum::{Router, middleware::from_fn_with_state, routing::get};
//! use reqlog_axum::access_log;
//! use reqlog_core::{HeaderMode, LoggerConfig, RequestLogger};
//!
//! let logger = Arc::new(RequestLogger::new(
//!     LoggerConfig::builder()
//!         .headers(HeaderMode::Only(vec!["x-request-id".to_string()]))
//!         .build(),
//! ));
//!
//! let app: Router = Router::new()
//!     .route("/users/{id}", get(|| async { "ok" }))
//!     .layer(from_fn_with_state(logger, access_log));
//! ```
//!
//! Hosts that signal validation failures as responses should build them with
//! [`failure_response`](middleware::failure_response) so the middleware logs
//! the failure's message and declared status instead of a bare status line.

pub mod middleware;
pub mod params;

pub use middleware::{access_log, failure_response};
