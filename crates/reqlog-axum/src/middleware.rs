//! Access-log middleware — builds the request context and drives the core
//! interceptor around the downstream call.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::RawPathParamsRejection;
use axum::extract::{MatchedPath, RawPathParams, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;

use reqlog_core::{Failure, ParamSources, RequestContext, RequestLogger, RouteDescriptor};

use crate::params;

/// Largest request body buffered for parameter logging. Bodies over this
/// size (or without a declared length) pass through unbuffered and
/// contribute no body-derived parameters.
const MAX_BUFFERED_BODY: u64 = 64 * 1024;

/// Request/response access-logging middleware.
///
/// Wire with `axum::middleware::from_fn_with_state`, sharing one
/// [`RequestLogger`]. Produces one before-record and one after-record per
/// request. A [`Failure`] found in the response extensions (see
/// [`failure_response`]) takes the structured-failure logging path; any other
/// response logs its own status.
pub async fn access_log(
    State(logger): State<Arc<RequestLogger>>,
    path_params: Result<RawPathParams, RawPathParamsRejection>,
    request: Request,
    next: Next,
) -> Response {
    let (ctx, request) = context_from_request(request, path_params.ok()).await;
    let timer = logger.before(&ctx);

    let response = next.run(request).await;

    match response.extensions().get::<Failure>().cloned() {
        Some(failure) => logger.failure(timer, &failure),
        None => logger.after(timer, response.status().as_u16()),
    }
    response
}

/// Render a structured [`Failure`] as an HTTP response.
///
/// The failure rides in the response extensions so [`access_log`] logs its
/// message and declared status, and hosts can still observe it downstream.
pub fn failure_response(failure: Failure) -> Response {
    let status =
        StatusCode::from_u16(failure.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = match &failure.message {
        Some(message) => (status, message.clone()).into_response(),
        None => status.into_response(),
    };
    response.extensions_mut().insert(failure);
    response
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Form,
    Json,
    Opaque,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let mime = content_type.split(';').next().unwrap_or("").trim();
    if mime.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
        BodyKind::Form
    } else if mime.eq_ignore_ascii_case("application/json")
        || mime.to_ascii_lowercase().ends_with("+json")
    {
        BodyKind::Json
    } else {
        BodyKind::Opaque
    }
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Build the per-request context, buffering form/JSON bodies so their
/// parameters appear in the log, and reconstructing the request unchanged
/// for the downstream handler.
async fn context_from_request(
    request: Request,
    path_params: Option<RawPathParams>,
) -> (RequestContext, Request) {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let mut params = ParamSources::default();
    params.request = params::from_query(request.uri().query().unwrap_or(""));
    if let Some(path_params) = &path_params {
        for (key, value) in path_params.iter() {
            params
                .request
                .insert(key.to_string(), Value::String(value.to_string()));
        }
    }

    // http normalizes header names to lowercase; that casing is what the
    // selection sees and what gets logged.
    let headers = request
        .headers()
        .iter()
        .map(|(key, value)| {
            (
                key.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    let route = request
        .extensions()
        .get::<RouteDescriptor>()
        .cloned()
        .or_else(|| {
            request
                .extensions()
                .get::<MatchedPath>()
                .map(|matched| RouteDescriptor::from_path(matched.as_str()))
        })
        .unwrap_or_else(|| RouteDescriptor::from_path(path.clone()));

    let kind = body_kind(request.headers());
    let request = match (kind, declared_length(request.headers())) {
        (BodyKind::Opaque, _) | (_, None) => request,
        (_, Some(length)) if length > MAX_BUFFERED_BODY => request,
        (kind, Some(_)) => {
            let (parts, body) = request.into_parts();
            match body.collect().await {
                Ok(collected) => {
                    let bytes = collected.to_bytes();
                    match kind {
                        BodyKind::Form => params.form = Some(params::from_urlencoded(&bytes)),
                        BodyKind::Json => params.parsed_body = params::from_json(&bytes),
                        BodyKind::Opaque => {}
                    }
                    Request::from_parts(parts, Body::from(bytes))
                }
                Err(err) => {
                    tracing::warn!("failed to buffer request body for access log: {err}");
                    Request::from_parts(parts, Body::empty())
                }
            }
        }
    };

    let ctx = RequestContext {
        method,
        path,
        started_at: Utc::now(),
        route,
        params,
        headers,
    };
    (ctx, request)
}
