//! The request logging interceptor.
//!
//! Two phases around one handler invocation, always in that order: `before`
//! emits the start/params/headers record and returns a [`RequestTimer`];
//! `after` consumes the timer and emits the completion record. [`RequestTimer`]
//! is neither `Clone` nor `Copy`, so the after-phase runs exactly once per
//! call regardless of success, fault, or structured failure.

use std::time::{Duration, Instant};

use serde_json::{Map, Value};

use crate::config::LoggerConfig;
use crate::context::RequestContext;
use crate::error::{Failure, Fault, HandlerError};
use crate::record::{LogRecord, render_headers, render_millis, render_params};

/// Timestamp format for the `Started` line, e.g. `2026-08-27 10:00:00 +0000`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Implemented by handler return values that expose an HTTP status code.
pub trait ResponseStatus {
    /// The status the after-line reports.
    fn status_code(&self) -> u16;
}

impl ResponseStatus for u16 {
    fn status_code(&self) -> u16 {
        *self
    }
}

impl ResponseStatus for http::StatusCode {
    fn status_code(&self) -> u16 {
        self.as_u16()
    }
}

impl<B> ResponseStatus for http::Response<B> {
    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }
}

/// Monotonic timer handed out by [`RequestLogger::before`] and consumed by
/// the after-phase.
#[derive(Debug)]
pub struct RequestTimer {
    started: Instant,
}

impl RequestTimer {
    pub(crate) fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time elapsed since the before-phase.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Request logging interceptor.
///
/// Wraps a downstream handler call with before/after access logging. Given a
/// handler and a request context, [`call`](Self::call) produces side effects
/// identical to invoking the handler directly, plus ordered log output, and
/// forwards the handler's result or error unchanged.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    config: LoggerConfig,
}

impl RequestLogger {
    /// Create an interceptor with the given configuration.
    pub fn new(config: LoggerConfig) -> Self {
        Self { config }
    }

    /// The wired configuration.
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Before-phase: emit the separator, `Started`, `Processing by`,
    /// `Parameters`, and (when enabled) `Headers` lines.
    pub fn before(&self, ctx: &RequestContext) -> RequestTimer {
        let mut record = LogRecord::new();
        record.push("");
        record.push(format!(
            "Started {} \"{}\" at {}",
            ctx.method,
            ctx.path,
            ctx.started_at.format(TIMESTAMP_FORMAT)
        ));
        record.push(format!("Processing by {}", ctx.route.identifier()));
        record.push(format!(
            "  Parameters: {}",
            render_params(&self.filtered_params(ctx))
        ));
        if self.config.headers.is_enabled() {
            let selected = self.config.headers.select(&ctx.headers);
            record.push(format!("  Headers: {}", render_headers(&selected)));
        }
        self.emit(record);
        RequestTimer::start()
    }

    /// After-phase: emit `Completed <status> in <elapsed>ms` and a trailing
    /// separator.
    pub fn after(&self, timer: RequestTimer, status: u16) {
        let mut record = LogRecord::new();
        record.push(format!(
            "Completed {status} in {}ms",
            render_millis(timer.elapsed())
        ));
        record.push("");
        self.emit(record);
    }

    /// Log a raised fault as `  <Kind>: <message>`, then the after-line with
    /// status 500.
    pub fn fault(&self, timer: RequestTimer, kind: &str, message: &str) {
        self.emit(LogRecord::from_line(format!("  {kind}: {message}")));
        self.after(timer, 500);
    }

    /// Log a structured failure's message when present, then the after-line
    /// with its declared status.
    pub fn failure(&self, timer: RequestTimer, failure: &Failure) {
        if let Some(message) = &failure.message {
            self.emit(LogRecord::from_line(format!("  Error: {message}")));
        }
        self.after(timer, failure.status);
    }

    /// Drive the full before/invoke/after cycle around an async handler.
    ///
    /// All three outcomes are logged and forwarded unchanged: a successful
    /// response logs its own status, a [`Fault`] logs its kind and message
    /// with status 500, a [`Failure`] logs its message with its declared
    /// status.
    pub async fn call<T, E, F, Fut>(
        &self,
        ctx: &RequestContext,
        handler: F,
    ) -> Result<T, HandlerError<E>>
    where
        T: ResponseStatus,
        E: Fault,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, HandlerError<E>>>,
    {
        let timer = self.before(ctx);
        match handler().await {
            Ok(response) => {
                self.after(timer, response.status_code());
                Ok(response)
            }
            Err(HandlerError::Fault(fault)) => {
                self.fault(timer, fault.kind(), &fault.to_string());
                Err(HandlerError::Fault(fault))
            }
            Err(HandlerError::Failure(failure)) => {
                self.failure(timer, &failure);
                Err(HandlerError::Failure(failure))
            }
        }
    }

    /// Merge the request's parameter sources and apply the configured filter.
    pub fn filtered_params(&self, ctx: &RequestContext) -> Map<String, Value> {
        let merged = ctx.params.merged();
        match &self.config.filter {
            Some(filter) => filter.filter(merged),
            None => merged,
        }
    }

    fn emit(&self, record: LogRecord) {
        record.emit(self.config.sink.as_ref(), self.config.condensed);
    }
}
