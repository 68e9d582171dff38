//! # reqlog-core
//!
//! Framework-agnostic request access-logging interceptor. Wraps a downstream
//! handler invocation and emits an ordered log record before and after the
//! call: start time, method, path, parameters (optionally filtered), optional
//! headers, status, and elapsed time.
//!
//! The interceptor owns no scheduler, storage, or protocol. It runs
//! synchronously on whatever task the host pipeline uses, and the only shared
//! resources are the immutable [`LoggerConfig`] and the [`LogSink`], both
//! wired once at process start.
//!
//! Framework adapters (see `reqlog-axum`) build a [`RequestContext`] per
//! request and drive [`RequestLogger`] around the downstream call.

pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod headers;
pub mod interceptor;
pub mod record;
pub mod sink;

pub use config::{LoggerConfig, LoggerSettings};
pub use context::{ParamSources, RequestContext, RouteDescriptor};
pub use error::{Failure, Fault, HandlerError, SettingsError};
pub use filter::{ParamFilter, RedactFilter};
pub use headers::HeaderMode;
pub use interceptor::{RequestLogger, RequestTimer, ResponseStatus};
pub use record::LogRecord;
pub use sink::{LogSink, MemorySink, StdoutSink, TracingSink};
