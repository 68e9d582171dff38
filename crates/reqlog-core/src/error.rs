//! Failure and fault types for the downstream-call outcome union.
//!
//! A downstream handler finishes in one of three ways: a normal response, a
//! framework-level [`Failure`] carrying a declared status, or a raised fault
//! ([`Fault`]). The interceptor logs all three and forwards the outcome to the
//! caller unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured framework-level failure, distinct from a raised fault.
///
/// Carries the status the after-line reports and an optional message logged
/// as `  Error: <message>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// HTTP status declared by the failure.
    pub status: u16,
    /// Optional human-readable message.
    pub message: Option<String>,
}

impl Failure {
    /// Create a failure with a status and no message.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            message: None,
        }
    }

    /// Create a failure with a status and a message.
    pub fn with_message(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "status {}: {}", self.status, message),
            None => write!(f, "status {}", self.status),
        }
    }
}

/// A raised fault surfaced by a downstream handler.
///
/// `kind` names the fault class in log output, producing lines such as
/// `  ArgumentError: bad input`.
pub trait Fault: std::error::Error {
    /// Short name identifying the fault class.
    fn kind(&self) -> &str;
}

/// Outcome union returned from the downstream call.
///
/// Replaces non-local control transfer with an explicit error channel the
/// interceptor can inspect: a structured [`Failure`] logs with its declared
/// status, a raised [`Fault`] logs with status 500. Both are forwarded to the
/// caller unchanged.
#[derive(Debug, Error, PartialEq)]
pub enum HandlerError<E> {
    /// Framework-level failure with a declared status and optional message.
    #[error("{0}")]
    Failure(Failure),
    /// Unhandled fault raised by the handler.
    #[error("{0}")]
    Fault(E),
}

/// Error loading [`LoggerSettings`](crate::config::LoggerSettings) from
/// configuration sources.
#[derive(Debug, Error)]
#[error("configuration error: {0}")]
pub struct SettingsError(#[from] config::ConfigError);
