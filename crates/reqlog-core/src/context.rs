//! Per-request context supplied by the host framework.
//!
//! Created per incoming call and discarded after the call completes; nothing
//! here is retained across requests.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Parameter sources exposed by the host, merged for logging.
///
/// Later sources override earlier ones on key collision: request params
/// (query/path), then the form-encoded body, then the framework-parsed body.
#[derive(Debug, Clone, Default)]
pub struct ParamSources {
    /// Query-string and path parameters.
    pub request: Map<String, Value>,
    /// Form-encoded body parameters, when the body was urlencoded.
    pub form: Option<Map<String, Value>>,
    /// Framework-parsed body (e.g. a JSON object body).
    pub parsed_body: Option<Map<String, Value>>,
}

impl ParamSources {
    /// Merge all sources into one mapping.
    pub fn merged(&self) -> Map<String, Value> {
        let mut merged = self.request.clone();
        if let Some(form) = &self.form {
            merged.extend(form.clone());
        }
        if let Some(body) = &self.parsed_body {
            merged.extend(body.clone());
        }
        merged
    }
}

/// Identifies the endpoint that handled a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Declared owner/group name, prefixed to the identifier when present.
    pub owner: Option<String>,
    /// Route namespace; the root path (`/`) is treated as empty.
    pub namespace: String,
    /// Remaining declared path segments.
    pub path: Vec<String>,
}

impl RouteDescriptor {
    /// Descriptor for a bare route path with no namespace or owner.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            owner: None,
            namespace: "/".to_string(),
            path: vec![path.into()],
        }
    }

    /// Compose the `Processing by` identifier.
    ///
    /// The namespace is the first segment (empty when it is the root path),
    /// each remaining segment has its leading `/` stripped, segments join
    /// with `/`, and the owner name prefixes the result when present.
    pub fn identifier(&self) -> String {
        let mut segments = Vec::with_capacity(self.path.len() + 1);
        if self.namespace == "/" {
            segments.push(String::new());
        } else {
            segments.push(self.namespace.clone());
        }
        for segment in &self.path {
            segments.push(segment.strip_prefix('/').unwrap_or(segment).to_string());
        }
        format!(
            "{}{}",
            self.owner.as_deref().unwrap_or(""),
            segments.join("/")
        )
    }
}

impl Default for RouteDescriptor {
    fn default() -> Self {
        Self {
            owner: None,
            namespace: "/".to_string(),
            path: Vec::new(),
        }
    }
}

/// Everything the interceptor reads about one request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// HTTP method, uppercase.
    pub method: String,
    /// Request path as received.
    pub path: String,
    /// Arrival wall-clock timestamp, rendered in the `Started` line.
    pub started_at: DateTime<Utc>,
    /// Route that will process the request.
    pub route: RouteDescriptor,
    /// Raw parameter sources.
    pub params: ParamSources,
    /// Raw header mapping with original casing preserved.
    pub headers: Vec<(String, String)>,
}

impl RequestContext {
    /// Context for a request arriving now, with empty params and headers.
    pub fn new(method: impl Into<String>, path: impl Into<String>, route: RouteDescriptor) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            started_at: Utc::now(),
            route,
            params: ParamSources::default(),
            headers: Vec::new(),
        }
    }
}
