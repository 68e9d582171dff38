//! Parameter filtering — redaction of sensitive values before logging.

use serde_json::{Map, Value};

/// Redacts or transforms the merged parameter mapping before it is logged.
///
/// Filtering is a pure function of its input: given the same mapping, the
/// output must be identical on repeated calls.
pub trait ParamFilter: Send + Sync {
    /// Filter the merged parameter mapping.
    fn filter(&self, params: Map<String, Value>) -> Map<String, Value>;
}

/// Replacement value written over redacted parameters.
pub const FILTERED: &str = "[FILTERED]";

/// [`ParamFilter`] that replaces the values of named keys with
/// [`FILTERED`]. Key matching is case-insensitive and recurses into nested
/// objects and arrays.
#[derive(Debug, Clone)]
pub struct RedactFilter {
    keys: Vec<String>,
}

impl RedactFilter {
    /// Create a filter redacting the given parameter names.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    fn is_redacted(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k.eq_ignore_ascii_case(key))
    }

    fn redact_value(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.redact_map(map)),
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|v| self.redact_value(v)).collect())
            }
            other => other,
        }
    }

    fn redact_map(&self, map: Map<String, Value>) -> Map<String, Value> {
        map.into_iter()
            .map(|(key, value)| {
                if self.is_redacted(&key) {
                    (key, Value::String(FILTERED.to_string()))
                } else {
                    (key, self.redact_value(value))
                }
            })
            .collect()
    }
}

impl ParamFilter for RedactFilter {
    fn filter(&self, params: Map<String, Value>) -> Map<String, Value> {
        self.redact_map(params)
    }
}
