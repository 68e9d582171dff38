//! Parameter extraction from query strings and request bodies.

use serde_json::{Map, Value};

/// Parse a urlencoded byte string (query string or form body) into a
/// parameter mapping. Repeated keys keep the last value.
pub fn from_urlencoded(input: &[u8]) -> Map<String, Value> {
    url::form_urlencoded::parse(input)
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect()
}

/// Parse a query string into a parameter mapping.
pub fn from_query(query: &str) -> Map<String, Value> {
    from_urlencoded(query.as_bytes())
}

/// Parse a JSON body into a parameter mapping. Non-object bodies (arrays,
/// scalars, invalid JSON) yield no parameters.
pub fn from_json(bytes: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice(bytes) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
