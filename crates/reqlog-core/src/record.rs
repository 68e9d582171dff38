//! Log record assembly and rendering.
//!
//! A record is the ordered sequence of lines produced for one phase. In
//! non-condensed mode each line is written to the sink as its own record; in
//! condensed mode blank lines are dropped, the rest are trimmed, and the
//! remainder joins into a single `" - "`-delimited record.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::sink::LogSink;

/// Ordered lines for one logging phase.
#[derive(Debug, Clone, Default)]
pub struct LogRecord {
    lines: Vec<String>,
}

impl LogRecord {
    /// Empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record holding a single line.
    pub fn from_line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }

    /// Append a line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// The lines in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Join into one condensed record: blank lines dropped, remaining lines
    /// trimmed, joined with `" - "`.
    pub fn condense(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" - ")
    }

    /// Write the record to the sink, line-by-line or condensed.
    pub fn emit(&self, sink: &dyn LogSink, condensed: bool) {
        if condensed {
            sink.write(&self.condense());
        } else {
            for line in &self.lines {
                sink.write(line);
            }
        }
    }
}

/// Render a parameter mapping in hash-literal form: `{"id"=>"1"}`.
///
/// `serde_json::Map` keeps keys sorted, so output is deterministic for a
/// given mapping. Values render as JSON.
pub fn render_params(params: &Map<String, Value>) -> String {
    let inner = params
        .iter()
        .map(|(key, value)| format!("{key:?}=>{value}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{inner}}}")
}

/// Render selected headers in hash-literal form, sorted by key.
pub fn render_headers(headers: &BTreeMap<String, String>) -> String {
    let inner = headers
        .iter()
        .map(|(key, value)| format!("{key:?}=>{value:?}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{inner}}}")
}

/// Render an elapsed duration in milliseconds, rounded to two decimals and
/// displayed with at least one decimal place: `5.0`, `5.1`, `5.25`.
pub fn render_millis(elapsed: Duration) -> String {
    let millis = elapsed.as_secs_f64() * 1000.0;
    let rounded = (millis * 100.0).round() / 100.0;
    let mut out = format!("{rounded:.2}");
    while out.ends_with('0') {
        out.pop();
    }
    if out.ends_with('.') {
        out.push('0');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn condense_drops_blank_lines_and_trims() {
        let mut record = LogRecord::new();
        record.push("");
        record.push("A");
        record.push("");
        record.push("  B  ");

        assert_eq!(record.condense(), "A - B");
    }

    #[test]
    fn emit_line_by_line_keeps_blanks() {
        let sink = crate::sink::MemorySink::new();
        let mut record = LogRecord::new();
        record.push("");
        record.push("one");

        record.emit(&sink, false);

        assert_eq!(sink.records(), vec!["", "one"]);
    }

    #[test]
    fn renders_params_as_hash_literal() {
        let params = match json!({"id": "1", "count": 3}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        assert_eq!(render_params(&params), r#"{"count"=>3, "id"=>"1"}"#);
    }

    #[test]
    fn renders_empty_params() {
        assert_eq!(render_params(&Map::new()), "{}");
    }

    #[test]
    fn renders_headers_sorted() {
        let mut headers = BTreeMap::new();
        headers.insert("X-Foo".to_string(), "1".to_string());
        headers.insert("Accept".to_string(), "json".to_string());
        assert_eq!(
            render_headers(&headers),
            r#"{"Accept"=>"json", "X-Foo"=>"1"}"#
        );
    }

    #[test]
    fn renders_millis_with_at_least_one_decimal() {
        assert_eq!(render_millis(Duration::from_millis(5)), "5.0");
        assert_eq!(render_millis(Duration::from_micros(5250)), "5.25");
        assert_eq!(render_millis(Duration::from_micros(5100)), "5.1");
        assert_eq!(render_millis(Duration::ZERO), "0.0");
    }
}
