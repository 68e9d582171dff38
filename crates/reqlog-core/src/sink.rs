//! Log sinks — destinations for emitted records.
//!
//! A sink receives one record at a time and is expected to be safe for
//! concurrent appends on its own; the interceptor performs no serialization
//! beyond a single `write` call per record.

use std::io::Write;
use std::sync::{Arc, Mutex};

/// Destination for log records.
pub trait LogSink: Send + Sync {
    /// Write one record. In non-condensed mode every line of a phase is its
    /// own record, including blank separator lines.
    fn write(&self, record: &str);
}

/// Line-oriented standard-output sink. The default when none is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write(&self, record: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{record}");
    }
}

/// Sink that forwards each record to `tracing` at INFO level under the
/// `reqlog::access` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, record: &str) {
        tracing::info!(target: "reqlog::access", "{}", record);
    }
}

/// In-memory sink that captures records for inspection, primarily in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records written so far, in order.
    pub fn records(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl LogSink for MemorySink {
    fn write(&self, record: &str) {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_preserves_order() {
        let sink = MemorySink::new();
        sink.write("first");
        sink.write("");
        sink.write("second");
        assert_eq!(sink.records(), vec!["first", "", "second"]);
    }
}
