//! Interceptor configuration.
//!
//! [`LoggerConfig`] is immutable after construction and lives for the
//! process; it is built programmatically through [`LoggerConfig::builder`] or
//! deserialized as [`LoggerSettings`] from layered configuration files and
//! `REQLOG_`-prefixed environment variables.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::filter::{ParamFilter, RedactFilter};
use crate::headers::HeaderMode;
use crate::sink::{LogSink, StdoutSink};

/// Immutable interceptor configuration.
#[derive(Clone)]
pub struct LoggerConfig {
    /// Optional capability that redacts the merged parameter mapping.
    pub filter: Option<Arc<dyn ParamFilter>>,
    /// Which headers appear in the before-log.
    pub headers: HeaderMode,
    /// Single-line output mode.
    pub condensed: bool,
    /// Destination for log records.
    pub sink: Arc<dyn LogSink>,
}

impl LoggerConfig {
    /// Start building a configuration.
    pub fn builder() -> LoggerConfigBuilder {
        LoggerConfigBuilder::default()
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("filter", &self.filter.is_some())
            .field("headers", &self.headers)
            .field("condensed", &self.condensed)
            .finish_non_exhaustive()
    }
}

/// Builder for [`LoggerConfig`].
#[derive(Default)]
pub struct LoggerConfigBuilder {
    filter: Option<Arc<dyn ParamFilter>>,
    headers: HeaderMode,
    condensed: bool,
    sink: Option<Arc<dyn LogSink>>,
}

impl LoggerConfigBuilder {
    /// Set the parameter filter.
    pub fn filter(mut self, filter: impl ParamFilter + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Set the header logging mode.
    pub fn headers(mut self, headers: HeaderMode) -> Self {
        self.headers = headers;
        self
    }

    /// Enable or disable condensed single-line output.
    pub fn condensed(mut self, condensed: bool) -> Self {
        self.condensed = condensed;
        self
    }

    /// Set the log sink.
    pub fn sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Finish, defaulting to a line-oriented stdout sink when none was set.
    pub fn build(self) -> LoggerConfig {
        LoggerConfig {
            filter: self.filter,
            headers: self.headers,
            condensed: self.condensed,
            sink: self.sink.unwrap_or_else(|| Arc::new(StdoutSink)),
        }
    }
}

/// Declarative settings, deserializable from configuration files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Header logging mode: `"none"`, `"all"`, a single name, or a list.
    #[serde(default)]
    pub headers: HeaderMode,
    /// Single-line output mode.
    #[serde(default)]
    pub condensed: bool,
    /// Parameter names redacted from the log, case-insensitively.
    #[serde(default)]
    pub filtered_params: Vec<String>,
}

impl LoggerSettings {
    /// Load settings from layered sources: `<prefix>.toml` (optional) plus
    /// `REQLOG_`-prefixed environment variables.
    pub fn load(path: &str) -> Result<Self, SettingsError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("REQLOG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Convert into a [`LoggerConfig`], installing a [`RedactFilter`] when
    /// any filtered parameter names are set.
    pub fn into_config(self) -> LoggerConfig {
        let mut builder = LoggerConfig::builder()
            .headers(self.headers)
            .condensed(self.condensed);
        if !self.filtered_params.is_empty() {
            builder = builder.filter(RedactFilter::new(self.filtered_params));
        }
        builder.build()
    }
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            headers: HeaderMode::None,
            condensed: false,
            filtered_params: Vec::new(),
        }
    }
}
