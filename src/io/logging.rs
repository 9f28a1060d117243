//! Structured JSON-lines logging
//!
//! Events carry a level, a target (the emitting module) and an optional map of
//! fields. Sinks decide where serialized events go; the logger filters by a
//! minimum level before anything is serialized.

use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

/// Free-form structured fields attached to an event
pub type LogFields = Map<String, Value>;

/// Severity of a log event, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Fine-grained tracing
    Trace,
    /// Diagnostic detail
    Debug,
    /// Normal operation
    Info,
    /// Recoverable problems such as rejected records
    Warn,
    /// Failures surfaced to the user
    Error,
}

/// A single structured log record
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    /// Milliseconds since the Unix epoch
    pub ts_ms: u128,
    /// Event severity
    pub level: LogLevel,
    /// Emitting component
    pub target: String,
    /// Human readable message
    pub message: String,
    /// Structured context
    #[serde(skip_serializing_if = "LogFields::is_empty", default)]
    pub fields: LogFields,
}

impl LogEvent {
    /// Create an event without fields
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ts_ms: current_ms(),
            level,
            target: target.into(),
            message: message.into(),
            fields: LogFields::new(),
        }
    }

    /// Create an event with structured fields
    pub fn with_fields(
        level: LogLevel,
        target: impl Into<String>,
        message: impl Into<String>,
        fields: LogFields,
    ) -> Self {
        Self {
            fields,
            ..Self::new(level, target, message)
        }
    }
}

fn current_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Destination for log events
pub trait LogSink: Send + Sync {
    /// Write one event
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be serialized or written
    fn log(&self, event: &LogEvent) -> std::io::Result<()>;
}

/// Writes one JSON object per line to standard error
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn log(&self, event: &LogEvent) -> std::io::Result<()> {
        let mut line = serde_json::to_string(event).map_err(std::io::Error::other)?;
        line.push('\n');
        std::io::stderr().lock().write_all(line.as_bytes())
    }
}

/// Keeps events in memory, mostly for assertions in tests
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events
    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl LogSink for MemorySink {
    fn log(&self, event: &LogEvent) -> std::io::Result<()> {
        let mut events = self
            .events
            .lock()
            .map_err(|_poisoned| std::io::Error::other("memory sink poisoned"))?;
        events.push(event.clone());
        Ok(())
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> std::io::Result<()> {
        Ok(())
    }
}

/// Cheaply clonable handle that filters and forwards events to a sink
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    min_level: LogLevel,
}

impl Logger {
    /// Create a logger that forwards events at `min_level` or above
    pub fn new<S>(sink: S, min_level: LogLevel) -> Self
    where
        S: LogSink + 'static,
    {
        Self {
            sink: Arc::new(sink),
            min_level,
        }
    }

    /// Create a logger around a shared sink
    pub fn from_shared(sink: Arc<dyn LogSink>, min_level: LogLevel) -> Self {
        Self { sink, min_level }
    }

    /// Logger that drops every event
    pub fn disabled() -> Self {
        Self::new(NullSink, LogLevel::Error)
    }

    /// Whether events at `level` would be forwarded
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Log a plain message
    pub fn log(&self, level: LogLevel, target: &str, message: &str) {
        if self.enabled(level) {
            self.emit(&LogEvent::new(level, target, message));
        }
    }

    /// Log a message with structured fields
    pub fn log_with_fields(
        &self,
        level: LogLevel,
        target: &str,
        message: &str,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) {
        if self.enabled(level) {
            let map = fields.into_iter().collect::<LogFields>();
            self.emit(&LogEvent::with_fields(level, target, message, map));
        }
    }

    // Logging never fails the operation being logged
    fn emit(&self, event: &LogEvent) {
        let _ = self.sink.log(event);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

/// Build a structured field pair
pub fn json_kv(key: &str, value: impl Into<Value>) -> (String, Value) {
    (key.to_string(), value.into())
}
