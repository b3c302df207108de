//! Log sinks consumed by the reporter
//!
//! The reporter only calls [`LogSink::info`] and [`LogSink::error`]; what a
//! sink does with the text (trace it, capture it, both) is its own business.

use crate::error::AssertionFailure;
use parking_lot::Mutex;
use std::sync::Arc;

/// Tracing target used for suite output
pub const TEST_LOG_TARGET: &str = "vrtk::test";

/// Logging facility used by the reporter
pub trait LogSink: Send + Sync {
    /// Emit an informational line. May contain console markup.
    fn info(&self, text: &str);

    /// Escalate a failed assertion
    fn error(&self, failure: &AssertionFailure);
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn info(&self, text: &str) {
        (**self).info(text);
    }

    fn error(&self, failure: &AssertionFailure) {
        (**self).error(failure);
    }
}

/// Sink that forwards to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl TracingLogSink {
    /// Create a tracing sink
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingLogSink {
    fn info(&self, text: &str) {
        tracing::info!(target: TEST_LOG_TARGET, "{text}");
    }

    fn error(&self, failure: &AssertionFailure) {
        tracing::error!(
            target: TEST_LOG_TARGET,
            test = %failure.test,
            setup = %failure.setup,
            "{failure}"
        );
    }
}

/// Severity of a captured entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Informational line
    Info,
    /// Escalated assertion failure
    Error,
}

/// A captured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Entry severity
    pub level: LogLevel,
    /// Rendered line, or the failure message for errors
    pub message: String,
    /// Failure payload for error entries
    pub failure: Option<AssertionFailure>,
}

/// Sink that records every entry in order
///
/// Clones share the same buffer, so a suite can hand one clone to a runner
/// and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogSink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl RecordingLogSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries captured so far
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Messages of informational entries
    pub fn info_lines(&self) -> Vec<String> {
        self.lines_at(LogLevel::Info)
    }

    /// Messages of error entries
    pub fn error_lines(&self) -> Vec<String> {
        self.lines_at(LogLevel::Error)
    }

    /// Number of captured entries
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True when nothing was captured
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop everything captured so far
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn lines_at(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.clone())
            .collect()
    }
}

impl LogSink for RecordingLogSink {
    fn info(&self, text: &str) {
        self.entries.lock().push(LogEntry {
            level: LogLevel::Info,
            message: text.to_string(),
            failure: None,
        });
    }

    fn error(&self, failure: &AssertionFailure) {
        self.entries.lock().push(LogEntry {
            level: LogLevel::Error,
            message: failure.to_string(),
            failure: Some(failure.clone()),
        });
    }
}

/// Sink that forwards every entry to two sinks
#[derive(Debug, Clone)]
pub struct TeeLogSink<A, B> {
    first: A,
    second: B,
}

impl<A: LogSink, B: LogSink> TeeLogSink<A, B> {
    /// Forward to `first`, then `second`
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: LogSink, B: LogSink> LogSink for TeeLogSink<A, B> {
    fn info(&self, text: &str) {
        self.first.info(text);
        self.second.info(text);
    }

    fn error(&self, failure: &AssertionFailure) {
        self.first.error(failure);
        self.second.error(failure);
    }
}
