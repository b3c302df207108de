//! Error types for the test harness
//!
//! Two families live here. [`AssertionFailure`] is the payload handed to a
//! [`LogSink`](crate::sink::LogSink) when an assertion does not hold; it is
//! built, logged and dropped, never returned through `?`. [`HarnessError`]
//! covers the infrastructure around a run (frame scheduling, task joins,
//! configuration).

use thiserror::Error;

/// Result type for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;

/// A failed assertion, constructed as a log payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionFailure {
    /// Failure message supplied by the suite
    pub message: String,
    /// Test group label active when the assertion failed
    pub test: String,
    /// Setup label active when the assertion failed
    pub setup: String,
}

impl AssertionFailure {
    /// Create a failure annotated with the current test/setup labels
    pub fn new(
        message: impl Into<String>,
        test: impl Into<String>,
        setup: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            test: test.into(),
            setup: setup.into(),
        }
    }

    /// `test.setup` pair as shown in failure lines
    pub fn location(&self) -> String {
        format!("{}.{}", self.test, self.setup)
    }
}

/// Errors raised by the harness infrastructure
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The host stopped producing frames before the checkpoint was reached
    #[error("Frame scheduler closed before end of frame")]
    SchedulerClosed,

    /// The deferred task was aborted by the runtime before it finished
    #[error("Deferred test task aborted")]
    TaskAborted,

    /// Configuration could not be parsed or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading configuration from disk failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
