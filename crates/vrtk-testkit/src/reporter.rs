//! Section labels and logged assertions
//!
//! A [`TestReporter`] is what a suite's `test` body talks to. It remembers
//! the current test group and setup labels so failures can say where they
//! happened, and turns every call into console lines on a [`LogSink`].
//!
//! Assertions are reported, not thrown: a failed [`TestReporter::assert`]
//! logs and returns, and the suite carries on.

use crate::error::AssertionFailure;
use crate::markup::{Color, MarkupMode, Style};
use crate::sink::LogSink;
use std::sync::Arc;

/// Width of the tear-down separator unless configured otherwise
pub const DEFAULT_SEPARATOR_WIDTH: usize = 78;

const GROUP_STYLE: Style = Style::bold(Color::DarkBlue);
const SETUP_STYLE: Style = Style::bold(Color::Blue);
const PASSED_STYLE: Style = Style::bold(Color::Teal);
const FAILED_STYLE: Style = Style::bold(Color::Maroon);
const SUCCESS_STYLE: Style = Style::italic(Color::Purple);

/// Presentation knobs for reporter output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReporterStyle {
    /// Rich-text tags or bare text
    pub markup: MarkupMode,
    /// Number of `=` characters in the tear-down separator
    pub separator_width: usize,
}

impl Default for ReporterStyle {
    fn default() -> Self {
        Self {
            markup: MarkupMode::RichText,
            separator_width: DEFAULT_SEPARATOR_WIDTH,
        }
    }
}

/// Labels and logging helpers used by a running suite
pub struct TestReporter {
    sink: Arc<dyn LogSink>,
    style: ReporterStyle,
    current_test: String,
    current_setup: String,
}

impl TestReporter {
    /// Reporter writing to `sink` with the default style
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self::with_style(sink, ReporterStyle::default())
    }

    /// Reporter writing to `sink` with an explicit style
    pub fn with_style(sink: Arc<dyn LogSink>, style: ReporterStyle) -> Self {
        Self {
            sink,
            style,
            current_test: String::new(),
            current_setup: String::new(),
        }
    }

    /// Label of the current test group, empty until the first `begin_test`
    pub fn current_test(&self) -> &str {
        &self.current_test
    }

    /// Label of the current setup, empty until the first `set_up`
    pub fn current_setup(&self) -> &str {
        &self.current_setup
    }

    /// Style used for output
    pub fn style(&self) -> ReporterStyle {
        self.style
    }

    /// Start a top-level test group
    pub fn begin_test(&mut self, name: &str) {
        self.begin_test_at_level(name, 1);
    }

    /// Start a test group, prefixing the heading with `level` `#` markers
    pub fn begin_test_at_level(&mut self, name: &str, level: usize) {
        self.current_test = name.to_string();
        let markers = "#".repeat(level);
        self.emit(GROUP_STYLE, &format!("{markers} Starting Tests for {name}"));
    }

    /// Announce the setup phase within the current group
    pub fn set_up(&mut self, message: &str) {
        self.current_setup = message.to_string();
        self.emit(SETUP_STYLE, &format!("#### Preparing test for {message}"));
    }

    /// Emit the separator line. Labels are left as they are.
    pub fn tear_down(&mut self) {
        let separator = "=".repeat(self.style.separator_width);
        self.sink.info(&separator);
    }

    /// Log the outcome of `condition`
    pub fn assert(&mut self, description: &str, condition: bool, failure: &str) {
        self.assert_with_success(description, condition, failure, "");
    }

    /// Log the outcome of `condition`, adding `success` as a detail line when
    /// it holds and `success` is non-empty
    pub fn assert_with_success(
        &mut self,
        description: &str,
        condition: bool,
        failure: &str,
        success: &str,
    ) {
        if condition {
            self.emit(PASSED_STYLE, &format!("## [{description}] PASSED ##"));
            if !success.is_empty() {
                self.emit(SUCCESS_STYLE, &format!(" ~~~~~> {success}"));
            }
        } else {
            self.emit(
                FAILED_STYLE,
                &format!(
                    "## [{description}] FAILED INSIDE [{}.{}]##",
                    self.current_test, self.current_setup
                ),
            );
            let failure = AssertionFailure::new(
                failure,
                self.current_test.as_str(),
                self.current_setup.as_str(),
            );
            self.sink.error(&failure);
        }
    }

    fn emit(&self, style: Style, text: &str) {
        self.sink.info(&style.render(self.style.markup, text));
    }
}

impl std::fmt::Debug for TestReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestReporter")
            .field("style", &self.style)
            .field("current_test", &self.current_test)
            .field("current_setup", &self.current_setup)
            .finish_non_exhaustive()
    }
}
