//! # VRTK Testkit
//!
//! Frame-deferred test runner for interaction suites running inside a
//! frame-driven host.
//!
//! A suite implements [`TestSuite`]. Wrapping it in a [`DeferredTestRunner`]
//! and activating the runner schedules one run of the suite body after the
//! end of the current frame. The body talks to a [`TestReporter`] to label
//! sections and log assertions; failed assertions are logged, never thrown.
//!
//! ```rust,no_run
//! use vrtk_testkit::{DeferredTestRunner, HostLoop, TestReporter, TestSuite, TracingLogSink};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! struct GrabSuite;
//!
//! impl TestSuite for GrabSuite {
//!     fn test(&mut self, t: &mut TestReporter) {
//!         t.begin_test("Grab");
//!         t.set_up("Controller in range");
//!         t.assert("object is grabbable", true, "object refused the grab");
//!         t.tear_down();
//!     }
//! }
//!
//! # async fn run() -> vrtk_testkit::Result<()> {
//! let mut host = HostLoop::new(Duration::from_millis(16));
//! let runner = DeferredTestRunner::new(GrabSuite, TracingLogSink::new(), host.signal());
//! host.register(Arc::new(runner));
//! host.enable_all();
//! host.run_frames(1).await;
//! host.finish().await
//! # }
//! ```

pub mod config;
pub mod error;
pub mod frame;
pub mod host;
pub mod markup;
pub mod reporter;
pub mod runner;
pub mod sink;
pub mod suite;

pub use config::HarnessConfig;
pub use error::{AssertionFailure, HarnessError, Result};
pub use frame::{FrameClock, FrameScheduler, FrameSignal};
pub use host::HostLoop;
pub use markup::{Color, MarkupMode, Style};
pub use reporter::{ReporterStyle, TestReporter, DEFAULT_SEPARATOR_WIDTH};
pub use runner::{Activate, DeferredTestRunner, RunPhase, ScheduledTest};
pub use sink::{LogEntry, LogLevel, LogSink, RecordingLogSink, TeeLogSink, TracingLogSink};
pub use suite::{FnSuite, TestSuite};
