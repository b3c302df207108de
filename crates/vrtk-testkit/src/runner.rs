//! Frame-deferred suite execution
//!
//! Activating a [`DeferredTestRunner`] schedules a one-shot task. The task
//! waits for the end of the frame the activation happened in, runs the
//! suite's `test` body once, and finishes:
//!
//! ```text
//! Idle ──on_enable──▶ Scheduled ──end of frame──▶ Running ──▶ Done
//! ```
//!
//! There is no cancellation, retry or re-arming. Each activation schedules
//! its own task; activating twice in one frame runs the body twice after
//! that frame ends.

use crate::error::{HarnessError, Result};
use crate::frame::FrameScheduler;
use crate::reporter::{ReporterStyle, TestReporter};
use crate::sink::LogSink;
use crate::suite::TestSuite;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Lifecycle of one activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunPhase {
    /// Not activated yet
    Idle,
    /// Waiting for the end-of-frame checkpoint
    Scheduled,
    /// Suite body executing
    Running,
    /// Suite body returned
    Done,
}

/// Host lifecycle hook: called when a component becomes active
pub trait Activate: Send + Sync {
    /// Diagnostic name of the component
    fn name(&self) -> &str;

    /// Component became active
    fn on_enable(&self) -> ScheduledTest;
}

/// Runs a [`TestSuite`] once per activation, deferred to the end of frame
pub struct DeferredTestRunner<S> {
    name: String,
    suite: Arc<Mutex<S>>,
    reporter: Arc<Mutex<TestReporter>>,
    scheduler: Arc<dyn FrameScheduler>,
    activations: AtomicU64,
    latest: Mutex<Option<watch::Receiver<RunPhase>>>,
}

impl<S: TestSuite> DeferredTestRunner<S> {
    /// Runner with the default reporter style
    pub fn new(
        suite: S,
        sink: impl LogSink + 'static,
        scheduler: impl FrameScheduler + 'static,
    ) -> Self {
        Self::with_style(suite, sink, scheduler, ReporterStyle::default())
    }

    /// Runner with an explicit reporter style
    pub fn with_style(
        suite: S,
        sink: impl LogSink + 'static,
        scheduler: impl FrameScheduler + 'static,
        style: ReporterStyle,
    ) -> Self {
        Self {
            name: suite.name().to_string(),
            suite: Arc::new(Mutex::new(suite)),
            reporter: Arc::new(Mutex::new(TestReporter::with_style(Arc::new(sink), style))),
            scheduler: Arc::new(scheduler),
            activations: AtomicU64::new(0),
            latest: Mutex::new(None),
        }
    }

    /// Number of times the runner has been activated
    pub fn activations(&self) -> u64 {
        self.activations.load(Ordering::SeqCst)
    }

    /// Phase of the most recent activation, `Idle` before the first
    pub fn phase(&self) -> RunPhase {
        self.latest
            .lock()
            .as_ref()
            .map_or(RunPhase::Idle, |rx| *rx.borrow())
    }

    /// Inspect the reporter's labels and style
    pub fn with_reporter<R>(&self, f: impl FnOnce(&TestReporter) -> R) -> R {
        f(&self.reporter.lock())
    }

    /// Inspect the suite between activations
    pub fn with_suite<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.suite.lock())
    }

    /// Schedule the suite to run after the current frame ends.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn on_enable(&self) -> ScheduledTest {
        let activation = self.activations.fetch_add(1, Ordering::SeqCst) + 1;
        let frame = self.scheduler.current_frame();
        let (phase_tx, phase_rx) = watch::channel(RunPhase::Scheduled);
        *self.latest.lock() = Some(phase_rx.clone());

        tracing::debug!(suite = %self.name, activation, frame, "deferred test scheduled");

        let name = self.name.clone();
        let suite = Arc::clone(&self.suite);
        let reporter = Arc::clone(&self.reporter);
        let scheduler = Arc::clone(&self.scheduler);

        let handle = tokio::spawn(async move {
            let ended = scheduler.wait_for_end_of(frame).await?;

            phase_tx.send_replace(RunPhase::Running);
            tracing::debug!(suite = %name, activation, frame = ended, "deferred test running");
            {
                let mut suite = suite.lock();
                let mut reporter = reporter.lock();
                suite.test(&mut reporter);
            }
            phase_tx.send_replace(RunPhase::Done);
            tracing::debug!(suite = %name, activation, "deferred test done");

            Ok::<_, HarnessError>(ended)
        });

        ScheduledTest {
            activation,
            scheduled_in: frame,
            phase: phase_rx,
            handle,
        }
    }
}

impl<S: TestSuite> Activate for DeferredTestRunner<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_enable(&self) -> ScheduledTest {
        DeferredTestRunner::on_enable(self)
    }
}

impl<S> std::fmt::Debug for DeferredTestRunner<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredTestRunner")
            .field("name", &self.name)
            .field("activations", &self.activations.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Handle to one scheduled activation
#[derive(Debug)]
pub struct ScheduledTest {
    activation: u64,
    scheduled_in: u64,
    phase: watch::Receiver<RunPhase>,
    handle: JoinHandle<Result<u64>>,
}

impl ScheduledTest {
    /// 1-based activation number on the runner
    pub fn activation(&self) -> u64 {
        self.activation
    }

    /// Frame in progress when the runner was activated
    pub fn scheduled_in_frame(&self) -> u64 {
        self.scheduled_in
    }

    /// Current phase of this activation
    pub fn phase(&self) -> RunPhase {
        *self.phase.borrow()
    }

    /// True once the deferred task has stopped
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait until this activation reaches `target` or its task stops.
    ///
    /// Returns the phase observed last, which is below `target` only if
    /// the task ended early.
    pub async fn wait_for_phase(&mut self, target: RunPhase) -> RunPhase {
        let reached = self
            .phase
            .wait_for(|phase| *phase >= target)
            .await
            .map(|phase| *phase);
        reached.unwrap_or_else(|_| *self.phase.borrow())
    }

    /// Wait for the task and return the frame after which the body ran.
    ///
    /// A panic inside the suite body is resumed on the caller.
    pub async fn join(self) -> Result<u64> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => Err(HarnessError::TaskAborted),
        }
    }
}
