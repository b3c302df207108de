//! Simulated frame-driven host
//!
//! Stands in for the engine loop: activates registered components and ends
//! frames at a fixed interval so their deferred tasks get to run.

use crate::error::Result;
use crate::frame::{FrameClock, FrameSignal};
use crate::runner::{Activate, ScheduledTest};
use std::sync::Arc;
use std::time::Duration;

/// Minimal engine loop for driving deferred suites
pub struct HostLoop {
    clock: FrameClock,
    frame_interval: Duration,
    components: Vec<Arc<dyn Activate>>,
    pending: Vec<ScheduledTest>,
}

impl HostLoop {
    /// Host ending a frame every `frame_interval`
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            clock: FrameClock::new(),
            frame_interval,
            components: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Frame signal for components created against this host
    pub fn signal(&self) -> FrameSignal {
        self.clock.signal()
    }

    /// Index of the frame in progress
    pub fn current_frame(&self) -> u64 {
        self.clock.current_frame()
    }

    /// Add a component; it is activated by [`HostLoop::enable_all`]
    pub fn register(&mut self, component: Arc<dyn Activate>) {
        self.components.push(component);
    }

    /// Number of activations still waiting to be joined
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Activate every registered component once
    pub fn enable_all(&mut self) -> usize {
        for component in &self.components {
            tracing::debug!(component = component.name(), "enabling component");
            self.pending.push(component.on_enable());
        }
        self.components.len()
    }

    /// Run `frames` frames, ending each at the checkpoint
    pub async fn run_frames(&mut self, frames: u64) {
        let mut ticker = (!self.frame_interval.is_zero()).then(|| {
            let first_end = tokio::time::Instant::now() + self.frame_interval;
            tokio::time::interval_at(first_end, self.frame_interval)
        });

        for _ in 0..frames {
            match ticker.as_mut() {
                Some(ticker) => {
                    ticker.tick().await;
                }
                None => tokio::task::yield_now().await,
            }
            let ended = self.clock.end_frame();
            tracing::trace!(frame = ended, "host frame complete");
            // let woken tasks run before the next frame starts
            tokio::task::yield_now().await;
        }
    }

    /// Join every pending activation, returning the first error
    pub async fn finish(&mut self) -> Result<()> {
        let mut first_error = None;
        for scheduled in self.pending.drain(..) {
            let activation = scheduled.activation();
            if let Err(err) = scheduled.join().await {
                tracing::warn!(activation, error = %err, "deferred test did not run");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Stop producing frames. Activations still waiting will fail.
    pub fn shutdown(self) -> Vec<ScheduledTest> {
        self.pending
    }
}

impl std::fmt::Debug for HostLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostLoop")
            .field("frame", &self.clock.current_frame())
            .field("frame_interval", &self.frame_interval)
            .field("components", &self.components.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}
