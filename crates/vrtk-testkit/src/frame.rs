//! Host frame scheduling
//!
//! The host engine advances in frames. Each frame ends at a checkpoint after
//! rendering; deferred work awaits that checkpoint. [`FrameClock`] is the
//! host side (it ends frames), [`FrameSignal`] is the waiting side handed to
//! runners.

use crate::error::{HarnessError, Result};
use async_trait::async_trait;
use tokio::sync::watch;

/// Source of end-of-frame checkpoints
#[async_trait]
pub trait FrameScheduler: Send + Sync {
    /// Index of the frame currently in progress
    fn current_frame(&self) -> u64;

    /// Suspend until frame `frame` has ended.
    ///
    /// Resolves with the index of the latest ended frame, which is at least
    /// `frame`. Fails with [`HarnessError::SchedulerClosed`] if the host
    /// stops producing frames first.
    async fn wait_for_end_of(&self, frame: u64) -> Result<u64>;

    /// Suspend until the frame currently in progress has ended
    async fn end_of_frame(&self) -> Result<u64> {
        let frame = self.current_frame();
        self.wait_for_end_of(frame).await
    }
}

/// Host-side frame counter
///
/// The host calls [`FrameClock::end_frame`] once per frame, after rendering.
/// Dropping the clock closes every [`FrameSignal`] derived from it.
#[derive(Debug)]
pub struct FrameClock {
    // index of the frame in progress
    tx: watch::Sender<u64>,
}

impl FrameClock {
    /// Start at frame 0
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    /// Index of the frame currently in progress
    pub fn current_frame(&self) -> u64 {
        *self.tx.borrow()
    }

    /// End the frame in progress and wake its waiters.
    ///
    /// Returns the index of the frame that just ended.
    pub fn end_frame(&self) -> u64 {
        let mut ended = 0;
        self.tx.send_modify(|frame| {
            ended = *frame;
            *frame += 1;
        });
        tracing::trace!(frame = ended, "end of frame");
        ended
    }

    /// Waiting handle for runners
    pub fn signal(&self) -> FrameSignal {
        FrameSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Waiting side of a [`FrameClock`]
#[derive(Debug, Clone)]
pub struct FrameSignal {
    rx: watch::Receiver<u64>,
}

#[async_trait]
impl FrameScheduler for FrameSignal {
    fn current_frame(&self) -> u64 {
        *self.rx.borrow()
    }

    async fn wait_for_end_of(&self, frame: u64) -> Result<u64> {
        let mut rx = self.rx.clone();
        let in_progress = rx
            .wait_for(|current| *current > frame)
            .await
            .map_err(|_| HarnessError::SchedulerClosed)?;
        Ok(*in_progress - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_end_frame_advances_counter() {
        let clock = FrameClock::new();
        assert_eq!(clock.current_frame(), 0);
        assert_eq!(clock.end_frame(), 0);
        assert_eq!(clock.end_frame(), 1);
        assert_eq!(clock.current_frame(), 2);
        assert_eq!(clock.signal().current_frame(), 2);
    }

    #[tokio::test]
    async fn test_wait_resolves_only_after_checkpoint() {
        let clock = FrameClock::new();
        let signal = clock.signal();

        let waiter = tokio::spawn(async move { signal.end_of_frame().await });
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        clock.end_frame();
        let ended = waiter.await.unwrap().unwrap();
        assert_eq!(ended, 0);
    }

    #[tokio::test]
    async fn test_wait_for_past_frame_is_immediate() {
        let clock = FrameClock::new();
        clock.end_frame();
        clock.end_frame();

        let ended = clock.signal().wait_for_end_of(0).await.unwrap();
        assert_eq!(ended, 1);
    }

    #[tokio::test]
    async fn test_dropping_clock_closes_signal() {
        let clock = FrameClock::new();
        let signal = clock.signal();
        drop(clock);

        assert_matches!(
            signal.end_of_frame().await,
            Err(HarnessError::SchedulerClosed)
        );
    }
}
