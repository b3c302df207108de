//! VRTK harness host
//!
//! Drives the bundled suites on a simulated frame loop. The binary wraps
//! [`run_suites`] with config loading and logging setup.

pub mod suites;

use std::sync::Arc;
use vrtk_testkit::{DeferredTestRunner, HarnessConfig, HostLoop, LogSink, Result};

use crate::suites::{FrameOrderSuite, MarkupSuite};

/// Enable every bundled suite, drive `config.frames` frames and join.
///
/// Returns the number of activations that ran. Assertion failures are
/// written to `sink` and do not make this fail.
pub async fn run_suites<L>(config: &HarnessConfig, sink: L) -> Result<usize>
where
    L: LogSink + Clone + 'static,
{
    let mut host = HostLoop::new(config.frame_interval());
    let style = config.reporter_style();

    let frame_order = FrameOrderSuite::new(host.signal(), host.current_frame());
    host.register(Arc::new(DeferredTestRunner::with_style(
        frame_order,
        sink.clone(),
        host.signal(),
        style,
    )));
    host.register(Arc::new(DeferredTestRunner::with_style(
        MarkupSuite,
        sink,
        host.signal(),
        style,
    )));

    let enabled = host.enable_all();
    tracing::info!(suites = enabled, frames = config.frames, "running suites");

    host.run_frames(config.frames).await;
    host.finish().await?;
    Ok(enabled)
}
