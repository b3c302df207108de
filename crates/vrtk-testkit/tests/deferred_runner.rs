//! End-to-end behaviour of frame-deferred suites.
#![allow(missing_docs)]

use std::sync::Arc;
use std::time::Duration;
use vrtk_testkit::{
    DeferredTestRunner, FrameClock, HarnessConfig, HostLoop, LogLevel, MarkupMode,
    RecordingLogSink, RunPhase, TeeLogSink, TestReporter, TestSuite, TracingLogSink,
};

/// Mirrors how interaction suites are written: groups, setups, assertions.
struct InteractUseSuite {
    frame_seen: Option<u64>,
    clock_probe: Arc<FrameClock>,
}

impl TestSuite for InteractUseSuite {
    fn test(&mut self, t: &mut TestReporter) {
        self.frame_seen = Some(self.clock_probe.current_frame());

        t.begin_test("InteractUse");
        t.set_up("Controller holding object");
        t.assert_with_success(
            "use is triggered",
            true,
            "use never fired",
            "fired on trigger press",
        );
        t.set_up("Controller released object");
        t.assert("use stops", false, "object still in use after release");
        t.tear_down();
    }
}

#[tokio::test]
async fn test_suite_output_sequence() {
    let clock = Arc::new(FrameClock::new());
    let sink = RecordingLogSink::new();
    let suite = InteractUseSuite {
        frame_seen: None,
        clock_probe: Arc::clone(&clock),
    };
    let runner = DeferredTestRunner::new(
        suite,
        TeeLogSink::new(sink.clone(), TracingLogSink::new()),
        clock.signal(),
    );

    let scheduled = runner.on_enable();
    clock.end_frame();
    assert_eq!(scheduled.join().await.unwrap(), 0);

    // body ran after frame 0 ended, while frame 1 was in progress
    assert_eq!(runner.with_suite(|s| s.frame_seen), Some(1));

    let entries = sink.entries();
    let levels: Vec<LogLevel> = entries.iter().map(|e| e.level).collect();
    assert_eq!(
        levels,
        vec![
            LogLevel::Info,
            LogLevel::Info,
            LogLevel::Info,
            LogLevel::Info,
            LogLevel::Info,
            LogLevel::Info,
            LogLevel::Error,
            LogLevel::Info,
        ]
    );
    assert_eq!(
        sink.info_lines(),
        vec![
            "<color=darkblue><b># Starting Tests for InteractUse</b></color>".to_string(),
            "<color=blue><b>#### Preparing test for Controller holding object</b></color>"
                .to_string(),
            "<color=teal><b>## [use is triggered] PASSED ##</b></color>".to_string(),
            "<color=purple><i> ~~~~~> fired on trigger press</i></color>".to_string(),
            "<color=blue><b>#### Preparing test for Controller released object</b></color>"
                .to_string(),
            "<color=maroon><b>## [use stops] FAILED INSIDE [InteractUse.Controller released object]##</b></color>"
                .to_string(),
            "=".repeat(78),
        ]
    );
    assert_eq!(
        sink.error_lines(),
        vec!["object still in use after release"]
    );
}

#[tokio::test]
async fn test_config_style_flows_to_output() {
    let config = HarnessConfig::from_toml_str(
        r#"
        markup = "plain"
        separator_width = 12
        "#,
    )
    .unwrap();

    let clock = FrameClock::new();
    let sink = RecordingLogSink::new();
    let suite = vrtk_testkit::FnSuite::new("plain", |t: &mut TestReporter| {
        t.begin_test_at_level("Snap", 2);
        t.tear_down();
    });
    let runner =
        DeferredTestRunner::with_style(suite, sink.clone(), clock.signal(), config.reporter_style());

    let scheduled = runner.on_enable();
    clock.end_frame();
    scheduled.join().await.unwrap();

    assert_eq!(config.markup, MarkupMode::Plain);
    assert_eq!(
        sink.info_lines(),
        vec!["## Starting Tests for Snap".to_string(), "=".repeat(12)]
    );
}

#[tokio::test]
async fn test_host_loop_drives_multiple_runners() {
    let mut host = HostLoop::new(Duration::ZERO);
    let sink = RecordingLogSink::new();

    for name in ["Touch", "Grab", "Use"] {
        let suite = vrtk_testkit::FnSuite::new(name, move |t: &mut TestReporter| {
            t.begin_test(name);
            t.assert("ran", true, "unused");
        });
        host.register(Arc::new(DeferredTestRunner::new(
            suite,
            sink.clone(),
            host.signal(),
        )));
    }

    host.enable_all();
    assert!(sink.is_empty(), "nothing runs before the frame ends");

    host.run_frames(2).await;
    host.finish().await.unwrap();

    let headings: Vec<String> = sink
        .info_lines()
        .into_iter()
        .filter(|line| line.contains("Starting Tests"))
        .collect();
    assert_eq!(headings.len(), 3);
    assert!(sink.error_lines().is_empty());
}

#[tokio::test]
async fn test_phase_progression() {
    let clock = FrameClock::new();
    let suite = vrtk_testkit::FnSuite::new("phases", |t: &mut TestReporter| t.tear_down());
    let runner = DeferredTestRunner::new(suite, RecordingLogSink::new(), clock.signal());

    assert_eq!(runner.phase(), RunPhase::Idle);
    let mut scheduled = runner.on_enable();
    assert_eq!(runner.phase(), RunPhase::Scheduled);

    clock.end_frame();
    assert_eq!(scheduled.wait_for_phase(RunPhase::Done).await, RunPhase::Done);
    assert_eq!(runner.phase(), RunPhase::Done);
    assert!(scheduled.join().await.is_ok());
}
