//! Suites bundled with the harness
//!
//! Both check the harness itself, so a fresh checkout has something to run.

use vrtk_testkit::{Color, FrameScheduler, FrameSignal, MarkupMode, Style, TestReporter, TestSuite};

/// Checks that the body runs only after the activation frame has ended
pub struct FrameOrderSuite {
    signal: FrameSignal,
    enabled_in: u64,
}

impl FrameOrderSuite {
    /// Suite for a runner activated while `enabled_in` is in progress
    pub fn new(signal: FrameSignal, enabled_in: u64) -> Self {
        Self { signal, enabled_in }
    }
}

impl TestSuite for FrameOrderSuite {
    fn test(&mut self, t: &mut TestReporter) {
        t.begin_test("FrameOrder");

        t.set_up("Activated before end of frame");
        let now = self.signal.current_frame();
        t.assert_with_success(
            "body runs after activation frame",
            now > self.enabled_in,
            &format!(
                "body ran in frame {now}, activation frame {} had not ended",
                self.enabled_in
            ),
            &format!("activated in frame {}, ran in frame {now}", self.enabled_in),
        );

        t.tear_down();
    }

    fn name(&self) -> &str {
        "FrameOrder"
    }
}

/// Checks console styling of reporter lines
pub struct MarkupSuite;

impl TestSuite for MarkupSuite {
    fn test(&mut self, t: &mut TestReporter) {
        t.begin_test("Markup");

        t.set_up("Rich text");
        let rich = Style::bold(Color::Teal).render(MarkupMode::RichText, "ok");
        t.assert(
            "bold colour tags nest",
            rich == "<color=teal><b>ok</b></color>",
            &format!("unexpected rich text '{rich}'"),
        );

        t.set_up("Plain text");
        let plain = Style::italic(Color::Purple).render(MarkupMode::Plain, "ok");
        t.assert(
            "plain mode strips styling",
            plain == "ok",
            &format!("unexpected plain text '{plain}'"),
        );

        t.set_up("Separator");
        let width = t.style().separator_width;
        t.assert("separator has width", width > 0, "separator width is zero");

        t.tear_down();
    }

    fn name(&self) -> &str {
        "Markup"
    }
}
