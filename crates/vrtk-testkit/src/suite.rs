//! Suite extension point

use crate::reporter::TestReporter;

/// A concrete test suite driven by a [`DeferredTestRunner`](crate::DeferredTestRunner)
///
/// `test` holds the suite's assertions. The runner calls it once per
/// activation, after the end of the frame in which it was activated.
pub trait TestSuite: Send + 'static {
    /// Run the suite's assertions
    fn test(&mut self, t: &mut TestReporter);

    /// Name used in diagnostics
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Adapter turning a closure into a [`TestSuite`]
pub struct FnSuite<F> {
    name: String,
    body: F,
}

impl<F> FnSuite<F>
where
    F: FnMut(&mut TestReporter) + Send + 'static,
{
    /// Wrap `body` under the given diagnostic name
    pub fn new(name: impl Into<String>, body: F) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }
}

impl<F> TestSuite for FnSuite<F>
where
    F: FnMut(&mut TestReporter) + Send + 'static,
{
    fn test(&mut self, t: &mut TestReporter) {
        (self.body)(t);
    }

    fn name(&self) -> &str {
        &self.name
    }
}
