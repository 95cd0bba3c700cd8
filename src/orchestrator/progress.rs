//! Progress reporting abstraction for extraction requests
//!
//! Defines the `ProgressReporter` trait for lifecycle event reporting
//! and provides a no-op implementation for simple use cases.

use crate::batch_writer::BatchReceipt;

/// Trait for reporting extraction progress at key lifecycle events
///
/// Implementations can print console status lines, update UI, etc. The
/// orchestrator calls these in pipeline order; none of them can fail.
pub trait ProgressReporter: Send + Sync {
    /// Navigation to the request URL has started
    fn report_navigation_started(&self, url: &str);

    /// Waiting for the page to settle before scrolling
    fn report_settling(&self);

    /// Scrolling to load more content
    fn report_scrolling(&self);

    /// Scrolling finished (stable height or time bound, indistinguishably)
    fn report_scroll_finished(&self);

    /// Detail links harvested from the rendered page
    fn report_extracted(&self, count: usize);

    /// A batch of new links was written and recorded as seen
    fn report_batch_saved(&self, receipt: &BatchReceipt, duplicates: usize);

    /// Every extracted link had been seen before
    fn report_nothing_new(&self, label: &str);

    /// The request failed
    fn report_error(&self, error: &str);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_navigation_started(&self, _url: &str) {}

    #[inline(always)]
    fn report_settling(&self) {}

    #[inline(always)]
    fn report_scrolling(&self) {}

    #[inline(always)]
    fn report_scroll_finished(&self) {}

    #[inline(always)]
    fn report_extracted(&self, _count: usize) {}

    #[inline(always)]
    fn report_batch_saved(&self, _receipt: &BatchReceipt, _duplicates: usize) {}

    #[inline(always)]
    fn report_nothing_new(&self, _label: &str) {}

    #[inline(always)]
    fn report_error(&self, _error: &str) {}
}
