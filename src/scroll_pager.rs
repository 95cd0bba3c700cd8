//! Drive an incrementally loading page to a stable height
//!
//! The pager scrolls to the bottom, waits one fixed sample delay, and samples
//! the content height. It stops when two consecutive samples match or when
//! the elapsed time exceeds the policy's `max_wait`. Both exits look the same
//! to the caller. The delay is fixed; content requested by a
//! scroll is assumed to render within one interval.
//!
//! Time is read from `tokio::time`, so a paused test runtime simulates the
//! whole pass without real waiting.

use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::error::HarvestResult;
use crate::session::PageSession;
use crate::session::js_scripts::{CONTENT_HEIGHT_SCRIPT, SCROLL_TO_BOTTOM_SCRIPT};
use crate::utils::{DEFAULT_SCROLL_MAX_WAIT, DEFAULT_SCROLL_SAMPLE_DELAY};

/// Stability-or-timeout polling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPolicy {
    pub max_wait: Duration,
    pub sample_delay: Duration,
}

impl ScrollPolicy {
    #[must_use]
    pub fn new(max_wait: Duration, sample_delay: Duration) -> Self {
        Self {
            max_wait,
            sample_delay,
        }
    }
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_MAX_WAIT, DEFAULT_SCROLL_SAMPLE_DELAY)
    }
}

/// Ephemeral state of one pass; never outlives the call that created it.
struct ScrollState {
    last_height: u64,
    start_time: Instant,
    max_wait: Duration,
}

impl ScrollState {
    fn expired(&self) -> bool {
        self.start_time.elapsed() > self.max_wait
    }
}

/// Sample the current content height of the page.
pub async fn content_height<S: PageSession>(session: &S) -> HarvestResult<u64> {
    let value = session.evaluate_script(CONTENT_HEIGHT_SCRIPT).await?;
    // scrollHeight is integral, but some engines report it as a float
    let height = match value.as_u64() {
        Some(height) => height,
        None => serde_json::from_value::<f64>(value)?.max(0.0).round() as u64,
    };
    Ok(height)
}

/// Scroll `session` until its content height stops changing or `policy.max_wait` elapses.
///
/// Returns within `max_wait` plus one sample delay (plus command latency),
/// whether or not the height ever settles. Session failures propagate.
pub async fn scroll_to_stable<S: PageSession>(
    session: &S,
    policy: ScrollPolicy,
) -> HarvestResult<()> {
    let mut state = ScrollState {
        last_height: content_height(session).await?,
        start_time: Instant::now(),
        max_wait: policy.max_wait,
    };
    let mut samples = 0usize;

    loop {
        session.evaluate_script(SCROLL_TO_BOTTOM_SCRIPT).await?;
        tokio::time::sleep(policy.sample_delay).await;
        let new_height = content_height(session).await?;
        samples += 1;

        if new_height == state.last_height || state.expired() {
            debug!(
                samples,
                height = new_height,
                elapsed_ms = state.start_time.elapsed().as_millis() as u64,
                "Scroll pass finished"
            );
            return Ok(());
        }
        state.last_height = new_height;
    }
}
