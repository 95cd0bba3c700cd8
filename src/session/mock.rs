//! Scripted page session for testing.
//!
//! `MockSession` answers the pipeline's scripts from a canned height profile
//! and a fixed anchor list, and records every command it receives.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use super::js_scripts::{CONTENT_HEIGHT_SCRIPT, SCROLL_TO_BOTTOM_SCRIPT};
use super::{Anchor, PageSession};
use crate::error::{HarvestError, HarvestResult};

/// How the simulated content height evolves across samples
#[derive(Debug, Clone)]
pub enum HeightProfile {
    /// Successive samples return these heights; the last one repeats forever
    Sequence(Vec<u64>),
    /// Every sample is `step` taller than the previous one; never stabilizes
    Growing { start: u64, step: u64 },
}

impl HeightProfile {
    fn sample(&self, index: usize) -> u64 {
        match self {
            Self::Sequence(heights) => heights
                .get(index)
                .or_else(|| heights.last())
                .copied()
                .unwrap_or(0),
            Self::Growing { start, step } => start + step * index as u64,
        }
    }
}

#[derive(Debug)]
struct MockState {
    heights: HeightProfile,
    anchors: Vec<Anchor>,
    height_samples: usize,
    scrolls: usize,
    navigations: Vec<String>,
    anchor_listings: usize,
    navigate_error: Option<String>,
    script_error: Option<String>,
    anchors_error: Option<String>,
}

/// Mock page session for testing.
///
/// # Example
///
/// ```rust
/// use storefront_harvest::session::{Anchor, MockSession};
///
/// let session = MockSession::new()
///     .with_heights(vec![1000, 2000, 2000])
///     .with_anchors(vec![Anchor::new("https://example.com/detail/1").with_title("One")]);
/// assert_eq!(session.scroll_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockSession {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSession {
    /// Create a session whose page is empty and already stable.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                heights: HeightProfile::Sequence(vec![0]),
                anchors: Vec::new(),
                height_samples: 0,
                scrolls: 0,
                navigations: Vec::new(),
                anchor_listings: 0,
                navigate_error: None,
                script_error: None,
                anchors_error: None,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Heights returned by successive content-height samples (builder pattern).
    #[must_use]
    pub fn with_heights(self, heights: Vec<u64>) -> Self {
        self.state().heights = HeightProfile::Sequence(heights);
        self
    }

    /// A page whose height grows on every sample and never stabilizes.
    #[must_use]
    pub fn with_growing_height(self, start: u64, step: u64) -> Self {
        self.state().heights = HeightProfile::Growing { start, step };
        self
    }

    /// Anchors returned by `list_anchors` (builder pattern).
    #[must_use]
    pub fn with_anchors(self, anchors: Vec<Anchor>) -> Self {
        self.set_anchors(anchors);
        self
    }

    /// Replace the rendered anchors, e.g. between two runs.
    pub fn set_anchors(&self, anchors: Vec<Anchor>) {
        self.state().anchors = anchors;
    }

    /// Make every subsequent navigation fail.
    pub fn fail_navigation(&self, message: impl Into<String>) {
        self.state().navigate_error = Some(message.into());
    }

    /// Make every subsequent script evaluation fail.
    pub fn fail_scripts(&self, message: impl Into<String>) {
        self.state().script_error = Some(message.into());
    }

    /// Make every subsequent anchor enumeration fail.
    pub fn fail_anchor_listing(&self, message: impl Into<String>) {
        self.state().anchors_error = Some(message.into());
    }

    /// URLs navigated to, in order.
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.state().navigations.clone()
    }

    /// Number of scroll-to-bottom commands received.
    #[must_use]
    pub fn scroll_count(&self) -> usize {
        self.state().scrolls
    }

    /// Number of content-height samples taken.
    #[must_use]
    pub fn height_sample_count(&self) -> usize {
        self.state().height_samples
    }

    /// Number of anchor enumerations.
    #[must_use]
    pub fn anchor_listing_count(&self) -> usize {
        self.state().anchor_listings
    }
}

impl PageSession for MockSession {
    async fn navigate(&self, url: &str) -> HarvestResult<()> {
        let mut state = self.state();
        if let Some(message) = &state.navigate_error {
            return Err(HarvestError::Session(message.clone()));
        }
        state.navigations.push(url.to_string());
        Ok(())
    }

    async fn evaluate_script(&self, script: &str) -> HarvestResult<Value> {
        let mut state = self.state();
        if let Some(message) = &state.script_error {
            return Err(HarvestError::Session(message.clone()));
        }

        if script == CONTENT_HEIGHT_SCRIPT {
            let height = state.heights.sample(state.height_samples);
            state.height_samples += 1;
            Ok(Value::from(height))
        } else if script == SCROLL_TO_BOTTOM_SCRIPT {
            state.scrolls += 1;
            Ok(Value::Null)
        } else {
            Ok(Value::Null)
        }
    }

    async fn list_anchors(&self) -> HarvestResult<Vec<Anchor>> {
        let mut state = self.state();
        if let Some(message) = &state.anchors_error {
            return Err(HarvestError::Session(message.clone()));
        }
        state.anchor_listings += 1;
        Ok(state.anchors.clone())
    }
}
