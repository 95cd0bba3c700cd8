//! Page session abstraction
//!
//! The harvest pipeline only needs three things from a browser: go to a URL,
//! evaluate a script against the rendered page, and enumerate anchors. The
//! `PageSession` trait captures exactly that, so the pipeline runs unchanged
//! against a real Chromium page or the scripted `MockSession`.

pub mod browser_setup;
pub mod chromium;
pub mod js_scripts;
pub mod mock;
pub mod page_timeout;

pub use browser_setup::{download_chromium, launch_browser};
pub use chromium::ChromiumSession;
pub use mock::MockSession;
pub use page_timeout::with_page_timeout;

use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::error::HarvestResult;

/// An anchor-like element as rendered, with the attributes extraction reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    /// Resolved (absolute) URL, if the element has one
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    /// Visible text, untrimmed
    #[serde(default)]
    pub text: Option<String>,
}

impl Anchor {
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Capability consumed by the harvest pipeline.
///
/// Commands are not retried and carry no deadline of their own; a failure is
/// returned as `HarvestError::Session` and ends the current request.
pub trait PageSession: Send + Sync {
    /// Navigate the session to `url` and wait for the navigation to commit.
    fn navigate(&self, url: &str) -> impl Future<Output = HarvestResult<()>> + Send;

    /// Evaluate `script` against the rendered page and return its JSON result.
    ///
    /// Scripts that return nothing yield `Value::Null`.
    fn evaluate_script(
        &self,
        script: &str,
    ) -> impl Future<Output = HarvestResult<serde_json::Value>> + Send;

    /// Enumerate every anchor-like element currently rendered.
    fn list_anchors(&self) -> impl Future<Output = HarvestResult<Vec<Anchor>>> + Send;
}
