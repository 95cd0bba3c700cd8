//! Builder methods available for all states
//!
//! This module contains methods that can be called on the builder
//! regardless of its current type state.

use std::path::PathBuf;
use std::time::Duration;

use super::builder::HarvestConfigBuilder;

impl<State> HarvestConfigBuilder<State> {
    #[must_use]
    pub fn activity_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.activity_log = path.into();
        self
    }

    /// Prefix of batch filenames. Pass an empty string for none.
    #[must_use]
    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn detail_marker(mut self, marker: impl Into<String>) -> Self {
        self.detail_marker = marker.into();
        self
    }

    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Storefront region (`us`, `eu`, `uk`, ...). Normalized to lowercase.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set browser headless mode
    ///
    /// Defaults to `false`: the storefront usually needs a manual login in a
    /// visible window before the first extraction.
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn scroll_max_wait(mut self, max_wait: Duration) -> Self {
        self.scroll_max_wait = max_wait;
        self
    }

    #[must_use]
    pub fn scroll_sample_delay(mut self, delay: Duration) -> Self {
        self.scroll_sample_delay = delay;
        self
    }

    #[must_use]
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    #[must_use]
    pub fn initial_load_delay(mut self, delay: Duration) -> Self {
        self.initial_load_delay = delay;
        self
    }

    #[must_use]
    pub fn navigation_timeout_secs(mut self, timeout: Option<u64>) -> Self {
        self.navigation_timeout_secs = timeout;
        self
    }

    #[must_use]
    pub fn chrome_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.chrome_data_dir = dir;
        self
    }
}
