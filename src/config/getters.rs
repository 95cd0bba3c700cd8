//! Getter methods for `HarvestConfig`

use std::path::PathBuf;
use std::time::Duration;

use super::types::HarvestConfig;
use crate::scroll_pager::ScrollPolicy;

impl HarvestConfig {
    #[must_use]
    pub fn seen_log(&self) -> &PathBuf {
        &self.seen_log
    }

    #[must_use]
    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    #[must_use]
    pub fn activity_log(&self) -> &PathBuf {
        &self.activity_log
    }

    #[must_use]
    pub fn file_prefix(&self) -> &str {
        &self.file_prefix
    }

    #[must_use]
    pub fn detail_marker(&self) -> &str {
        &self.detail_marker
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn scroll_max_wait(&self) -> Duration {
        self.scroll_max_wait
    }

    #[must_use]
    pub fn scroll_sample_delay(&self) -> Duration {
        self.scroll_sample_delay
    }

    /// Scroll policy assembled from the two scroll settings
    #[must_use]
    pub fn scroll_policy(&self) -> ScrollPolicy {
        ScrollPolicy::new(self.scroll_max_wait, self.scroll_sample_delay)
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    #[must_use]
    pub fn initial_load_delay(&self) -> Duration {
        self.initial_load_delay
    }

    #[must_use]
    pub fn navigation_timeout_secs(&self) -> Option<u64> {
        self.navigation_timeout_secs
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&PathBuf> {
        self.chrome_data_dir.as_ref()
    }
}
