//! Type-safe builder for `HarvestConfig` using the typestate pattern
//!
//! Both storage locations (seen-log and output directory) must be supplied
//! before `build()` becomes available.

use std::marker::PhantomData;
use std::path::PathBuf;
use std::time::Duration;

use super::types::HarvestConfig;
use crate::error::{HarvestError, HarvestResult};
use crate::utils::{
    DEFAULT_ACTIVITY_LOG, DEFAULT_BASE_URL, DEFAULT_DETAIL_MARKER, DEFAULT_FILE_PREFIX,
    DEFAULT_INITIAL_LOAD_DELAY, DEFAULT_REGION, DEFAULT_SCROLL_MAX_WAIT,
    DEFAULT_SCROLL_SAMPLE_DELAY, DEFAULT_SETTLE_DELAY,
};

// Type states for the builder
pub struct WithSeenLog;
pub struct Complete;

pub struct HarvestConfigBuilder<State = ()> {
    pub(crate) seen_log: Option<PathBuf>,
    pub(crate) output_dir: Option<PathBuf>,
    pub(crate) activity_log: PathBuf,
    pub(crate) file_prefix: String,
    pub(crate) detail_marker: String,
    pub(crate) base_url: String,
    pub(crate) region: String,
    pub(crate) headless: bool,
    pub(crate) scroll_max_wait: Duration,
    pub(crate) scroll_sample_delay: Duration,
    pub(crate) settle_delay: Duration,
    pub(crate) initial_load_delay: Duration,
    pub(crate) navigation_timeout_secs: Option<u64>,
    pub(crate) chrome_data_dir: Option<PathBuf>,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for HarvestConfigBuilder<()> {
    fn default() -> Self {
        Self {
            seen_log: None,
            output_dir: None,
            activity_log: PathBuf::from(DEFAULT_ACTIVITY_LOG),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            detail_marker: DEFAULT_DETAIL_MARKER.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            region: DEFAULT_REGION.to_string(),
            // Manual login needs a visible window
            headless: false,
            scroll_max_wait: DEFAULT_SCROLL_MAX_WAIT,
            scroll_sample_delay: DEFAULT_SCROLL_SAMPLE_DELAY,
            settle_delay: DEFAULT_SETTLE_DELAY,
            initial_load_delay: DEFAULT_INITIAL_LOAD_DELAY,
            navigation_timeout_secs: None,
            chrome_data_dir: None,
            _phantom: PhantomData,
        }
    }
}

impl HarvestConfig {
    /// Create a builder for configuring a `HarvestConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> HarvestConfigBuilder<()> {
        HarvestConfigBuilder::default()
    }
}

impl<State> HarvestConfigBuilder<State> {
    fn into_state<Next>(self) -> HarvestConfigBuilder<Next> {
        HarvestConfigBuilder {
            seen_log: self.seen_log,
            output_dir: self.output_dir,
            activity_log: self.activity_log,
            file_prefix: self.file_prefix,
            detail_marker: self.detail_marker,
            base_url: self.base_url,
            region: self.region,
            headless: self.headless,
            scroll_max_wait: self.scroll_max_wait,
            scroll_sample_delay: self.scroll_sample_delay,
            settle_delay: self.settle_delay,
            initial_load_delay: self.initial_load_delay,
            navigation_timeout_secs: self.navigation_timeout_secs,
            chrome_data_dir: self.chrome_data_dir,
            _phantom: PhantomData,
        }
    }
}

impl HarvestConfigBuilder<()> {
    pub fn seen_log(mut self, path: impl Into<PathBuf>) -> HarvestConfigBuilder<WithSeenLog> {
        self.seen_log = Some(path.into());
        self.into_state()
    }
}

impl HarvestConfigBuilder<WithSeenLog> {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> HarvestConfigBuilder<Complete> {
        self.output_dir = Some(dir.into());
        self.into_state()
    }
}

// Build method only available when all required fields are set
impl HarvestConfigBuilder<Complete> {
    pub fn build(self) -> HarvestResult<HarvestConfig> {
        let seen_log = self
            .seen_log
            .ok_or_else(|| HarvestError::Config("seen_log is required".to_string()))?;
        let output_dir = self
            .output_dir
            .ok_or_else(|| HarvestError::Config("output_dir is required".to_string()))?;

        if self.scroll_sample_delay.is_zero() {
            return Err(HarvestError::Config(
                "scroll_sample_delay must be greater than zero".to_string(),
            ));
        }

        if self.detail_marker.is_empty() {
            return Err(HarvestError::Config(
                "detail_marker must not be empty".to_string(),
            ));
        }

        let region = self.region.trim().to_lowercase();
        if region.is_empty()
            || !region
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(HarvestError::Config(format!(
                "Invalid region '{}': expected letters, digits or '-'",
                self.region
            )));
        }

        let base_url = self.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url)
            .map_err(|e| HarvestError::Config(format!("Invalid base_url '{base_url}': {e}")))?;

        Ok(HarvestConfig {
            seen_log,
            output_dir,
            activity_log: self.activity_log,
            file_prefix: self.file_prefix,
            detail_marker: self.detail_marker,
            base_url,
            region,
            headless: self.headless,
            scroll_max_wait: self.scroll_max_wait,
            scroll_sample_delay: self.scroll_sample_delay,
            settle_delay: self.settle_delay,
            initial_load_delay: self.initial_load_delay,
            navigation_timeout_secs: self.navigation_timeout_secs,
            chrome_data_dir: self.chrome_data_dir,
        })
    }
}
