//! Core configuration types for harvest runs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration struct for harvest operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Append-only log of every URL previously reported as new
    pub(crate) seen_log: PathBuf,

    /// Directory receiving one batch file per extraction request
    pub(crate) output_dir: PathBuf,

    /// Human-readable activity log (`[YYYY-MM-DD HH:MM:SS] message`)
    pub(crate) activity_log: PathBuf,

    /// Prefix of batch filenames; empty means no prefix
    pub(crate) file_prefix: String,

    /// Substring a resolved href must contain to count as a detail link
    pub(crate) detail_marker: String,

    pub(crate) base_url: String,
    pub(crate) region: String,
    pub(crate) headless: bool,

    /// Time bound of one scroll-to-stable pass
    pub(crate) scroll_max_wait: Duration,

    /// Fixed delay between a scroll command and the next height sample
    pub(crate) scroll_sample_delay: Duration,

    /// Wait after navigation before scrolling
    pub(crate) settle_delay: Duration,

    /// Wait after the storefront is first opened, before the login pause
    pub(crate) initial_load_delay: Duration,

    /// Optional deadline on navigation
    ///
    /// `None` leaves navigation unbounded; a stalled page then blocks the run.
    ///
    /// Default: None
    pub(crate) navigation_timeout_secs: Option<u64>,

    /// Browser profile directory. Falls back to a per-process temp directory.
    pub(crate) chrome_data_dir: Option<PathBuf>,
}
