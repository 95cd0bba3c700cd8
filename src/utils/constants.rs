//! Shared configuration constants for storefront harvesting
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

use std::time::Duration;

/// Default storefront host
pub const DEFAULT_BASE_URL: &str = "https://www.primevideo.com";

/// Default storefront region
pub const DEFAULT_REGION: &str = "us";

/// Path fragment that identifies a single content item's page
pub const DEFAULT_DETAIL_MARKER: &str = "/detail/";

/// Title used when an anchor carries no title, alt text, or visible text
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Default filename prefix for batch files
pub const DEFAULT_FILE_PREFIX: &str = "prime";

/// Default seen-log location
pub const DEFAULT_SEEN_LOG: &str = "seen_links_prime.txt";

/// Default activity log location
pub const DEFAULT_ACTIVITY_LOG: &str = "log.txt";

/// Default batch output directory
pub const DEFAULT_OUTPUT_DIR: &str = "output_prime";

/// Upper bound on a single scroll-to-stable pass: 60 seconds
///
/// Pages whose height never settles (autoplay rows, rotating banners)
/// always terminate through this bound.
pub const DEFAULT_SCROLL_MAX_WAIT: Duration = Duration::from_secs(60);

/// Fixed delay between a scroll command and the next height sample
pub const DEFAULT_SCROLL_SAMPLE_DELAY: Duration = Duration::from_secs(2);

/// Delay after navigation before scrolling starts
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Delay after the storefront is first opened, before the login pause
pub const DEFAULT_INITIAL_LOAD_DELAY: Duration = Duration::from_secs(5);

/// Keywords used when a search is requested with a blank keyword
pub const RANDOM_KEYWORDS: [&str; 8] = [
    "war", "love", "moon", "dark", "fire", "life", "death", "dream",
];
