//! Tests for the type-safe configuration builder pattern

use std::path::PathBuf;
use std::time::Duration;
use storefront_harvest::{HarvestConfig, HarvestError};
use tempfile::TempDir;

mod common;

#[test]
fn test_builder_requires_seen_log_and_output_dir() {
    // This should not compile if uncommented - both storage roots are required
    // let config = HarvestConfig::builder().build();
    // let config = HarvestConfig::builder().seen_log("seen.txt").build();

    let temp_dir = TempDir::new().unwrap();
    let config = HarvestConfig::builder()
        .seen_log(temp_dir.path().join("seen.txt"))
        .output_dir(temp_dir.path().join("out"))
        .build()
        .unwrap();

    assert_eq!(config.seen_log(), &temp_dir.path().join("seen.txt"));
    assert_eq!(config.output_dir(), &temp_dir.path().join("out"));
}

#[test]
fn test_builder_optional_fields_have_defaults() {
    let config = common::test_config(&PathBuf::from("/tmp/harvest"));

    assert_eq!(config.file_prefix(), "prime");
    assert_eq!(config.detail_marker(), "/detail/");
    assert_eq!(config.region(), "us");
    assert_eq!(config.base_url(), "https://www.primevideo.com");
    assert!(!config.headless());
    assert_eq!(config.scroll_max_wait(), Duration::from_secs(60));
    assert_eq!(config.scroll_sample_delay(), Duration::from_secs(2));
    assert_eq!(config.settle_delay(), Duration::from_secs(3));
    assert_eq!(config.initial_load_delay(), Duration::from_secs(5));
    assert_eq!(config.navigation_timeout_secs(), None);
    assert_eq!(config.chrome_data_dir(), None);
}

#[test]
fn test_builder_setters_in_any_state() {
    // Optional setters work before and after the required ones
    let config = HarvestConfig::builder()
        .region("UK")
        .seen_log("seen.txt")
        .file_prefix("")
        .output_dir("out")
        .headless(true)
        .scroll_max_wait(Duration::from_secs(5))
        .navigation_timeout_secs(Some(30))
        .base_url("https://example.com/")
        .build()
        .unwrap();

    assert_eq!(config.region(), "uk");
    assert_eq!(config.file_prefix(), "");
    assert!(config.headless());
    assert_eq!(config.scroll_policy().max_wait, Duration::from_secs(5));
    assert_eq!(config.navigation_timeout_secs(), Some(30));
    assert_eq!(config.base_url(), "https://example.com");
}

#[test]
fn test_builder_rejects_invalid_values() {
    let zero_delay = HarvestConfig::builder()
        .seen_log("seen.txt")
        .output_dir("out")
        .scroll_sample_delay(Duration::ZERO)
        .build();
    assert!(matches!(zero_delay, Err(HarvestError::Config(_))));

    let empty_marker = HarvestConfig::builder()
        .seen_log("seen.txt")
        .output_dir("out")
        .detail_marker("")
        .build();
    assert!(matches!(empty_marker, Err(HarvestError::Config(_))));

    for region in ["", "u s", "us/../x"] {
        let result = HarvestConfig::builder()
            .seen_log("seen.txt")
            .output_dir("out")
            .region(region)
            .build();
        assert!(matches!(result, Err(HarvestError::Config(_))), "region {region:?}");
    }

    let bad_url = HarvestConfig::builder()
        .seen_log("seen.txt")
        .output_dir("out")
        .base_url("not a url")
        .build();
    assert!(matches!(bad_url, Err(HarvestError::Config(_))));
}
