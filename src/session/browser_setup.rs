//! Browser process setup for `ChromiumSession`
//!
//! Prefers a Chrome or Chromium that chromiumoxide can find on the machine and
//! falls back to a managed Chromium downloaded into the user cache directory.

use chromiumoxide::browser::{Browser, BrowserConfig, BrowserConfigBuilder};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::HarvestConfig;
use crate::error::{HarvestError, HarvestResult};

/// Desktop window size; the storefront lays out more rows per screen at this size
pub const WINDOW_SIZE: (u32, u32) = (1920, 1080);

fn config_builder(config: &HarvestConfig, profile_dir: &Path) -> BrowserConfigBuilder {
    let (width, height) = WINDOW_SIZE;
    let builder = BrowserConfig::builder()
        .window_size(width, height)
        .viewport(None)
        .user_data_dir(profile_dir)
        .arg("--disable-blink-features=AutomationControlled");

    if config.headless() {
        builder
    } else {
        builder.with_head()
    }
}

/// Download a managed Chromium and return its executable path.
pub async fn download_chromium() -> HarvestResult<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("storefront_harvest")
        .join("chromium");
    tokio::fs::create_dir_all(&cache_dir)
        .await
        .map_err(|e| HarvestError::storage(&cache_dir, e))?;

    info!("No local browser found, downloading Chromium to {}", cache_dir.display());
    let options = BrowserFetcherOptions::builder()
        .with_path(&cache_dir)
        .build()
        .map_err(|e| HarvestError::Session(format!("Browser download setup failed: {e}")))?;
    let revision = BrowserFetcher::new(options)
        .fetch()
        .await
        .map_err(|e| HarvestError::Session(format!("Browser download failed: {e}")))?;

    Ok(revision.executable_path)
}

/// Launch a browser per `config` with its profile in `profile_dir`.
///
/// Returns the browser and the task driving its CDP connection; the task ends
/// when the connection closes.
pub async fn launch_browser(
    config: &HarvestConfig,
    profile_dir: &Path,
) -> HarvestResult<(Browser, JoinHandle<()>)> {
    let browser_config = match config_builder(config, profile_dir).build() {
        Ok(browser_config) => browser_config,
        Err(detect_error) => {
            debug!("Browser auto-detection failed: {detect_error}");
            let executable = download_chromium().await?;
            config_builder(config, profile_dir)
                .chrome_executable(executable)
                .build()
                .map_err(|e| HarvestError::Session(format!("Invalid browser config: {e}")))?
        }
    };

    info!(headless = config.headless(), "Launching browser");
    let (browser, mut events) = Browser::launch(browser_config).await?;

    let handler = tokio::spawn(async move {
        while let Some(event) = events.next().await {
            if let Err(e) = event {
                debug!("CDP connection event error: {e}");
            }
        }
        debug!("CDP connection closed");
    });

    Ok((browser, handler))
}
