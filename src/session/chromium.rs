//! `PageSession` backed by a chromiumoxide page

use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use serde_json::Value;
use std::path::PathBuf;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::browser_setup::launch_browser;
use super::js_scripts::ANCHORS_SCRIPT;
use super::{Anchor, PageSession};
use crate::config::HarvestConfig;
use crate::error::{HarvestError, HarvestResult};

/// A single browser tab driven over CDP.
///
/// Owns the browser process and its handler task. The handler is aborted on
/// drop; call [`ChromiumSession::close`] for an orderly shutdown.
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
    /// Profile directories we created ourselves are removed on close
    owns_profile: bool,
}

impl ChromiumSession {
    /// Launch a browser per `config` and open one blank tab.
    pub async fn launch(config: &HarvestConfig) -> HarvestResult<Self> {
        let owns_profile = config.chrome_data_dir().is_none();
        let user_data_dir = match config.chrome_data_dir() {
            Some(dir) => dir.clone(),
            None => std::env::temp_dir()
                .join(format!("storefront_harvest_profile_{}", std::process::id())),
        };
        tokio::fs::create_dir_all(&user_data_dir)
            .await
            .map_err(|e| HarvestError::storage(&user_data_dir, e))?;

        let (browser, handler) = launch_browser(config, &user_data_dir).await?;

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(e.into());
            }
        };

        Ok(Self {
            browser,
            page,
            handler,
            user_data_dir: Some(user_data_dir),
            owns_profile,
        })
    }

    /// Close the browser, wait for the process to exit, then clean up.
    pub async fn close(mut self) -> HarvestResult<()> {
        info!("Closing browser");
        if let Err(e) = self.browser.close().await {
            warn!("Browser close failed: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Waiting for browser exit failed: {e}");
        }
        self.handler.abort();
        self.cleanup_profile();
        Ok(())
    }

    fn cleanup_profile(&mut self) {
        if !self.owns_profile {
            return;
        }
        if let Some(path) = self.user_data_dir.take() {
            debug!("Cleaning up profile directory: {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to clean up profile directory {}: {}. Manual cleanup may be required.",
                    path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

impl PageSession for ChromiumSession {
    async fn navigate(&self, url: &str) -> HarvestResult<()> {
        debug!("Navigating to {url}");
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn evaluate_script(&self, script: &str) -> HarvestResult<Value> {
        let result = self.page.evaluate(script).await?;
        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    async fn list_anchors(&self) -> HarvestResult<Vec<Anchor>> {
        let value = self.evaluate_script(ANCHORS_SCRIPT).await?;
        let anchors: Vec<Anchor> = serde_json::from_value(value)?;
        debug!("Enumerated {} anchors", anchors.len());
        Ok(anchors)
    }
}
