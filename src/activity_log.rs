//! Append-only activity log
//!
//! One line per event, `[YYYY-MM-DD HH:MM:SS] message`, local time. This is
//! the user-facing history of requests; diagnostics go through `tracing`.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::error::{HarvestError, HarvestResult};

pub const ACTIVITY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format a single log line (including the trailing newline)
    #[must_use]
    pub fn format_line(at: DateTime<Local>, message: &str) -> String {
        format!("[{}] {message}\n", at.format(ACTIVITY_TIMESTAMP_FORMAT))
    }

    /// Append `message` stamped with the current local time.
    pub async fn record(&self, message: &str) -> HarvestResult<()> {
        self.record_at(Local::now(), message).await
    }

    pub async fn record_at(&self, at: DateTime<Local>, message: &str) -> HarvestResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| HarvestError::storage(parent, e))?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| HarvestError::storage(&self.path, e))?;
        file.write_all(Self::format_line(at, message).as_bytes())
            .await
            .map_err(|e| HarvestError::storage(&self.path, e))?;
        file.flush()
            .await
            .map_err(|e| HarvestError::storage(&self.path, e))
    }
}
