//! Batch files of newly found links
//!
//! One file per extraction request, named
//! `<prefix>_<label>_<YYYYMMDD_HHMMSS>.txt`, one `title — url` line per
//! entry in batch order. Files are created, never appended to. A second
//! batch for the same label within the same second gets a numeric suffix
//! (`..._1.txt`, `..._2.txt`) instead of overwriting the first.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::error::{HarvestError, HarvestResult};
use crate::link_extractor::LinkEntry;
use crate::utils::sanitize_label;

/// Filename timestamp format, second granularity
pub const BATCH_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Upper bound on same-second suffixes before giving up
const MAX_COLLISION_SUFFIX: u32 = 1000;

/// Longest filename most filesystems accept, in bytes
const MAX_FILENAME_BYTES: usize = 255;

/// Bytes after the label: `_YYYYMMDD_HHMMSS` plus the widest `_NNNN.txt` tail
const STEM_TAIL_BYTES: usize = "_YYYYMMDD_HHMMSS".len() + "_1000.txt".len();

fn truncate_at_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Newly discovered entries from one extraction request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionBatch {
    pub label: String,
    pub timestamp: DateTime<Local>,
    pub entries: Vec<LinkEntry>,
}

impl ExtractionBatch {
    /// A batch stamped with the current local time
    #[must_use]
    pub fn new(label: impl Into<String>, entries: Vec<LinkEntry>) -> Self {
        Self {
            label: label.into(),
            timestamp: Local::now(),
            entries,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where a batch ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReceipt {
    pub path: PathBuf,
    pub count: usize,
}

/// Writes batches into a fixed output directory
#[derive(Debug, Clone)]
pub struct BatchWriter {
    output_dir: PathBuf,
    file_prefix: String,
}

impl BatchWriter {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>, file_prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_prefix: file_prefix.into(),
        }
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Base file stem for a batch, before any collision suffix
    ///
    /// The label is cut so the full filename, suffix included, stays within
    /// 255 bytes.
    #[must_use]
    pub fn file_stem(&self, batch: &ExtractionBatch) -> String {
        let prefix_bytes = if self.file_prefix.is_empty() {
            0
        } else {
            self.file_prefix.len() + 1
        };
        let label_budget = MAX_FILENAME_BYTES.saturating_sub(prefix_bytes + STEM_TAIL_BYTES);
        let label = sanitize_label(&batch.label);
        let label = truncate_at_char_boundary(&label, label_budget);
        let timestamp = batch.timestamp.format(BATCH_TIMESTAMP_FORMAT);
        if self.file_prefix.is_empty() {
            format!("{label}_{timestamp}")
        } else {
            format!("{}_{label}_{timestamp}", self.file_prefix)
        }
    }

    /// Write `batch` to a new file and report how many lines went out.
    ///
    /// Empty batches are refused; callers check for new entries first.
    pub async fn write(&self, batch: &ExtractionBatch) -> HarvestResult<BatchReceipt> {
        if batch.is_empty() {
            return Err(HarvestError::EmptyBatch {
                label: batch.label.clone(),
            });
        }

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| HarvestError::storage(&self.output_dir, e))?;

        let mut content = String::new();
        for entry in &batch.entries {
            content.push_str(&entry.to_string());
            content.push('\n');
        }

        let stem = self.file_stem(batch);
        let (path, file) = self.create_unique(&stem).await?;
        write_or_discard(file, &path, content.as_bytes()).await?;

        info!("Saved {} links to {}", batch.len(), path.display());
        Ok(BatchReceipt {
            path,
            count: batch.len(),
        })
    }

    async fn create_unique(&self, stem: &str) -> HarvestResult<(PathBuf, tokio::fs::File)> {
        for attempt in 0..=MAX_COLLISION_SUFFIX {
            let name = if attempt == 0 {
                format!("{stem}.txt")
            } else {
                format!("{stem}_{attempt}.txt")
            };
            let path = self.output_dir.join(name);

            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(HarvestError::storage(&path, e)),
            }
        }

        Err(HarvestError::storage(
            self.output_dir.join(format!("{stem}.txt")),
            std::io::Error::new(
                ErrorKind::AlreadyExists,
                format!("more than {MAX_COLLISION_SUFFIX} batches in one second"),
            ),
        ))
    }
}

/// Write `content` to a freshly created file, removing the file if the write fails.
async fn write_or_discard<W: AsyncWrite + Unpin>(
    mut file: W,
    path: &Path,
    content: &[u8],
) -> HarvestResult<()> {
    let result = async {
        file.write_all(content).await?;
        file.flush().await
    }
    .await;
    drop(file);

    if let Err(e) = result {
        if let Err(remove_err) = tokio::fs::remove_file(path).await {
            warn!("Could not remove partial batch {}: {remove_err}", path.display());
        }
        return Err(HarvestError::storage(path, e));
    }
    Ok(())
}
