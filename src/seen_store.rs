//! Persisted record of every URL already reported as new.
//!
//! The seen-log is plain text, one URL per line, append-only. It is never
//! compacted. Appending the same URL twice leaves a duplicate line, which
//! set semantics absorb on the next load.
//!
//! Delivery of "new" links is at-least-once: if a batch file is written and
//! the following [`SeenStore::append`] fails, the next run reports the same
//! URLs again. Load-then-append is not transactional, so one writer at a time.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{HarvestError, HarvestResult};
use crate::link_extractor::LinkEntry;

/// Unordered set of previously seen URLs. Only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet {
    urls: HashSet<String>,
}

impl SeenSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    #[must_use]
    pub fn is_superset(&self, other: &SeenSet) -> bool {
        self.urls.is_superset(&other.urls)
    }

    /// Keep the candidates whose URL is not in the set, preserving their order.
    ///
    /// Membership is checked against this set only; candidates sharing a URL
    /// among themselves are not collapsed here.
    #[must_use]
    pub fn filter_new(&self, candidates: &[LinkEntry]) -> Vec<LinkEntry> {
        candidates
            .iter()
            .filter(|entry| !self.contains(&entry.url))
            .cloned()
            .collect()
    }
}

impl FromIterator<String> for SeenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            urls: iter.into_iter().collect(),
        }
    }
}

impl Extend<String> for SeenSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.urls.extend(iter);
    }
}

/// File-backed seen-log
#[derive(Debug, Clone)]
pub struct SeenStore {
    path: PathBuf,
}

impl SeenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every URL ever recorded. A missing log is an empty set, not an error.
    pub async fn load(&self) -> HarvestResult<SeenSet> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Seen-log {} does not exist yet", self.path.display());
                return Ok(SeenSet::new());
            }
            Err(e) => return Err(HarvestError::storage(&self.path, e)),
        };

        // Blank lines never match a candidate URL, so they are dropped
        let seen: SeenSet = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        debug!(
            "Loaded {} seen URLs from {}",
            seen.len(),
            self.path.display()
        );
        Ok(seen)
    }

    /// Candidates not present in the seen-log, in candidate order.
    pub async fn filter_new(&self, candidates: &[LinkEntry]) -> HarvestResult<Vec<LinkEntry>> {
        Ok(self.load().await?.filter_new(candidates))
    }

    /// Append one line per entry URL to the end of the log.
    pub async fn append(&self, entries: &[LinkEntry]) -> HarvestResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| HarvestError::storage(parent, e))?;
        }

        let mut buffer = String::with_capacity(entries.iter().map(|e| e.url.len() + 1).sum());
        for entry in entries {
            buffer.push_str(&entry.url);
            buffer.push('\n');
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| HarvestError::storage(&self.path, e))?;
        file.write_all(buffer.as_bytes())
            .await
            .map_err(|e| HarvestError::storage(&self.path, e))?;
        file.flush()
            .await
            .map_err(|e| HarvestError::storage(&self.path, e))?;

        debug!(
            "Appended {} URLs to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(title: &str, url: &str) -> LinkEntry {
        LinkEntry::new(title, url)
    }

    #[tokio::test]
    async fn missing_log_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = SeenStore::new(dir.path().join("seen.txt"));

        let seen = store.load().await.unwrap();
        assert!(seen.is_empty());
    }

    #[tokio::test]
    async fn load_trims_lines_and_tolerates_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seen.txt");
        tokio::fs::write(&path, "https://a/detail/1\n  https://a/detail/2  \n\nhttps://a/detail/1\n")
            .await
            .unwrap();

        let seen = SeenStore::new(&path).load().await.unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.contains("https://a/detail/1"));
        assert!(seen.contains("https://a/detail/2"));
    }

    #[tokio::test]
    async fn append_then_load_contains_batch() {
        let dir = TempDir::new().unwrap();
        let store = SeenStore::new(dir.path().join("nested").join("seen.txt"));
        let batch = vec![entry("A", "https://a/detail/1"), entry("B", "https://a/detail/2")];

        store.append(&batch).await.unwrap();
        store.append(&batch[..1]).await.unwrap();

        let seen = store.load().await.unwrap();
        assert_eq!(seen.len(), 2);

        let raw = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert_eq!(raw.lines().count(), 3, "log is append-only, duplicates kept");
    }

    #[test]
    fn filter_new_preserves_candidate_order() {
        let seen: SeenSet = ["https://a/detail/2".to_string()].into_iter().collect();
        let candidates = vec![
            entry("C", "https://a/detail/3"),
            entry("B", "https://a/detail/2"),
            entry("A", "https://a/detail/1"),
        ];

        let fresh = seen.filter_new(&candidates);
        assert_eq!(
            fresh,
            vec![entry("C", "https://a/detail/3"), entry("A", "https://a/detail/1")]
        );
    }

    #[test]
    fn title_never_participates_in_membership() {
        let seen: SeenSet = ["https://a/detail/1".to_string()].into_iter().collect();
        let fresh = seen.filter_new(&[entry("Different title", "https://a/detail/1")]);
        assert!(fresh.is_empty());
    }

    #[tokio::test]
    async fn unreadable_log_is_storage_error() {
        let dir = TempDir::new().unwrap();
        // A directory where the log file should be
        let store = SeenStore::new(dir.path());

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, HarvestError::Storage { .. }));
    }
}
