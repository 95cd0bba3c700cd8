//! Extraction orchestration
//!
//! Sequences one request through the pipeline, stopping at the first failure:
//!
//! `Navigate → Settle → ScrollToStable → Extract → LoadSeen → FilterNew →
//! (new found ? WriteBatch + AppendSeen + log : log no-op)`
//!
//! Steps are not atomic. A failure after the batch file is written but
//! before the seen-log append leaves those URLs eligible as "new" on the
//! next run, so delivery is at-least-once.

pub mod progress;

pub use progress::{NoOpProgress, ProgressReporter};

use std::path::Path;
use tracing::{error, info};

use crate::activity_log::ActivityLog;
use crate::batch_writer::{BatchReceipt, BatchWriter, ExtractionBatch};
use crate::config::HarvestConfig;
use crate::error::HarvestResult;
use crate::link_extractor::{LinkEntry, extract_links};
use crate::request::ExtractionRequest;
use crate::scroll_pager::scroll_to_stable;
use crate::seen_store::SeenStore;
use crate::session::{PageSession, with_page_timeout};

/// Result of one successful request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// New links were written to a batch file and appended to the seen-log
    Saved {
        label: String,
        receipt: BatchReceipt,
        duplicates: usize,
    },
    /// Nothing new; no batch file was written
    NothingNew { label: String, extracted: usize },
}

impl ExtractionOutcome {
    /// Number of links reported as new
    #[must_use]
    pub fn new_links(&self) -> usize {
        match self {
            Self::Saved { receipt, .. } => receipt.count,
            Self::NothingNew { .. } => 0,
        }
    }

    /// Batch file written, if any
    #[must_use]
    pub fn batch_path(&self) -> Option<&Path> {
        match self {
            Self::Saved { receipt, .. } => Some(&receipt.path),
            Self::NothingNew { .. } => None,
        }
    }
}

/// Runs extraction requests against one page session, one at a time
pub struct ExtractionOrchestrator<P: ProgressReporter = NoOpProgress> {
    config: HarvestConfig,
    seen: SeenStore,
    writer: BatchWriter,
    activity: ActivityLog,
    progress: P,
}

impl ExtractionOrchestrator<NoOpProgress> {
    #[must_use]
    pub fn new(config: HarvestConfig) -> Self {
        Self {
            seen: SeenStore::new(config.seen_log()),
            writer: BatchWriter::new(config.output_dir(), config.file_prefix()),
            activity: ActivityLog::new(config.activity_log()),
            config,
            progress: NoOpProgress,
        }
    }
}

impl<P: ProgressReporter> ExtractionOrchestrator<P> {
    /// Swap in a progress reporter
    #[must_use]
    pub fn with_progress<Q: ProgressReporter>(self, progress: Q) -> ExtractionOrchestrator<Q> {
        ExtractionOrchestrator {
            config: self.config,
            seen: self.seen,
            writer: self.writer,
            activity: self.activity,
            progress,
        }
    }

    #[must_use]
    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Run one request to completion. Failures are reported and returned; nothing is retried.
    pub async fn run<S: PageSession>(
        &self,
        session: &S,
        request: &ExtractionRequest,
    ) -> HarvestResult<ExtractionOutcome> {
        match self.run_steps(session, request).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!(label = %request.label, "Extraction failed: {e}");
                self.progress.report_error(&e.to_string());
                Err(e)
            }
        }
    }

    async fn run_steps<S: PageSession>(
        &self,
        session: &S,
        request: &ExtractionRequest,
    ) -> HarvestResult<ExtractionOutcome> {
        info!(label = %request.label, url = %request.url, "Starting extraction");

        // Navigate
        self.progress.report_navigation_started(&request.url);
        with_page_timeout(
            session.navigate(&request.url),
            self.config.navigation_timeout_secs(),
            "Navigation",
        )
        .await?;

        // Settle
        self.progress.report_settling();
        tokio::time::sleep(self.config.settle_delay()).await;

        // ScrollToStable
        self.progress.report_scrolling();
        scroll_to_stable(session, self.config.scroll_policy()).await?;
        self.progress.report_scroll_finished();

        // Extract; set order is arbitrary and stays that way in the batch
        let extracted: Vec<LinkEntry> = extract_links(session, self.config.detail_marker())
            .await?
            .into_iter()
            .collect();
        self.progress.report_extracted(extracted.len());

        // LoadSeen + FilterNew
        let seen = self.seen.load().await?;
        let fresh = seen.filter_new(&extracted);
        let duplicates = extracted.len() - fresh.len();

        if fresh.is_empty() {
            info!(label = %request.label, extracted = extracted.len(), "No new links");
            self.progress.report_nothing_new(&request.label);
            self.activity
                .record(&format!("No new links found for: {}", request.label))
                .await?;
            return Ok(ExtractionOutcome::NothingNew {
                label: request.label.clone(),
                extracted: extracted.len(),
            });
        }

        // WriteBatch + AppendSeen
        let batch = ExtractionBatch::new(request.label.clone(), fresh);
        let receipt = self.writer.write(&batch).await?;
        self.seen.append(&batch.entries).await?;
        self.activity
            .record(&format!(
                "Added {} new links from: {}",
                receipt.count, request.label
            ))
            .await?;

        info!(
            label = %request.label,
            new_links = receipt.count,
            duplicates,
            "Extraction complete"
        );
        self.progress.report_batch_saved(&receipt, duplicates);

        Ok(ExtractionOutcome::Saved {
            label: request.label.clone(),
            receipt,
            duplicates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarvestError;
    use crate::session::{Anchor, MockSession};
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn orchestrator(dir: &TempDir) -> ExtractionOrchestrator {
        let config = HarvestConfig::builder()
            .seen_log(dir.path().join("seen.txt"))
            .output_dir(dir.path().join("out"))
            .activity_log(dir.path().join("log.txt"))
            .build()
            .unwrap();
        ExtractionOrchestrator::new(config)
    }

    fn storefront_session() -> MockSession {
        MockSession::new().with_heights(vec![100, 200, 200]).with_anchors(vec![
            Anchor::new("https://p/detail/1").with_title("One"),
            Anchor::new("https://p/detail/2").with_alt("Two"),
            Anchor::new("https://p/storefront/action").with_title("Nav"),
        ])
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn push(&self, event: impl Into<String>) {
            self.events.lock().unwrap().push(event.into());
        }
    }

    impl ProgressReporter for &Recorder {
        fn report_navigation_started(&self, url: &str) {
            self.push(format!("navigate {url}"));
        }
        fn report_settling(&self) {
            self.push("settle");
        }
        fn report_scrolling(&self) {
            self.push("scroll");
        }
        fn report_scroll_finished(&self) {
            self.push("scrolled");
        }
        fn report_extracted(&self, count: usize) {
            self.push(format!("extracted {count}"));
        }
        fn report_batch_saved(&self, receipt: &BatchReceipt, duplicates: usize) {
            self.push(format!("saved {} dup {duplicates}", receipt.count));
        }
        fn report_nothing_new(&self, label: &str) {
            self.push(format!("nothing {label}"));
        }
        fn report_error(&self, _error: &str) {
            self.push("error");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_run_saves_second_run_is_noop() {
        let dir = TempDir::new().unwrap();
        let orchestrator = orchestrator(&dir);
        let session = storefront_session();
        let request = ExtractionRequest::new("storefront", "https://p/storefront/");

        let first = orchestrator.run(&session, &request).await.unwrap();
        assert_eq!(first.new_links(), 2);
        let path = first.batch_path().unwrap().to_path_buf();
        assert!(path.exists());

        let second = orchestrator.run(&session, &request).await.unwrap();
        assert_eq!(
            second,
            ExtractionOutcome::NothingNew {
                label: "storefront".to_string(),
                extracted: 2
            }
        );

        let files = std::fs::read_dir(dir.path().join("out")).unwrap().count();
        assert_eq!(files, 1);

        let log = std::fs::read_to_string(dir.path().join("log.txt")).unwrap();
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("] Added 2 new links from: storefront"));
        assert!(lines[1].ends_with("] No new links found for: storefront"));
    }

    #[tokio::test(start_paused = true)]
    async fn duplicates_counted_against_extracted_pairs() {
        let dir = TempDir::new().unwrap();
        let orchestrator = orchestrator(&dir);
        std::fs::write(dir.path().join("seen.txt"), "https://p/detail/1\n").unwrap();
        let session = storefront_session();

        let outcome = orchestrator
            .run(&session, &ExtractionRequest::new("storefront", "https://p/"))
            .await
            .unwrap();

        match outcome {
            ExtractionOutcome::Saved {
                receipt,
                duplicates,
                ..
            } => {
                assert_eq!(receipt.count, 1);
                assert_eq!(duplicates, 1);
                let content = std::fs::read_to_string(&receipt.path).unwrap();
                assert_eq!(content, "Two — https://p/detail/2\n");
            }
            other => panic!("expected a saved batch, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn steps_run_in_order() {
        let dir = TempDir::new().unwrap();
        let recorder = Recorder::default();
        let orchestrator = orchestrator(&dir).with_progress(&recorder);
        let session = storefront_session();

        orchestrator
            .run(&session, &ExtractionRequest::new("storefront", "https://p/"))
            .await
            .unwrap();

        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec![
                "navigate https://p/",
                "settle",
                "scroll",
                "scrolled",
                "extracted 2",
                "saved 2 dup 0",
            ]
        );
        assert_eq!(session.navigations(), vec!["https://p/".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn settle_delay_precedes_scrolling() {
        let dir = TempDir::new().unwrap();
        let orchestrator = orchestrator(&dir);
        let session = MockSession::new();
        let started = tokio::time::Instant::now();

        orchestrator
            .run(&session, &ExtractionRequest::new("storefront", "https://p/"))
            .await
            .unwrap();

        // settle (3s) plus one scroll sample (2s) on an already stable page
        assert_eq!(started.elapsed(), std::time::Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn navigation_failure_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let recorder = Recorder::default();
        let orchestrator = orchestrator(&dir).with_progress(&recorder);
        let session = storefront_session();
        session.fail_navigation("net::ERR_CONNECTION_RESET");

        let err = orchestrator
            .run(&session, &ExtractionRequest::new("storefront", "https://p/"))
            .await
            .unwrap_err();

        assert!(matches!(err, HarvestError::Session(_)));
        assert_eq!(session.scroll_count(), 0);
        assert!(!dir.path().join("seen.txt").exists());
        assert!(!dir.path().join("out").exists());
        assert!(!dir.path().join("log.txt").exists());
        assert_eq!(recorder.events.lock().unwrap().last().unwrap(), "error");
    }

    #[tokio::test(start_paused = true)]
    async fn extraction_failure_leaves_seen_log_unchanged() {
        let dir = TempDir::new().unwrap();
        let orchestrator = orchestrator(&dir);
        std::fs::write(dir.path().join("seen.txt"), "https://p/detail/1\n").unwrap();
        let session = storefront_session();
        session.fail_anchor_listing("target closed");

        assert!(
            orchestrator
                .run(&session, &ExtractionRequest::new("storefront", "https://p/"))
                .await
                .is_err()
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("seen.txt")).unwrap(),
            "https://p/detail/1\n"
        );
    }
}
