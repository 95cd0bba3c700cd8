//! Test utilities shared by the integration tests

use std::path::Path;

use storefront_harvest::{Anchor, ExtractionOrchestrator, HarvestConfig, MockSession};
use tempfile::TempDir;

/// Config rooted in `dir`, with the default delays
#[allow(dead_code)]
pub fn test_config(dir: &Path) -> HarvestConfig {
    HarvestConfig::builder()
        .seen_log(dir.join("seen_links.txt"))
        .output_dir(dir.join("output"))
        .activity_log(dir.join("log.txt"))
        .build()
        .unwrap()
}

/// Temp directory plus an orchestrator writing into it
#[allow(dead_code)]
pub fn test_orchestrator() -> (TempDir, ExtractionOrchestrator) {
    let dir = TempDir::new().unwrap();
    let orchestrator = ExtractionOrchestrator::new(test_config(dir.path()));
    (dir, orchestrator)
}

/// Anchor pointing at detail page `id` with a title attribute
#[allow(dead_code)]
pub fn detail_anchor(id: u32, title: &str) -> Anchor {
    Anchor::new(format!("https://www.primevideo.com/detail/{id}")).with_title(title)
}

/// Session whose page grows twice and then stays put
#[allow(dead_code)]
pub fn settling_session(anchors: Vec<Anchor>) -> MockSession {
    MockSession::new()
        .with_heights(vec![1000, 2000, 3000, 3000])
        .with_anchors(anchors)
}

/// Batch files currently in the output directory
#[allow(dead_code)]
pub fn batch_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let output = dir.join("output");
    if !output.exists() {
        return Vec::new();
    }
    let mut files: Vec<_> = std::fs::read_dir(output)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort();
    files
}

#[allow(dead_code)]
pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
