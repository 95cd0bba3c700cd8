//! Detail-link extraction from the rendered page
//!
//! Reads the anchors a session currently renders, keeps those whose resolved
//! URL contains the detail marker, and resolves a display title for each.
//! The result is a set of `(title, url)` pairs. Two pairs sharing a URL with
//! different titles are both kept; URL-level dedup happens against the
//! seen-log. Iteration order of the set is unspecified.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use crate::error::HarvestResult;
use crate::session::{Anchor, PageSession};
use crate::utils::UNKNOWN_TITLE;

/// A harvested detail link. `url` is the identity; `title` is display only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkEntry {
    pub title: String,
    pub url: String,
}

impl LinkEntry {
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for LinkEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", self.title, self.url)
    }
}

/// Title fallback chain: title metadata, then alt metadata, then trimmed
/// visible text, then [`UNKNOWN_TITLE`]. Empty values fall through.
#[must_use]
pub fn resolve_title(anchor: &Anchor) -> String {
    fn non_empty(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.is_empty())
    }

    non_empty(&anchor.title)
        .or_else(|| non_empty(&anchor.alt))
        .or_else(|| anchor.text.as_deref().map(str::trim).filter(|t| !t.is_empty()))
        .unwrap_or(UNKNOWN_TITLE)
        .to_string()
}

/// Filter `anchors` down to unique detail-link pairs.
#[must_use]
pub fn collect_detail_links(anchors: &[Anchor], detail_marker: &str) -> HashSet<LinkEntry> {
    anchors
        .iter()
        .filter_map(|anchor| {
            let href = anchor.href.as_deref().filter(|h| !h.is_empty())?;
            href.contains(detail_marker)
                .then(|| LinkEntry::new(resolve_title(anchor), href))
        })
        .collect()
}

/// Harvest detail links from the session's current rendered state.
///
/// Pure read: no navigation, no scrolling.
pub async fn extract_links<S: PageSession>(
    session: &S,
    detail_marker: &str,
) -> HarvestResult<HashSet<LinkEntry>> {
    let anchors = session.list_anchors().await?;
    let links = collect_detail_links(&anchors, detail_marker);
    debug!(
        anchors = anchors.len(),
        detail_links = links.len(),
        "Extracted detail links"
    );
    Ok(links)
}
