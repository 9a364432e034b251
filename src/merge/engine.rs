//! The merge cycle: fetch every source, screen its entries, splice the
//! survivors onto the head of the document and trim the tail.
//!
//! ```text
//! RawEntry ─► normalize ─► LinkFilter ─► FreshnessFilter ─► DedupSet ─► accepted
//!                                                                          │
//!                   existing.items ◄── sort newest-first, prepend ◄────────┘
//!                         │
//!                       trim(max_items)
//! ```
//!
//! Dedup runs last so a link is only remembered once its entry is actually
//! accepted.  Everything the cycle needs is passed in, including `now`.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use super::{normalize, DedupSet, FreshnessFilter, LinkFilter, Rejection};
use crate::feed::{sort_newest_first, CanonicalItem, FeedDocument};
use crate::source::{FeedFetcher, RawEntry};

/// One configured feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub url: String,
    pub filter: LinkFilter,
}

/// Run-wide limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSettings {
    pub max_items: usize,
    pub freshness_window: Duration,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            max_items: 1000,
            freshness_window: Duration::hours(48),
        }
    }
}

/// Counters for one run, logged at the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub failed_sources: usize,
    pub fetched: usize,
    pub accepted: usize,
    pub trimmed: usize,
    pub missing_link: usize,
    pub missing_date: usize,
    pub unparseable_date: usize,
    pub filtered: usize,
    pub stale: usize,
    pub duplicate: usize,
}

impl RunStats {
    fn record(&mut self, rejection: Rejection) {
        let counter = match rejection {
            Rejection::MissingLink => &mut self.missing_link,
            Rejection::MissingDate => &mut self.missing_date,
            Rejection::UnparseableDate => &mut self.unparseable_date,
            Rejection::Filtered => &mut self.filtered,
            Rejection::Stale => &mut self.stale,
            Rejection::Duplicate => &mut self.duplicate,
        };
        *counter += 1;
    }
}

#[derive(Debug)]
pub struct MergeOutcome {
    pub document: FeedDocument,
    pub stats: RunStats,
}

/// Run one full cycle against `existing` and return the updated document.
///
/// Never fails: a source whose fetch errors contributes nothing and the
/// remaining sources are still processed.
pub fn run_merge_cycle(
    existing: FeedDocument,
    sources: &[FeedSource],
    fetcher: &dyn FeedFetcher,
    settings: &MergeSettings,
    now: DateTime<Utc>,
) -> MergeOutcome {
    let freshness = FreshnessFilter::new(now, settings.freshness_window);
    let mut seen = DedupSet::seeded(existing.links());
    let mut stats = RunStats::default();
    let mut accepted = Vec::new();

    debug!(cutoff = %freshness.cutoff(), existing = existing.items.len(), "starting merge cycle");

    for source in sources {
        let entries = match fetcher.fetch(&source.url) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(url = %source.url, error = %format!("{e:#}"), "fetch failed, skipping source");
                stats.failed_sources += 1;
                continue;
            }
        };

        let before = accepted.len();
        for entry in &entries {
            match screen(entry, &source.filter, &freshness, &mut seen) {
                Ok(item) => accepted.push(item),
                Err(rejection) => {
                    debug!(
                        url = %source.url,
                        link = entry.link.as_deref().unwrap_or("-"),
                        reason = rejection.as_str(),
                        "entry rejected"
                    );
                    stats.record(rejection);
                }
            }
        }

        stats.fetched += entries.len();
        info!(
            url = %source.url,
            fetched = entries.len(),
            accepted = accepted.len() - before,
            "processed source"
        );
    }

    stats.accepted = accepted.len();
    let mut document = merge(existing, accepted);
    stats.trimmed = trim(&mut document.items, settings.max_items);

    MergeOutcome { document, stats }
}

/// Apply every check to one entry, in the fixed order.
fn screen(
    entry: &RawEntry,
    filter: &LinkFilter,
    freshness: &FreshnessFilter,
    seen: &mut DedupSet,
) -> Result<CanonicalItem, Rejection> {
    let item = normalize(entry)?;
    if !filter.accepts(Some(item.link.as_str())) {
        return Err(Rejection::Filtered);
    }
    if !freshness.accepts(item.published_at) {
        return Err(Rejection::Stale);
    }
    if !seen.accept(&item.link) {
        return Err(Rejection::Duplicate);
    }
    Ok(item)
}

/// Sort `new_items` newest-first and put them ahead of the existing items.
///
/// Existing items are not re-sorted, so an old entry accepted late lands
/// above newer items from earlier runs.
pub fn merge(existing: FeedDocument, mut new_items: Vec<CanonicalItem>) -> FeedDocument {
    sort_newest_first(&mut new_items);
    new_items.extend(existing.items);
    FeedDocument {
        meta: existing.meta,
        items: new_items,
    }
}

/// Keep the first `max_items` items.  Returns how many were dropped.
pub fn trim(items: &mut Vec<CanonicalItem>, max_items: usize) -> usize {
    let excess = items.len().saturating_sub(max_items);
    items.truncate(max_items);
    excess
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
