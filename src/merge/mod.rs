//! Merge/dedup/trim engine.
//!
//! * **`normalize`** — raw entry to [`CanonicalItem`](crate::feed::CanonicalItem).
//! * **`filter`** — per-source allow/block list on the link.
//! * **`freshness`** — rolling cutoff relative to the run's `now`.
//! * **`dedup`** — links already persisted or accepted this run.
//! * **`engine`** — the cycle that wires them together, plus `merge`/`trim`.

mod dedup;
mod engine;
mod filter;
mod freshness;
mod normalize;

pub use dedup::DedupSet;
pub use engine::{merge, run_merge_cycle, trim, FeedSource, MergeOutcome, MergeSettings, RunStats};
pub use filter::{FilterMode, LinkFilter};
pub use freshness::FreshnessFilter;
pub use normalize::{normalize, parse_published};

/// Why an entry did not make it into the document.
///
/// These are expected outcomes, not errors; they are counted and logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingLink,
    MissingDate,
    UnparseableDate,
    /// Blocked by the source's link filter.
    Filtered,
    /// Published before the freshness cutoff.
    Stale,
    Duplicate,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::MissingLink => "missing link",
            Rejection::MissingDate => "missing date",
            Rejection::UnparseableDate => "unparseable date",
            Rejection::Filtered => "filtered",
            Rejection::Stale => "stale",
            Rejection::Duplicate => "duplicate",
        }
    }
}
