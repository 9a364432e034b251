//! The persisted unit of the merged feed.
//!
//! A `CanonicalItem` is what survives normalisation and filtering.  Once it
//! is in a [`FeedDocument`](super::FeedDocument) it is never modified; it
//! only leaves the document by being trimmed off the tail.

use chrono::{DateTime, Utc};

/// A normalised feed record.
///
/// `link` is the deduplication key and doubles as the `<guid>` on disk, so
/// there is no separate guid field to drift out of sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalItem {
    /// Headline, trimmed.  May be empty.
    pub title: String,

    /// URL of the story.  Unique within a document.
    pub link: String,

    /// Publication instant, always UTC.
    pub published_at: DateTime<Utc>,

    /// Summary text, omitted when the feed gave none.
    pub description: Option<String>,

    /// Lead image, written as `<media:content medium="image">`.
    pub image_url: Option<String>,
}

impl CanonicalItem {
    /// The `<guid>` value.
    pub fn guid(&self) -> &str {
        &self.link
    }
}

/// Sort newest-first, keeping the relative order of equal timestamps.
pub fn sort_newest_first(items: &mut [CanonicalItem]) {
    // slice::sort_by is stable, so ties stay in fetch order.
    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
