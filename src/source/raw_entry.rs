//! The entry type handed from the fetch layer to the merge engine.
//!
//! `RawEntry` is deliberately loose: every field is optional because feeds in
//! the wild omit whatever they like.  Deciding what is usable is the job of
//! [`crate::merge::normalize`], not of the fetcher.

/// A `media:content` reference attached to an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaRef {
    pub url: Option<String>,
}

/// A typed link attached to an entry (e.g. an RSS `<enclosure>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRef {
    pub href: Option<String>,
    /// Declared MIME type, e.g. `image/jpeg`.
    pub kind: Option<String>,
}

/// One entry as returned by a feed, before normalisation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    /// Publication date exactly as the feed wrote it.
    pub published: Option<String>,
    pub link: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    /// Media references in document order.
    pub media: Vec<MediaRef>,
    /// Typed link references in document order.
    pub links: Vec<LinkRef>,
}
