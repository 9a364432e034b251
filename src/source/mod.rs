//! Fetch layer.
//!
//! This module defines the [`FeedFetcher`] trait and the loose [`RawEntry`]
//! type it produces.  The concrete HTTP + RSS/Atom implementation lives in
//! [`fetcher`].
//!
//! ## For contributors — adding a new fetcher
//!
//! 1. Create a new file in this directory (e.g. `json_feed.rs`).
//! 2. Define a struct and implement [`FeedFetcher`] for it, converting the
//!    native entries into [`RawEntry`] values.
//! 3. Add `mod json_feed;` below and re-export your struct.
//! 4. Construct it in `main.rs` instead of [`RssFetcher`].
//!
//! The merge engine only ever sees `RawEntry`, so nothing else changes.

mod raw_entry;
mod fetcher;

pub use raw_entry::{LinkRef, MediaRef, RawEntry};
pub use fetcher::RssFetcher;

use anyhow::Result;

/// Anything that can turn a feed URL into a batch of raw entries.
///
/// The run cycle calls [`fetch()`](FeedFetcher::fetch) once per configured
/// source, sequentially.  An `Err` is logged and the source contributes no
/// entries; it never aborts the run.
pub trait FeedFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<RawEntry>>;
}
