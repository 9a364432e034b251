//! feedmerge — fold a fixed set of RSS feeds into one bounded,
//! deduplicated, newest-first RSS file.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐ RawEntry ┌───────────┐ FeedDocument ┌──────────────┐
//! │  source/  │ ───────► │  merge/   │ ───────────► │ feed::store  │
//! │ (fetcher) │          │ (engine)  │ ◄─────────── │ (merged.xml) │
//! └───────────┘          └───────────┘   load       └──────────────┘
//! ```
//!
//! * **`source`** — the `FeedFetcher` trait and the HTTP + RSS fetcher.
//! * **`merge`** — normalise, filter, dedup, freshness, merge, trim.
//! * **`feed`** — canonical items, the document, and its file.
//! * **`config`** / **`logging`** / **`error`** — the usual plumbing.

pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod merge;
pub mod source;
