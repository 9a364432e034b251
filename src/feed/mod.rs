//! The merged feed: canonical items, the document that holds them, and the
//! file it lives in.

mod document;
mod item;
pub mod store;

pub use document::{media_prefix, ChannelMeta, FeedDocument};
pub use item::{sort_newest_first, CanonicalItem};

#[cfg(test)]
pub(crate) use item::tests::make_item;
