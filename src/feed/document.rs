//! In-memory form of the merged feed file and its RSS mapping.
//!
//! [`FeedDocument`] converts to and from [`rss::Channel`] so that reading and
//! writing stay inside the `rss` crate.  The mapping is:
//!
//! | field          | RSS                                         |
//! |----------------|---------------------------------------------|
//! | `title`        | `<title>`                                   |
//! | `link`         | `<link>` and `<guid>`                       |
//! | `published_at` | `<pubDate>` (`%a, %d %b %Y %H:%M:%S %z`)    |
//! | `description`  | `<description>` (omitted when `None`)       |
//! | `image_url`    | `<media:content url=".." medium="image"/>`  |

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rss::extension::Extension;
use serde::Deserialize;

use super::CanonicalItem;
use crate::merge::parse_published;

pub const MEDIA_PREFIX: &str = "media";
pub const MEDIA_NAMESPACE: &str = "http://search.yahoo.com/mrss/";

/// Format used for `<pubDate>` on write.
pub const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Channel-level metadata written once and preserved across runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelMeta {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_link")]
    pub link: String,
    #[serde(default = "default_description")]
    pub description: String,
}

fn default_title() -> String {
    "Guardian Unified Feed".to_string()
}

fn default_link() -> String {
    "https://www.theguardian.com".to_string()
}

fn default_description() -> String {
    "Merged Guardian RSS".to_string()
}

impl Default for ChannelMeta {
    fn default() -> Self {
        Self {
            title: default_title(),
            link: default_link(),
            description: default_description(),
        }
    }
}

/// The merged feed: metadata plus items, newest-first by intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub meta: ChannelMeta,
    pub items: Vec<CanonicalItem>,
}

impl FeedDocument {
    pub fn empty(meta: ChannelMeta) -> Self {
        Self {
            meta,
            items: Vec::new(),
        }
    }

    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.link.as_str())
    }

    /// Build a document from a parsed channel.
    ///
    /// Returns the document and the number of `<item>`s that were dropped
    /// because they had no link or no parseable `<pubDate>`.
    pub fn from_channel(channel: &rss::Channel) -> (Self, usize) {
        let meta = ChannelMeta {
            title: channel.title().to_string(),
            link: channel.link().to_string(),
            description: channel.description().to_string(),
        };

        let prefix = media_prefix(channel.namespaces());
        let mut skipped = 0;
        let items = channel
            .items()
            .iter()
            .filter_map(|item| {
                let parsed = item_from_rss(item, prefix);
                if parsed.is_none() {
                    skipped += 1;
                }
                parsed
            })
            .collect();

        (Self { meta, items }, skipped)
    }

    pub fn to_channel(&self) -> rss::Channel {
        let mut channel = rss::Channel::default();
        channel.set_title(self.meta.title.clone());
        channel.set_link(self.meta.link.clone());
        channel.set_description(self.meta.description.clone());

        let mut namespaces = BTreeMap::new();
        namespaces.insert(MEDIA_PREFIX.to_string(), MEDIA_NAMESPACE.to_string());
        channel.set_namespaces(namespaces);

        channel.set_items(self.items.iter().map(item_to_rss).collect::<Vec<_>>());
        channel
    }
}

fn item_from_rss(item: &rss::Item, prefix: &str) -> Option<CanonicalItem> {
    let link = item.link().map(str::trim).filter(|l| !l.is_empty())?;
    let published_at = item.pub_date().and_then(parse_published)?;

    let image_url = item
        .extensions()
        .get(prefix)
        .and_then(|ns| ns.get("content"))
        .and_then(|contents| contents.first())
        .and_then(|ext| ext.attrs().get("url").cloned());

    Some(CanonicalItem {
        title: item.title().unwrap_or_default().to_string(),
        link: link.to_string(),
        published_at,
        description: item
            .description()
            .filter(|d| !d.is_empty())
            .map(String::from),
        image_url,
    })
}

fn item_to_rss(item: &CanonicalItem) -> rss::Item {
    let mut out = rss::Item::default();
    out.set_title(item.title.clone());
    out.set_link(item.link.clone());

    let mut guid = rss::Guid::default();
    guid.set_value(item.guid().to_string());
    guid.set_permalink(true);
    out.set_guid(guid);

    out.set_pub_date(format_pub_date(&item.published_at));
    out.set_description(item.description.clone());

    if let Some(url) = &item.image_url {
        let mut attrs = BTreeMap::new();
        attrs.insert("url".to_string(), url.clone());
        attrs.insert("medium".to_string(), "image".to_string());
        let content = Extension {
            name: format!("{MEDIA_PREFIX}:content"),
            value: None,
            attrs,
            children: BTreeMap::new(),
        };

        let mut media = BTreeMap::new();
        media.insert("content".to_string(), vec![content]);
        let mut extensions = BTreeMap::new();
        extensions.insert(MEDIA_PREFIX.to_string(), media);
        out.set_extensions(extensions);
    }

    out
}

/// The prefix a channel binds to the Media RSS namespace.
///
/// `rss` keys extensions by prefix, so a feed using `xmlns:m=".../mrss/"`
/// files its `<m:content>` under `"m"`.  Falls back to `media` when the
/// namespace is not declared.
pub fn media_prefix(namespaces: &BTreeMap<String, String>) -> &str {
    namespaces
        .iter()
        .find(|(_, uri)| uri.as_str() == MEDIA_NAMESPACE)
        .map(|(prefix, _)| prefix.as_str())
        .unwrap_or(MEDIA_PREFIX)
}

pub fn format_pub_date(ts: &DateTime<Utc>) -> String {
    ts.format(PUB_DATE_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
