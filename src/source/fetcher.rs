//! HTTP feed fetcher.
//!
//! Downloads a feed with a blocking [`reqwest`] client.  RSS 2.0 bodies are
//! parsed with the [`rss`] crate (it also reads RSS 1.0 `rdf:RDF`), which
//! keeps `<pubDate>` as written.  Atom bodies, which `rss` refuses, go
//! through [`feed_rs`].  Both paths are pure functions so tests can exercise
//! them without the network.

use std::time::Duration;

use anyhow::{Context, Result};

use super::{FeedFetcher, LinkRef, MediaRef, RawEntry};
use crate::feed::media_prefix;

/// Total request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

const USER_AGENT: &str = concat!("feedmerge/", env!("CARGO_PKG_VERSION"));

/// Fetches RSS feeds over HTTP.
///
/// Holds a single [`reqwest::blocking::Client`] so that connections are
/// reused across the sources of one run.
pub struct RssFetcher {
    client: reqwest::blocking::Client,
}

impl RssFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Convert an already-parsed [`rss::Channel`] into [`RawEntry`]s.
    ///
    /// No field is required here; an item with nothing in it still becomes
    /// an (empty) entry and is rejected later by the normaliser.
    pub fn parse_channel(channel: &rss::Channel) -> Vec<RawEntry> {
        let prefix = media_prefix(channel.namespaces());
        channel
            .items()
            .iter()
            .map(|item| raw_entry_from_item(item, prefix))
            .collect()
    }

    /// Convert a [`feed_rs`] feed (Atom, JSON Feed, ...) into [`RawEntry`]s.
    ///
    /// `feed_rs` has already parsed the dates, so `published` is re-rendered
    /// as RFC 3339.  Only `<published>` counts; `<updated>` is not a
    /// publication date.
    pub fn parse_feed(feed: &feed_rs::model::Feed) -> Vec<RawEntry> {
        feed.entries.iter().map(raw_entry_from_feed_entry).collect()
    }

    /// Parse a fetched body: `rss` first, `feed_rs` when `rss` rejects it.
    pub fn parse_body(body: &[u8]) -> Result<Vec<RawEntry>> {
        match rss::Channel::read_from(body) {
            Ok(channel) => Ok(Self::parse_channel(&channel)),
            Err(rss_err) => {
                let feed = feed_rs::parser::parse(body).map_err(|e| {
                    anyhow::anyhow!("not an RSS or Atom feed ({rss_err}; {e})")
                })?;
                Ok(Self::parse_feed(&feed))
            }
        }
    }
}

impl FeedFetcher for RssFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<RawEntry>> {
        let body = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()?
            .bytes()
            .with_context(|| format!("failed to read body of {url}"))?;
        Self::parse_body(body.as_ref()).with_context(|| format!("failed to parse {url}"))
    }
}

fn raw_entry_from_item(item: &rss::Item, prefix: &str) -> RawEntry {
    // <pubDate> first, Dublin Core <dc:date> as a fallback.
    let published = item.pub_date().map(String::from).or_else(|| {
        item.dublin_core_ext()
            .and_then(|dc| dc.dates().first().cloned())
    });

    let media = item
        .extensions()
        .get(prefix)
        .and_then(|ns| ns.get("content"))
        .map(|contents| {
            contents
                .iter()
                .map(|ext| MediaRef {
                    url: ext.attrs().get("url").cloned(),
                })
                .collect()
        })
        .unwrap_or_default();

    let links = item
        .enclosure()
        .map(|enc| LinkRef {
            href: Some(enc.url().to_string()),
            kind: Some(enc.mime_type().to_string()),
        })
        .into_iter()
        .collect();

    RawEntry {
        published,
        link: item.link().map(String::from),
        title: item.title().map(String::from),
        summary: item.description().map(String::from),
        media,
        links,
    }
}

fn raw_entry_from_feed_entry(entry: &feed_rs::model::Entry) -> RawEntry {
    // rel="alternate" (or no rel) is the story itself; enclosures and
    // related links are not.
    let link = entry
        .links
        .iter()
        .find(|l| l.rel.as_deref().map_or(true, |rel| rel == "alternate"))
        .or_else(|| entry.links.first())
        .map(|l| l.href.clone());

    let media = entry
        .media
        .iter()
        .flat_map(|object| &object.content)
        .map(|content| MediaRef {
            url: content.url.as_ref().map(|u| u.to_string()),
        })
        .collect();

    let links = entry
        .links
        .iter()
        .map(|l| LinkRef {
            href: Some(l.href.clone()),
            kind: l.media_type.clone(),
        })
        .collect();

    RawEntry {
        published: entry.published.map(|dt| dt.to_rfc3339()),
        link,
        title: entry.title.as_ref().map(|t| t.content.clone()),
        summary: entry.summary.as_ref().map(|s| s.content.clone()),
        media,
        links,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
