//! Raw entry → canonical item.

use chrono::{DateTime, NaiveDateTime, Utc};

use super::Rejection;
use crate::feed::CanonicalItem;
use crate::source::RawEntry;

/// Naive layouts accepted after RFC 2822 and RFC 3339, read as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a feed date string into a UTC instant.
///
/// Returns `None` for anything unrecognised; callers must never substitute
/// "now" for a failed parse.
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|naive| naive.and_utc())
        })
}

/// Turn a [`RawEntry`] into a [`CanonicalItem`], or say why it can't be one.
pub fn normalize(entry: &RawEntry) -> Result<CanonicalItem, Rejection> {
    let link = entry.link.as_deref().ok_or(Rejection::MissingLink)?;
    let raw_date = entry.published.as_deref().ok_or(Rejection::MissingDate)?;
    let published_at = parse_published(raw_date).ok_or(Rejection::UnparseableDate)?;

    Ok(CanonicalItem {
        title: entry.title.as_deref().unwrap_or_default().trim().to_string(),
        link: link.to_string(),
        published_at,
        description: entry.summary.clone().filter(|s| !s.is_empty()),
        image_url: resolve_image(entry),
    })
}

/// First `media:content` URL, else the first link whose type starts with
/// `image`.
fn resolve_image(entry: &RawEntry) -> Option<String> {
    if let Some(first) = entry.media.first() {
        return first.url.clone();
    }
    entry
        .links
        .iter()
        .find(|l| l.kind.as_deref().is_some_and(|k| k.starts_with("image")))
        .and_then(|l| l.href.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{LinkRef, MediaRef};
    use chrono::TimeZone;

    fn entry() -> RawEntry {
        RawEntry {
            published: Some("Wed, 14 Oct 2026 08:00:00 +0000".into()),
            link: Some("https://example.com/world/a".into()),
            title: Some("  Padded title \n".into()),
            summary: Some("Summary".into()),
            media: vec![],
            links: vec![],
        }
    }

    fn image_link(href: &str, kind: &str) -> LinkRef {
        LinkRef {
            href: Some(href.into()),
            kind: Some(kind.into()),
        }
    }

    #[test]
    fn normalizes_full_entry() {
        let item = normalize(&entry()).unwrap();
        assert_eq!(item.title, "Padded title");
        assert_eq!(item.link, "https://example.com/world/a");
        assert_eq!(
            item.published_at,
            Utc.with_ymd_and_hms(2026, 10, 14, 8, 0, 0).unwrap()
        );
        assert_eq!(item.description.as_deref(), Some("Summary"));
        assert!(item.image_url.is_none());
    }

    #[test]
    fn missing_title_becomes_empty() {
        let mut e = entry();
        e.title = None;
        assert_eq!(normalize(&e).unwrap().title, "");
    }

    #[test]
    fn empty_summary_is_omitted() {
        let mut e = entry();
        e.summary = Some(String::new());
        assert!(normalize(&e).unwrap().description.is_none());
    }

    #[test]
    fn rejects_missing_link() {
        let mut e = entry();
        e.link = None;
        assert_eq!(normalize(&e), Err(Rejection::MissingLink));
    }

    #[test]
    fn rejects_missing_and_bad_dates() {
        let mut e = entry();
        e.published = None;
        assert_eq!(normalize(&e), Err(Rejection::MissingDate));

        e.published = Some("last tuesday".into());
        assert_eq!(normalize(&e), Err(Rejection::UnparseableDate));
    }

    #[test]
    fn converts_offsets_to_utc() {
        let parsed = parse_published("Wed, 14 Oct 2026 10:00:00 +0200").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 10, 14, 8, 0, 0).unwrap());

        let parsed = parse_published("Wed, 14 Oct 2026 08:00:00 GMT").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 10, 14, 8, 0, 0).unwrap());
    }

    #[test]
    fn accepts_rfc3339_and_naive_forms() {
        let expected = Utc.with_ymd_and_hms(2026, 10, 14, 8, 0, 0).unwrap();
        assert_eq!(parse_published("2026-10-14T10:00:00+02:00"), Some(expected));
        assert_eq!(parse_published("2026-10-14 08:00:00"), Some(expected));
        assert_eq!(parse_published("2026-10-14T08:00:00"), Some(expected));
        assert_eq!(parse_published(""), None);
    }

    #[test]
    fn media_content_wins_over_image_links() {
        let mut e = entry();
        e.media = vec![MediaRef {
            url: Some("https://img/media.jpg".into()),
        }];
        e.links = vec![image_link("https://img/link.jpg", "image/jpeg")];
        assert_eq!(
            normalize(&e).unwrap().image_url.as_deref(),
            Some("https://img/media.jpg")
        );
    }

    #[test]
    fn falls_back_to_first_image_typed_link() {
        let mut e = entry();
        e.links = vec![
            image_link("https://cdn/audio.mp3", "audio/mpeg"),
            image_link("https://img/first.png", "image/png"),
            image_link("https://img/second.png", "image/png"),
        ];
        assert_eq!(
            normalize(&e).unwrap().image_url.as_deref(),
            Some("https://img/first.png")
        );
    }

    #[test]
    fn no_image_when_nothing_matches() {
        let mut e = entry();
        e.links = vec![image_link("https://cdn/a.mp3", "audio/mpeg")];
        assert!(normalize(&e).unwrap().image_url.is_none());
    }
}
