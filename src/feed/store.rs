//! Reading and writing the merged feed file.
//!
//! The file is read once at the start of a run and overwritten once at the
//! end.  Writes go to a temporary file next to the target and are renamed
//! into place, so a failed run leaves the previous file untouched.  There is
//! no locking: two concurrent runs against the same path race.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::{ChannelMeta, FeedDocument};
use crate::error::StoreError;

/// Load the document at `path`, or start an empty one if the file does not
/// exist yet.
pub fn load_or_default(path: &Path, meta: &ChannelMeta) -> Result<FeedDocument, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no existing feed, starting empty");
            return Ok(FeedDocument::empty(meta.clone()));
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let channel =
        rss::Channel::read_from(BufReader::new(file)).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let (doc, skipped) = FeedDocument::from_channel(&channel);
    if skipped > 0 {
        warn!(
            path = %path.display(),
            skipped,
            "dropped persisted items without a link or a parseable pubDate"
        );
    }
    debug!(path = %path.display(), items = doc.items.len(), "loaded existing feed");
    Ok(doc)
}

/// Serialize `doc` and atomically replace the file at `path`.
pub fn save(path: &Path, doc: &FeedDocument) -> Result<(), StoreError> {
    let write_err = |source: io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
    {
        let writer = BufWriter::new(tmp.as_file_mut());
        let mut writer = doc
            .to_channel()
            .pretty_write_to(writer, b' ', 2)
            .map_err(StoreError::Serialize)?;
        writer.write_all(b"\n").map_err(write_err)?;
        writer.flush().map_err(write_err)?;
    }

    // Keep the permissions of the file being replaced.
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    debug!(path = %path.display(), items = doc.items.len(), "wrote feed");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::make_item;
    use chrono::{TimeZone, Utc};

    #[test]
    fn missing_file_gives_empty_document_with_default_meta() {
        let dir = tempfile::tempdir().unwrap();
        let doc = load_or_default(&dir.path().join("merged.xml"), &ChannelMeta::default()).unwrap();

        assert!(doc.items.is_empty());
        assert_eq!(doc.meta, ChannelMeta::default());
    }

    #[test]
    fn save_then_load_preserves_items_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merged.xml");

        let mut doc = FeedDocument::empty(ChannelMeta::default());
        doc.items.push(make_item(
            "https://example.com/b",
            Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap(),
        ));
        doc.items.push(make_item(
            "https://example.com/a",
            Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap(),
        ));

        save(&path, &doc).unwrap();
        let loaded = load_or_default(&path, &ChannelMeta::default()).unwrap();

        assert_eq!(loaded, doc);
    }

    #[test]
    fn saved_file_is_pretty_printed_with_declaration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merged.xml");

        let mut doc = FeedDocument::empty(ChannelMeta::default());
        doc.items.push(make_item(
            "https://example.com/a",
            Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap(),
        ));
        save(&path, &doc).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\""));
        assert!(text.contains("xmlns:media=\"http://search.yahoo.com/mrss/\""));
        assert!(text.contains("<pubDate>Mon, 02 Jan 2006 15:04:05 +0000</pubDate>"));
        assert!(text.contains("\n  <channel>"), "expected indented output");
    }

    #[test]
    fn existing_meta_is_kept_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merged.xml");

        let meta = ChannelMeta {
            title: "Custom".into(),
            link: "https://example.com".into(),
            description: "Mine".into(),
        };
        save(&path, &FeedDocument::empty(meta.clone())).unwrap();

        let loaded = load_or_default(&path, &ChannelMeta::default()).unwrap();
        assert_eq!(loaded.meta, meta);
    }

    #[test]
    fn unparseable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merged.xml");
        fs::write(&path, "this is not xml").unwrap();

        let err = load_or_default(&path, &ChannelMeta::default()).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn save_into_missing_directory_fails_without_creating_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("merged.xml");

        let err = save(&path, &FeedDocument::empty(ChannelMeta::default())).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert!(!path.exists());
    }
}
