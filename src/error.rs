//! Error types for the fatal failure modes of a run.
//!
//! Entry-level problems are never errors (see [`crate::merge::Rejection`]);
//! only configuration and persistence can abort a run.

use std::path::PathBuf;

use thiserror::Error;

/// Reading or writing the merged feed file failed.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not a valid RSS document: {source}", .path.display())]
    Parse { path: PathBuf, source: rss::Error },

    #[error("failed to serialize feed: {0}")]
    Serialize(rss::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The configuration file is missing, malformed or inconsistent.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("configuration error: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_display() {
        let err = ConfigError::Invalid("max_items must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: max_items must be at least 1"
        );
    }

    #[test]
    fn write_error_names_path() {
        let err = StoreError::Write {
            path: PathBuf::from("out/merged.xml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to write out/merged.xml: denied");
    }
}
