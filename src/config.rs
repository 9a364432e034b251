//! TOML configuration.
//!
//! Every field has a default, so an absent file (or an empty one) gives the
//! stock setup: six Guardian feeds, unfiltered, merged into `merged.xml`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::feed::ChannelMeta;
use crate::merge::{FeedSource, FilterMode, LinkFilter, MergeSettings};

const DEFAULT_FEEDS: &[&str] = &[
    "https://feeds.guardian.co.uk/theguardian/environment/rss",
    "https://www.theguardian.com/environment/climate-crisis/rss",
    "https://www.theguardian.com/news/series/the-long-read/rss",
    "https://www.theguardian.com/uk/commentisfree/rss",
    "https://www.theguardian.com/international/rss",
    "https://feeds.guardian.co.uk/theguardian/world/rss",
];

/// One `[[feeds]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedConfig {
    pub url: String,
    #[serde(default)]
    pub filter_mode: FilterMode,
    #[serde(default)]
    pub path_patterns: Vec<String>,
}

impl FeedConfig {
    fn unfiltered(url: &str) -> Self {
        Self {
            url: url.to_string(),
            filter_mode: FilterMode::None,
            path_patterns: Vec::new(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::Invalid("feed url must not be empty".into()));
        }
        match (self.filter_mode, self.path_patterns.is_empty()) {
            (FilterMode::Allowlist | FilterMode::Blocklist, true) => Err(ConfigError::Invalid(
                format!("{}: filter_mode needs at least one path pattern", self.url),
            )),
            (FilterMode::None, false) => Err(ConfigError::Invalid(format!(
                "{}: path_patterns given but filter_mode is none",
                self.url
            ))),
            _ => Ok(()),
        }
    }

    pub fn to_source(&self) -> FeedSource {
        FeedSource {
            url: self.url.clone(),
            filter: LinkFilter::new(self.filter_mode, &self.path_patterns),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    #[serde(default = "default_freshness_window_hours")]
    pub freshness_window_hours: u32,
    #[serde(default)]
    pub channel: ChannelMeta,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "default_feeds")]
    pub feeds: Vec<FeedConfig>,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("merged.xml")
}

fn default_max_items() -> usize {
    1000
}

fn default_freshness_window_hours() -> u32 {
    48
}

fn default_feeds() -> Vec<FeedConfig> {
    DEFAULT_FEEDS.iter().map(|url| FeedConfig::unfiltered(url)).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            max_items: default_max_items(),
            freshness_window_hours: default_freshness_window_hours(),
            channel: ChannelMeta::default(),
            logging: LoggingConfig::default(),
            feeds: default_feeds(),
        }
    }
}

impl Config {
    /// Load and validate the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_items == 0 {
            return Err(ConfigError::Invalid("max_items must be at least 1".into()));
        }
        self.feeds.iter().try_for_each(FeedConfig::validate)
    }

    pub fn sources(&self) -> Vec<FeedSource> {
        self.feeds.iter().map(FeedConfig::to_source).collect()
    }

    pub fn merge_settings(&self) -> MergeSettings {
        MergeSettings {
            max_items: self.max_items,
            freshness_window: Duration::hours(i64::from(self.freshness_window_hours)),
        }
    }
}
