//! Runtime configuration.
//!
//! Every value has a built-in default, so the tool runs without any file on
//! disk. A TOML file passed with `--config` overrides individual fields;
//! missing fields keep their defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Hacker News Firebase API (no trailing slash)
    pub api_base_url: String,

    /// Base URL used to build comment permalinks
    pub item_link_base: String,

    /// How many of the top stories are scanned per run (default: 100)
    pub top_stories_limit: usize,

    /// Top-level comments considered per story in poll mode (default: 10)
    pub comments_per_story: usize,

    /// HTTP request timeout in seconds (default: 30)
    pub request_timeout_secs: u64,

    /// User agent sent with every API request
    pub user_agent: String,

    /// Seconds between two poll runs (default: 3600 = 1 hour)
    pub poll_interval_secs: u64,

    /// Feed file rewritten by every poll run
    pub poll_output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://hacker-news.firebaseio.com/v0".to_string(),
            item_link_base: "https://news.ycombinator.com".to_string(),
            top_stories_limit: 100,
            comments_per_story: 10,
            request_timeout_secs: 30,
            user_agent: concat!("hn-gems/", env!("CARGO_PKG_VERSION")).to_string(),
            poll_interval_secs: 3600,
            poll_output: PathBuf::from("hn_top_comments_rss.xml"),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Missing fields in the file use default values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = Self::from_toml(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an optional path, falling back to defaults when none is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load_from(p),
            None => Ok(Self::default()),
        }
    }

    fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(content)?;
        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        config.item_link_base = config.item_link_base.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Both base URLs must be absolute.
    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("api_base_url", &self.api_base_url),
            ("item_link_base", &self.item_link_base),
        ] {
            Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
                field,
                value: value.clone(),
                source: e,
            })?;
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid URL for {field} ({value}): {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        source: url::ParseError,
    },
}
