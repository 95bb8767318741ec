use crate::types::{FetchConfig, Tag};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable holding the Slack bearer token used for history reads.
pub const TOKEN_ENV: &str = "SLACK_TOKEN";

/// Largest page `conversations.history` returns; Slack caps bigger limits to it.
pub const MAX_HISTORY_LIMIT: u32 = 1000;

/// What to do when a channel's history cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFailurePolicy {
    /// Stop before publishing anything. Nothing gets posted twice.
    #[default]
    Abort,
    /// Leave the channel out of dedup and keep going. Its articles may be reposted.
    Skip,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub username: String,
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub slack_channel_ids: Vec<String>,
    #[serde(default)]
    pub slack_url_dict: HashMap<Tag, String>,
    #[serde(default)]
    pub not_want_to_send_links: Vec<String>,
    /// Per-tag icon override. Tags without one use the tag itself.
    #[serde(default)]
    pub icon_emoji_dict: HashMap<Tag, String>,
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
    #[serde(default)]
    pub history_failure: HistoryFailurePolicy,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(skip)]
    pub slack_token: String,
}

fn default_history_limit() -> u32 {
    MAX_HISTORY_LIMIT
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Environment variable SLACK_TOKEN is not set")]
    MissingToken,

    #[error("No tags configured")]
    NoTags,

    #[error("No slack_url_dict entry for tag(s): {}", tags.join(", "))]
    MissingDestinations { tags: Vec<String> },

    #[error("Destination for tag '{tag}' is not a valid URL: {url}")]
    InvalidDestination { tag: String, url: String },

    #[error("history_limit must be between 1 and 1000, got {0}")]
    InvalidHistoryLimit(u32),
}

impl Config {
    /// Reads the config file, injects the token from the environment and
    /// validates the result. No network access happens here.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let token = env::var(TOKEN_ENV).unwrap_or_default();
        if token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config file {} ({} bytes)", path.display(), content.len());

        let config = Self::from_toml_str(&content)?.with_token(token);
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.slack_token = token.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slack_token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if self.tags.is_empty() {
            return Err(ConfigError::NoTags);
        }
        if self.history_limit == 0 || self.history_limit > MAX_HISTORY_LIMIT {
            return Err(ConfigError::InvalidHistoryLimit(self.history_limit));
        }

        let mut missing: Vec<String> = Vec::new();
        for tag in &self.tags {
            match self.slack_url_dict.get(tag) {
                None => {
                    if !missing.contains(tag) {
                        missing.push(tag.clone());
                    }
                }
                Some(url) => {
                    if url::Url::parse(url).is_err() {
                        return Err(ConfigError::InvalidDestination {
                            tag: tag.clone(),
                            url: url.clone(),
                        });
                    }
                }
            }
        }
        if !missing.is_empty() {
            return Err(ConfigError::MissingDestinations { tags: missing });
        }

        if self.slack_channel_ids.is_empty() {
            warn!("No slack_channel_ids configured; previously posted articles cannot be detected");
        }
        if self.not_want_to_send_links.iter().any(|pattern| pattern.is_empty()) {
            warn!("not_want_to_send_links contains an empty pattern; it matches every link");
        }

        Ok(())
    }

    pub fn icon_emoji_for(&self, tag: &str) -> String {
        self.icon_emoji_dict
            .get(tag)
            .cloned()
            .unwrap_or_else(|| tag.to_string())
    }
}
