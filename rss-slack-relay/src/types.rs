use crate::config::ConfigError;
use crate::sources::ArticleSite;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use interfaces::defs::{FeedEntry, Tag};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub max_feed_size_mb: usize,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "rss-slack-relay/0.1".to_string(),
            timeout_seconds: 30,
            max_retries: 2,
            retry_delay_seconds: 2,
            max_feed_size_mb: 10,
            max_redirects: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchResult {
    pub url: String,
    pub success: bool,
    pub error: Option<String>,
    pub fetch_time: DateTime<Utc>,
    pub response_time_ms: u64,
    pub http_status: Option<u16>,
    pub content: Option<String>, // RSS/XML content
}

#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<FeedEntry>,
}

/// Entries of one site's feed for one tag.
#[derive(Debug, Clone)]
pub struct TaggedFeedSource {
    pub site: ArticleSite,
    pub tag: Tag,
    pub entries: Vec<FeedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFetchOutcome {
    Parsed { entries: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub struct FeedFetchReport {
    pub site: ArticleSite,
    pub tag: Tag,
    pub url: String,
    pub outcome: FeedFetchOutcome,
}

impl FeedFetchReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, FeedFetchOutcome::Failed { .. })
    }
}

/// A message as returned by `conversations.history`. Only the text is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryMessage {
    #[serde(default)]
    pub text: String,
}

impl HistoryMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Incoming-webhook body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub username: String,
    pub icon_emoji: String,
    pub text: String,
    pub unfurl_links: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub candidates: usize,
    pub skipped_previously_sent: usize,
    pub skipped_blocklisted: usize,
    pub published: usize,
    pub failed: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Slack {method} failed: {error}")]
    Slack { method: String, error: String },

    #[error("History fetch failed for channel {channel}: {source}")]
    History {
        channel: String,
        #[source]
        source: Box<RelayError>,
    },

    #[error("No destination configured for tag '{tag}'")]
    MissingDestination { tag: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, RelayError>;
