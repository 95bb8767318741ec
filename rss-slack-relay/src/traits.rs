use crate::types::{HistoryMessage, MessagePayload, ParsedFeed, Result};
use async_trait::async_trait;
use url::Url;

/// Something that can download and parse a syndication feed.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn pull(&self, url: &Url) -> Result<ParsedFeed>;
}

/// The chat platform: history reads and message posts.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Up to `limit` most recent messages of `channel_id`, newest first.
    async fn channel_history(&self, channel_id: &str, limit: u32) -> Result<Vec<HistoryMessage>>;

    /// Posts one message to `destination`. No retry.
    async fn post_message(&self, destination: &str, payload: &MessagePayload) -> Result<()>;
}
