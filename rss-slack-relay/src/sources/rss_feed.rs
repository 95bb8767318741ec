use crate::traits::FeedSource;
use crate::types::{ParsedFeed, RelayError, Result};
use crate::{FeedParser, Fetcher};
use async_trait::async_trait;
use tracing::{info, warn};
use url::Url;

/// Feed source backed by plain HTTP downloads.
pub struct RssFeedSource {
    fetcher: Fetcher,
}

impl RssFeedSource {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    async fn pull(&self, url: &Url) -> Result<ParsedFeed> {
        let fetch_result = self.fetcher.fetch_feed(url.as_str()).await;

        if !fetch_result.success {
            let error_msg = fetch_result.error.unwrap_or_else(|| "Fetch failed".to_string());
            return Err(RelayError::General(error_msg));
        }

        let content = match fetch_result.content {
            Some(content) => content,
            None => {
                warn!("No content returned for feed {}", url);
                return Ok(ParsedFeed::default());
            }
        };

        let parsed_feed = FeedParser::parse_feed(&content)?;
        info!(
            "Pulled {} entries from {} in {}ms",
            parsed_feed.entries.len(),
            url,
            fetch_result.response_time_ms
        );
        Ok(parsed_feed)
    }
}
