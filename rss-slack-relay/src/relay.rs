use crate::aggregator::FeedAggregator;
use crate::config::Config;
use crate::publisher::Publisher;
use crate::slack::SlackClient;
use crate::sources::RssFeedSource;
use crate::traits::{ChatPlatform, FeedSource};
use crate::types::{PublishReport, Result, Tag};
use crate::Fetcher;
use std::sync::Arc;
use tracing::{info, warn};

/// One aggregation + publish pass.
pub struct Relay {
    tags: Vec<Tag>,
    aggregator: FeedAggregator,
    publisher: Publisher,
}

impl Relay {
    pub fn new(
        config: &Config,
        feed_source: Arc<dyn FeedSource>,
        platform: Arc<dyn ChatPlatform>,
    ) -> Self {
        Self {
            tags: config.tags.clone(),
            aggregator: FeedAggregator::new(feed_source),
            publisher: Publisher::new(config, platform),
        }
    }

    /// Wires the HTTP feed source and the Slack client from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = Fetcher::new(config.fetch.clone())?;
        let feed_source = Arc::new(RssFeedSource::new(fetcher.clone()));
        let platform = Arc::new(SlackClient::new(fetcher, config.slack_token.clone()));
        Ok(Self::new(config, feed_source, platform))
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.publisher = self.publisher.with_dry_run(dry_run);
        self
    }

    pub async fn run_once(&self) -> Result<PublishReport> {
        info!("Collecting articles for tags: {}", self.tags.join(", "));
        let aggregation = self.aggregator.aggregate(&self.tags).await;

        for report in aggregation.failures() {
            warn!("No articles from {} for '{}' ({})", report.site, report.tag, report.url);
        }

        self.publisher.send_article(&aggregation.feeds).await
    }
}
