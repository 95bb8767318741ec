use crate::sources::ArticleSite;
use crate::traits::FeedSource;
use crate::types::{FeedFetchOutcome, FeedFetchReport, Tag, TaggedFeedSource};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of one aggregation pass.
#[derive(Debug, Default)]
pub struct Aggregation {
    /// Three feeds per tag, tags in configuration order, sites in
    /// [`ArticleSite::ALL`] order.
    pub feeds: Vec<TaggedFeedSource>,
    pub reports: Vec<FeedFetchReport>,
}

impl Aggregation {
    pub fn entry_count(&self) -> usize {
        self.feeds.iter().map(|feed| feed.entries.len()).sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FeedFetchReport> {
        self.reports.iter().filter(|report| report.is_failure())
    }
}

pub struct FeedAggregator {
    source: Arc<dyn FeedSource>,
}

impl FeedAggregator {
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        Self { source }
    }

    /// Queries every site for every tag.
    ///
    /// Requests run concurrently; the output keeps configuration order. A
    /// source that fails contributes an empty feed and a failed report.
    pub async fn aggregate(&self, tags: &[Tag]) -> Aggregation {
        let jobs = tags
            .iter()
            .flat_map(|tag| ArticleSite::ALL.into_iter().map(move |site| (tag, site)))
            .map(|(tag, site)| self.pull_site(tag, site));

        let (feeds, reports): (Vec<_>, Vec<_>) = join_all(jobs).await.into_iter().unzip();
        let aggregation = Aggregation { feeds, reports };

        let failed = aggregation.failures().count();
        info!(
            "Aggregated {} entries from {} feeds ({} failed) for {} tags",
            aggregation.entry_count(),
            aggregation.feeds.len(),
            failed,
            tags.len()
        );
        aggregation
    }

    async fn pull_site(&self, tag: &Tag, site: ArticleSite) -> (TaggedFeedSource, FeedFetchReport) {
        let (url, result) = match site.feed_url(tag) {
            Ok(url) => {
                let result = self.source.pull(&url).await;
                (url.to_string(), result)
            }
            Err(e) => (String::new(), Err(e)),
        };

        let (entries, outcome) = match result {
            Ok(parsed) => {
                let entries = parsed.entries;
                let outcome = FeedFetchOutcome::Parsed { entries: entries.len() };
                (entries, outcome)
            }
            Err(e) => {
                warn!("Feed {} for tag '{}' failed, treating as empty: {}", site, tag, e);
                (Vec::new(), FeedFetchOutcome::Failed { reason: e.to_string() })
            }
        };

        let feed = TaggedFeedSource {
            site,
            tag: tag.clone(),
            entries,
        };
        let report = FeedFetchReport {
            site,
            tag: tag.clone(),
            url,
            outcome,
        };
        (feed, report)
    }
}
