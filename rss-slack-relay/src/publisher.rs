use crate::config::{Config, HistoryFailurePolicy};
use crate::filter::{ArticleFilter, Decision, Rejection, SendDecision};
use crate::history::{collect_previous_links, PreviousLinks};
use crate::traits::ChatPlatform;
use crate::types::{MessagePayload, PublishReport, RelayError, Result, Tag, TaggedFeedSource};
use interfaces::ArticleMessage;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Entries chosen for sending plus the counts of those left out.
#[derive(Debug, Default)]
pub struct Selection<'a> {
    pub accepted: Vec<SendDecision<'a>>,
    pub candidates: usize,
    pub previously_sent: usize,
    pub blocklisted: usize,
}

pub struct Publisher {
    platform: Arc<dyn ChatPlatform>,
    username: String,
    channel_ids: Vec<String>,
    destinations: HashMap<Tag, String>,
    icon_emojis: HashMap<Tag, String>,
    filter: ArticleFilter,
    history_limit: u32,
    history_failure: HistoryFailurePolicy,
    dry_run: bool,
}

impl Publisher {
    pub fn new(config: &Config, platform: Arc<dyn ChatPlatform>) -> Self {
        let icon_emojis = config
            .tags
            .iter()
            .map(|tag| (tag.clone(), config.icon_emoji_for(tag)))
            .collect();

        Self {
            platform,
            username: config.username.clone(),
            channel_ids: config.slack_channel_ids.clone(),
            destinations: config.slack_url_dict.clone(),
            icon_emojis,
            filter: ArticleFilter::new(config.not_want_to_send_links.clone()),
            history_limit: config.history_limit,
            history_failure: config.history_failure,
            dry_run: false,
        }
    }

    /// Format and log messages instead of posting them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// History, then filter, then format, then publish.
    ///
    /// Nothing is posted if history cannot be read (under the abort policy)
    /// or if an accepted entry's tag has no destination. A failed post is
    /// logged and counted, and the remaining entries are still sent.
    pub async fn send_article(&self, feeds: &[TaggedFeedSource]) -> Result<PublishReport> {
        let previous = self.search_post_links().await?;
        let selection = self.select(feeds, &previous);

        let outgoing = selection
            .accepted
            .iter()
            .map(|decision| {
                let destination = self.destination_for(decision.tag)?;
                Ok((decision, destination, self.payload_for(decision)))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut report = PublishReport {
            candidates: selection.candidates,
            skipped_previously_sent: selection.previously_sent,
            skipped_blocklisted: selection.blocklisted,
            ..Default::default()
        };

        for (decision, destination, payload) in outgoing {
            if self.dry_run {
                info!("[dry-run] Would post to '{}':\n{}", decision.tag, payload.text);
                continue;
            }
            match self.platform.post_message(destination, &payload).await {
                Ok(()) => report.published += 1,
                Err(e) => {
                    error!(
                        "Failed to publish {} for tag '{}': {}",
                        decision.entry.link, decision.tag, e
                    );
                    report.failed += 1;
                }
            }
        }

        info!(
            "Publish finished: {} candidates, {} already posted, {} blocklisted, \
             {} published, {} failed",
            report.candidates,
            report.skipped_previously_sent,
            report.skipped_blocklisted,
            report.published,
            report.failed
        );
        Ok(report)
    }

    /// Links already posted to any of the configured channels.
    pub async fn search_post_links(&self) -> Result<PreviousLinks> {
        collect_previous_links(
            self.platform.as_ref(),
            &self.channel_ids,
            self.history_limit,
            self.history_failure,
        )
        .await
    }

    /// Filters every entry of `feeds`, keeping feed order.
    pub fn select<'a>(
        &self,
        feeds: &'a [TaggedFeedSource],
        previous: &PreviousLinks,
    ) -> Selection<'a> {
        let mut selection = Selection::default();

        for feed in feeds {
            for entry in &feed.entries {
                selection.candidates += 1;
                match self.filter.decide(entry, previous) {
                    Decision::Send => selection.accepted.push(SendDecision {
                        entry,
                        tag: &feed.tag,
                    }),
                    Decision::Skip(Rejection::PreviouslySent) => {
                        debug!("Already posted: {}", entry.link);
                        selection.previously_sent += 1;
                    }
                    Decision::Skip(Rejection::Blocklisted { pattern }) => {
                        debug!("Blocklisted by '{}': {}", pattern, entry.link);
                        selection.blocklisted += 1;
                    }
                }
            }
        }

        selection
    }

    pub fn destination_for(&self, tag: &str) -> Result<&str> {
        self.destinations
            .get(tag)
            .map(String::as_str)
            .ok_or_else(|| RelayError::MissingDestination { tag: tag.to_string() })
    }

    pub fn payload_for(&self, decision: &SendDecision<'_>) -> MessagePayload {
        let icon_emoji = self
            .icon_emojis
            .get(decision.tag)
            .cloned()
            .unwrap_or_else(|| decision.tag.clone());

        MessagePayload {
            username: self.username.clone(),
            icon_emoji,
            text: ArticleMessage::new(&decision.entry.title, &decision.entry.link).render(),
            unfurl_links: true,
        }
    }
}
