use crate::config::HistoryFailurePolicy;
use crate::traits::ChatPlatform;
use crate::types::{HistoryMessage, RelayError, Result};
use futures::future::join_all;
use interfaces::message::{autolink_form, extract_link};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Links found in channel history, in the form Slack stores them (`<url>`).
///
/// Links from every scanned channel share one set: an article posted to any
/// channel is not posted again to any other.
#[derive(Debug, Clone, Default)]
pub struct PreviousLinks {
    links: HashSet<String>,
}

impl PreviousLinks {
    /// True when `link` was already posted.
    pub fn contains_link(&self, link: &str) -> bool {
        self.links.contains(&autolink_form(link))
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl FromIterator<String> for PreviousLinks {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            links: iter.into_iter().collect(),
        }
    }
}

impl Extend<String> for PreviousLinks {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.links.extend(iter);
    }
}

/// Links of every message that follows the article template, in message order.
pub fn extract_previous_links(messages: &[HistoryMessage]) -> Vec<String> {
    messages
        .iter()
        .filter_map(|message| extract_link(&message.text))
        .collect()
}

/// Reads recent history of every channel and collects the links found.
///
/// Channels are fetched concurrently. With [`HistoryFailurePolicy::Abort`]
/// the first failing channel (in configuration order) is returned as an
/// error; with [`HistoryFailurePolicy::Skip`] it is logged and left out.
pub async fn collect_previous_links(
    platform: &dyn ChatPlatform,
    channel_ids: &[String],
    limit: u32,
    policy: HistoryFailurePolicy,
) -> Result<PreviousLinks> {
    let fetches = channel_ids
        .iter()
        .map(|channel| platform.channel_history(channel, limit));
    let results = join_all(fetches).await;

    let mut previous = PreviousLinks::default();
    for (channel, result) in channel_ids.iter().zip(results) {
        match result {
            Ok(messages) => {
                let links = extract_previous_links(&messages);
                debug!(
                    "Channel {}: {} links in {} messages",
                    channel,
                    links.len(),
                    messages.len()
                );
                previous.extend(links);
            }
            Err(e) => match policy {
                HistoryFailurePolicy::Abort => {
                    return Err(RelayError::History {
                        channel: channel.clone(),
                        source: Box::new(e),
                    });
                }
                HistoryFailurePolicy::Skip => {
                    warn!(
                        "History of channel {} unavailable, its posts will not be deduplicated: {}",
                        channel, e
                    );
                }
            },
        }
    }

    info!(
        "Found {} previously posted links in {} channels",
        previous.len(),
        channel_ids.len()
    );
    Ok(previous)
}
