#![allow(dead_code)]

use async_trait::async_trait;
use interfaces::message::{autolink_form, extract_link};
use rss_slack_relay::{
    ChatPlatform, Config, FeedEntry, FeedSource, HistoryMessage, MessagePayload, ParsedFeed,
    RelayError, Result,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, Once};
use url::Url;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub const DOCKER_HOOK: &str = "https://hooks.slack.com/services/T000/B000/docker";
pub const RUST_HOOK: &str = "https://hooks.slack.com/services/T000/B000/rust";

pub fn sample_config() -> Config {
    let toml = format!(
        r#"
username = "article-bot"
tags = ["docker", "rust"]
slack_channel_ids = ["C_DOCKER", "C_RUST"]
not_want_to_send_links = ["spam.example.com"]

[slack_url_dict]
docker = "{}"
rust = "{}"
"#,
        DOCKER_HOOK, RUST_HOOK
    );
    Config::from_toml_str(&toml)
        .expect("sample config parses")
        .with_token("xoxb-test")
}

/// Feed source answering from a fixed URL -> result table.
#[derive(Default)]
pub struct FakeFeedSource {
    feeds: HashMap<String, std::result::Result<Vec<FeedEntry>, String>>,
    pub requested: Mutex<Vec<String>>,
}

impl FakeFeedSource {
    pub fn with_feed(mut self, url: &str, entries: Vec<FeedEntry>) -> Self {
        self.feeds.insert(url.to_string(), Ok(entries));
        self
    }

    pub fn with_failure(mut self, url: &str, reason: &str) -> Self {
        self.feeds.insert(url.to_string(), Err(reason.to_string()));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedSource for FakeFeedSource {
    async fn pull(&self, url: &Url) -> Result<ParsedFeed> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.feeds.get(url.as_str()) {
            Some(Ok(entries)) => Ok(ParsedFeed {
                title: None,
                entries: entries.clone(),
            }),
            Some(Err(reason)) => Err(RelayError::General(reason.clone())),
            None => Ok(ParsedFeed::default()),
        }
    }
}

/// In-memory Slack. Posting to a webhook appends the message to the channel
/// behind it the way Slack stores it: URLs auto-linked, `&` escaped.
#[derive(Default)]
pub struct FakeSlack {
    history: Mutex<HashMap<String, Vec<HistoryMessage>>>,
    webhook_channels: HashMap<String, String>,
    failing_channels: HashSet<String>,
    failing_destinations: HashSet<String>,
    pub posted: Mutex<Vec<(String, MessagePayload)>>,
    pub history_calls: Mutex<Vec<(String, u32)>>,
}

impl FakeSlack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_webhook(mut self, destination: &str, channel: &str) -> Self {
        self.webhook_channels
            .insert(destination.to_string(), channel.to_string());
        self
    }

    pub fn with_history(self, channel: &str, texts: &[&str]) -> Self {
        self.history.lock().unwrap().insert(
            channel.to_string(),
            texts.iter().map(|text| HistoryMessage::new(*text)).collect(),
        );
        self
    }

    pub fn with_failing_channel(mut self, channel: &str) -> Self {
        self.failing_channels.insert(channel.to_string());
        self
    }

    pub fn with_failing_destination(mut self, destination: &str) -> Self {
        self.failing_destinations.insert(destination.to_string());
        self
    }

    pub fn posted(&self) -> Vec<(String, MessagePayload)> {
        self.posted.lock().unwrap().clone()
    }

    pub fn posted_links(&self) -> Vec<String> {
        self.posted()
            .iter()
            .filter_map(|(_, payload)| extract_link(&payload.text))
            .collect()
    }

    pub fn history_calls(&self) -> Vec<(String, u32)> {
        self.history_calls.lock().unwrap().clone()
    }
}

/// What Slack keeps for a message we posted.
pub fn as_stored(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.starts_with("http://") || line.starts_with("https://") {
                autolink_form(&line.replace('&', "&amp;"))
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl ChatPlatform for FakeSlack {
    async fn channel_history(&self, channel_id: &str, limit: u32) -> Result<Vec<HistoryMessage>> {
        self.history_calls
            .lock()
            .unwrap()
            .push((channel_id.to_string(), limit));
        if self.failing_channels.contains(channel_id) {
            return Err(RelayError::Slack {
                method: "conversations.history".to_string(),
                error: "channel_not_found".to_string(),
            });
        }
        let history = self.history.lock().unwrap();
        let messages = history.get(channel_id).cloned().unwrap_or_default();
        // Newest first, as Slack returns them.
        Ok(messages.into_iter().rev().take(limit as usize).collect())
    }

    async fn post_message(&self, destination: &str, payload: &MessagePayload) -> Result<()> {
        if self.failing_destinations.contains(destination) {
            return Err(RelayError::Status {
                url: destination.to_string(),
                status: 500,
            });
        }
        self.posted
            .lock()
            .unwrap()
            .push((destination.to_string(), payload.clone()));
        if let Some(channel) = self.webhook_channels.get(destination) {
            self.history
                .lock()
                .unwrap()
                .entry(channel.clone())
                .or_default()
                .push(HistoryMessage::new(as_stored(&payload.text)));
        }
        Ok(())
    }
}
