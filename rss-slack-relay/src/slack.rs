use crate::traits::ChatPlatform;
use crate::types::{HistoryMessage, MessagePayload, RelayError, Result};
use crate::Fetcher;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, info};

pub const SLACK_API_BASE: &str = "https://slack.com/api";

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    ok: bool,
    #[serde(default)]
    messages: Vec<HistoryMessage>,
    error: Option<String>,
}

/// Slack Web API for history, incoming webhooks for posting.
pub struct SlackClient {
    fetcher: Fetcher,
    token: String,
    api_base: String,
}

impl SlackClient {
    pub fn new(fetcher: Fetcher, token: impl Into<String>) -> Self {
        Self {
            fetcher,
            token: token.into(),
            api_base: SLACK_API_BASE.to_string(),
        }
    }

    /// Points Web API calls somewhere other than slack.com.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[async_trait]
impl ChatPlatform for SlackClient {
    async fn channel_history(&self, channel_id: &str, limit: u32) -> Result<Vec<HistoryMessage>> {
        let url = format!("{}/conversations.history", self.api_base);
        let limit = limit.to_string();
        debug!(target: "web_request", "Reading history of {} (limit {})", channel_id, limit);

        let response = self
            .fetcher
            .send_with_retry(&url, |client| {
                client
                    .get(&url)
                    .bearer_auth(&self.token)
                    .query(&[("channel", channel_id), ("limit", limit.as_str())])
            })
            .await?;

        let body: HistoryResponse = response.json().await?;
        if !body.ok {
            return Err(RelayError::Slack {
                method: "conversations.history".to_string(),
                error: body.error.unwrap_or_else(|| "unknown_error".to_string()),
            });
        }

        Ok(body.messages)
    }

    async fn post_message(&self, destination: &str, payload: &MessagePayload) -> Result<()> {
        debug!(target: "web_request", "Posting to webhook with payload: {:?}", payload);

        let response = self.fetcher.client().post(destination).json(payload).send().await?;
        let status = response.status();
        if status.is_success() {
            info!(" ** Slack message posted for {}", payload.icon_emoji);
            return Ok(());
        }

        let error_text = response.text().await.unwrap_or_default();
        error!(" !! Error sending Slack message: {} {}", status, error_text);
        Err(RelayError::Status {
            url: redact_webhook(destination),
            status: status.as_u16(),
        })
    }
}

// Webhook URLs carry their credential in the path.
fn redact_webhook(destination: &str) -> String {
    match url::Url::parse(destination) {
        Ok(url) => format!("{}://{}/…", url.scheme(), url.host_str().unwrap_or("")),
        Err(_) => "<invalid webhook url>".to_string(),
    }
}
