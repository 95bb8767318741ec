use crate::types::{FetchConfig, FetchResult, RelayError, Result};
use backoff::{backoff::Backoff, exponential::ExponentialBackoff, SystemClock};
use chrono::Utc;
use reqwest::{Client, RequestBuilder, Response};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// HTTP client shared by feed reads and Slack calls.
///
/// Reads go through [`Fetcher::send_with_retry`]; webhook posts use
/// [`Fetcher::client`] directly and are never retried.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn backoff(&self) -> ExponentialBackoff<SystemClock> {
        let delay = Duration::from_secs(self.config.retry_delay_seconds);
        ExponentialBackoff {
            current_interval: delay,
            initial_interval: delay,
            max_interval: delay * 32,
            multiplier: 2.0,
            // Attempts are bounded by max_retries.
            max_elapsed_time: None,
            ..Default::default()
        }
    }

    /// Sends the request built by `build`, retrying transport errors, 429 and
    /// 5xx responses up to `max_retries` times. Any other non-success status
    /// is returned as [`RelayError::Status`] straight away.
    pub async fn send_with_retry<F>(&self, url: &str, build: F) -> Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut backoff = self.backoff();
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match build(&self.client).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }
                    let err = RelayError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    };
                    let retryable = status.is_server_error()
                        || status == reqwest::StatusCode::TOO_MANY_REQUESTS;
                    if !retryable {
                        return Err(err);
                    }
                    last_error = Some(err);
                }
                Err(e) => {
                    last_error = Some(RelayError::Http(e));
                }
            }

            if attempt < self.config.max_retries {
                if let Some(delay) = backoff.next_backoff() {
                    warn!("Attempt {} failed for {}, retrying in {:?}", attempt + 1, url, delay);
                    tokio::time::sleep(delay).await;
                    continue;
                }
            }
            break;
        }

        error!("Giving up on {} after {} attempt(s)", url, self.config.max_retries + 1);
        Err(last_error
            .unwrap_or_else(|| RelayError::General(format!("Request to {} failed", url))))
    }

    /// Downloads a feed document. Failures are reported in the result rather
    /// than returned as errors.
    pub async fn fetch_feed(&self, url: &str) -> FetchResult {
        let start_time = Instant::now();
        let fetch_time = Utc::now();

        debug!("Fetching feed: {}", url);

        let failed = |error: String, http_status: Option<u16>| FetchResult {
            url: url.to_string(),
            success: false,
            error: Some(error),
            fetch_time,
            response_time_ms: start_time.elapsed().as_millis() as u64,
            http_status,
            content: None,
        };

        let response = match self.send_with_retry(url, |client| client.get(url)).await {
            Ok(response) => response,
            Err(RelayError::Status { status, .. }) => {
                return failed(format!("HTTP {}", status), Some(status));
            }
            Err(e) => return failed(e.to_string(), None),
        };
        let status = response.status().as_u16();

        if let Some(content_length) = response.content_length() {
            let size_mb = content_length as usize / (1024 * 1024);
            if size_mb > self.config.max_feed_size_mb {
                return failed(format!("Feed too large: {}MB", size_mb), Some(status));
            }
        }

        match response.text().await {
            Ok(content) => {
                info!("Fetched feed: {} ({} bytes)", url, content.len());
                FetchResult {
                    url: url.to_string(),
                    success: true,
                    error: None,
                    fetch_time,
                    response_time_ms: start_time.elapsed().as_millis() as u64,
                    http_status: Some(status),
                    content: Some(content),
                }
            }
            Err(e) => failed(e.to_string(), Some(status)),
        }
    }
}
