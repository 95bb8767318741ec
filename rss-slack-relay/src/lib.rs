pub mod aggregator;
pub mod config;
pub mod fetcher;
pub mod filter;
pub mod history;
pub mod parser;
pub mod publisher;
pub mod relay;
pub mod slack;
pub mod sources;
pub mod traits;
pub mod types;

pub use aggregator::{Aggregation, FeedAggregator};
pub use config::{Config, ConfigError, HistoryFailurePolicy};
pub use fetcher::Fetcher;
pub use filter::{ArticleFilter, Decision, Rejection, SendDecision};
pub use history::PreviousLinks;
pub use parser::FeedParser;
pub use publisher::Publisher;
pub use relay::Relay;
pub use slack::SlackClient;
pub use sources::{ArticleSite, RssFeedSource};
pub use traits::{ChatPlatform, FeedSource};
pub use types::*;
