pub mod rss_feed;
pub mod site;

pub use rss_feed::RssFeedSource;
pub use site::ArticleSite;
