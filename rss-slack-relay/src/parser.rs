use crate::types::{FeedEntry, ParsedFeed, RelayError, Result};
use feed_rs::parser;
use tracing::debug;

/// Turns RSS 1.0/2.0 and Atom documents into [`FeedEntry`] lists.
///
/// Entries are kept in document order. Duplicates are left alone: dedup
/// happens later, against channel history only.
pub struct FeedParser;

impl FeedParser {
    pub fn parse_feed(content: &str) -> Result<ParsedFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content.as_bytes())
            .map_err(|e| RelayError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content.trim().to_string());
        let total = feed.entries.len();
        let entries: Vec<FeedEntry> = feed
            .entries
            .into_iter()
            .filter_map(Self::parse_entry)
            .collect();

        if entries.len() < total {
            debug!("Dropped {} entries without a link", total - entries.len());
        }

        Ok(ParsedFeed { title, entries })
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> Option<FeedEntry> {
        // Atom entries may also carry replies/self/edit links; the article is
        // the alternate one (or the one without a rel).
        let link = entry
            .links
            .iter()
            .find(|l| l.rel.as_deref().map_or(true, |rel| rel == "alternate"))
            .or_else(|| entry.links.first())?
            .href
            .trim()
            .to_string();
        if link.is_empty() {
            return None;
        }

        let title = entry
            .title
            .map(|t| t.content.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled".to_string());

        Some(FeedEntry { title, link })
    }
}
