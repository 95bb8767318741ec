use serde::{Deserialize, Serialize};

/// Topic keyword. Drives both the feed queries and destination routing.
pub type Tag = String;

/// One article taken from a syndication feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
}

impl FeedEntry {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}
