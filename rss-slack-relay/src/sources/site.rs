use crate::types::{RelayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// The article sites queried for every tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleSite {
    Qiita,
    Hatena,
    Zenn,
}

impl ArticleSite {
    /// Query order within a tag.
    pub const ALL: [ArticleSite; 3] = [ArticleSite::Qiita, ArticleSite::Hatena, ArticleSite::Zenn];

    pub fn name(&self) -> &'static str {
        match self {
            ArticleSite::Qiita => "qiita",
            ArticleSite::Hatena => "hatena",
            ArticleSite::Zenn => "zenn",
        }
    }

    /// Feed URL for `tag`, with the tag percent-encoded.
    pub fn feed_url(&self, tag: &str) -> Result<Url> {
        match self {
            ArticleSite::Qiita => path_feed("https://qiita.com/tags", tag),
            ArticleSite::Zenn => path_feed("https://zenn.dev/topics", tag),
            ArticleSite::Hatena => {
                let mut url = Url::parse("https://b.hatena.ne.jp/search/tag")?;
                url.query_pairs_mut()
                    .append_pair("q", tag)
                    .append_pair("mode", "rss")
                    .append_pair("users", "1");
                Ok(url)
            }
        }
    }
}

// {base}/{tag}/feed
fn path_feed(base: &str, tag: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| RelayError::General(format!("{} cannot be a base URL", base)))?
        .push(tag)
        .push("feed");
    Ok(url)
}

impl fmt::Display for ArticleSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
