use crate::history::PreviousLinks;
use crate::types::{FeedEntry, Tag};

/// Why an entry was not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    PreviouslySent,
    Blocklisted { pattern: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Send,
    Skip(Rejection),
}

impl Decision {
    pub fn is_send(&self) -> bool {
        matches!(self, Decision::Send)
    }
}

/// An entry that passed filtering, with the tag it was found under.
#[derive(Debug, Clone, Copy)]
pub struct SendDecision<'a> {
    pub entry: &'a FeedEntry,
    pub tag: &'a Tag,
}

/// Accepts an entry when its link has not been posted before and contains
/// none of the blocklisted substrings.
///
/// Entries are judged one at a time. The same link found under two tags in
/// one run passes twice.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    blocklist: Vec<String>,
}

impl ArticleFilter {
    pub fn new(blocklist: Vec<String>) -> Self {
        Self { blocklist }
    }

    pub fn decide(&self, entry: &FeedEntry, previous: &PreviousLinks) -> Decision {
        if previous.contains_link(&entry.link) {
            return Decision::Skip(Rejection::PreviouslySent);
        }
        match self.blocklisted_by(&entry.link) {
            Some(pattern) => Decision::Skip(Rejection::Blocklisted {
                pattern: pattern.to_string(),
            }),
            None => Decision::Send,
        }
    }

    pub fn should_send(&self, entry: &FeedEntry, previous: &PreviousLinks) -> bool {
        self.decide(entry, previous).is_send()
    }

    pub fn blocklisted_by(&self, link: &str) -> Option<&str> {
        self.blocklist
            .iter()
            .find(|pattern| link.contains(pattern.as_str()))
            .map(String::as_str)
    }
}
