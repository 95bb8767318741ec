pub mod defs;
pub mod message;

pub use defs::{FeedEntry, Tag};
pub use message::{ArticleMessage, LINK_LABEL, TEMPLATE_VERSION};
