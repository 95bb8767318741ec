//! Wire format of a published article message.
//!
//! The same constants are used to render outgoing messages and to read links
//! back out of channel history, so already-posted articles can be recognised
//! on later runs. Changing any line here invalidates the history of every
//! channel that was posted to with an earlier version; bump
//! [`TEMPLATE_VERSION`] when doing so.

pub const TEMPLATE_VERSION: u32 = 1;

/// Line that precedes the article link. Matched exactly when parsing history.
pub const LINK_LABEL: &str = "リンク:";
pub const TITLE_LABEL: &str = "*タイトル*:";

const RULE: &str = "*━━━━━━━━━━━━━━━━━━━━*";
const SEPARATOR: &str = "---------------------------";

// Slack escapes `&` as `&amp;` inside message text.
const AMP_ARTIFACT: &str = "amp;";

#[derive(Clone, Copy, Debug)]
pub struct ArticleMessage<'a> {
    pub title: &'a str,
    pub link: &'a str,
}

impl<'a> ArticleMessage<'a> {
    pub fn new(title: &'a str, link: &'a str) -> Self {
        Self { title, link }
    }

    pub fn render(&self) -> String {
        [RULE, TITLE_LABEL, self.title, SEPARATOR, LINK_LABEL, self.link, RULE].join("\n")
    }
}

/// Pulls the link out of a previously published message.
///
/// Only the first label line counts. The returned string is the line that
/// follows it, verbatim apart from `amp;` removal, so a link that Slack
/// auto-linked comes back wrapped in angle brackets.
pub fn extract_link(text: &str) -> Option<String> {
    let mut lines = text.split('\n');
    lines.find(|line| *line == LINK_LABEL)?;
    lines.next().map(|link| link.replace(AMP_ARTIFACT, ""))
}

/// How Slack shows a bare URL once it has been posted: `<url>`.
pub fn autolink_form(link: &str) -> String {
    format!("<{}>", link)
}
