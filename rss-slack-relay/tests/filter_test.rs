use rss_slack_relay::{ArticleFilter, Decision, FeedEntry, PreviousLinks, Rejection};

fn previous(links: &[&str]) -> PreviousLinks {
    links.iter().map(|link| link.to_string()).collect()
}

fn blocklist() -> ArticleFilter {
    ArticleFilter::new(vec!["spam.example.com".to_string()])
}

#[test]
fn test_new_entry_is_sent() {
    let entry = FeedEntry::new("Intro", "https://dev.to/a");
    assert!(blocklist().should_send(&entry, &PreviousLinks::default()));
    assert_eq!(blocklist().decide(&entry, &previous(&["<https://dev.to/b>"])), Decision::Send);
}

#[test]
fn test_blocklisted_link_is_skipped() {
    let entry = FeedEntry::new("Intro", "https://spam.example.com/a");
    assert_eq!(
        blocklist().decide(&entry, &PreviousLinks::default()),
        Decision::Skip(Rejection::Blocklisted {
            pattern: "spam.example.com".to_string()
        })
    );
}

#[test]
fn test_blocklist_matches_any_substring() {
    let filter = ArticleFilter::new(vec!["/sponsored/".to_string(), "utm_source=ads".to_string()]);
    assert!(!filter.should_send(
        &FeedEntry::new("a", "https://qiita.com/sponsored/x"),
        &PreviousLinks::default()
    ));
    assert!(!filter.should_send(
        &FeedEntry::new("b", "https://zenn.dev/x?utm_source=ads"),
        &PreviousLinks::default()
    ));
    assert!(filter.should_send(
        &FeedEntry::new("c", "https://zenn.dev/x"),
        &PreviousLinks::default()
    ));
}

#[test]
fn test_previously_sent_link_is_skipped() {
    let entry = FeedEntry::new("Intro", "https://dev.to/a");
    let previous = previous(&["<https://dev.to/a>"]);

    assert!(ArticleFilter::default().decide(&entry, &previous) == Decision::Skip(Rejection::PreviouslySent));
    assert!(!blocklist().should_send(&entry, &previous));
}

#[test]
fn test_history_match_requires_angle_brackets() {
    // History stores auto-linked URLs; a bare URL line is not a match.
    let entry = FeedEntry::new("Intro", "https://dev.to/a");
    assert!(blocklist().should_send(&entry, &previous(&["https://dev.to/a"])));
}

#[test]
fn test_previously_sent_reported_before_blocklist() {
    let entry = FeedEntry::new("x", "https://spam.example.com/a");
    let previous = previous(&["<https://spam.example.com/a>"]);
    assert_eq!(
        blocklist().decide(&entry, &previous),
        Decision::Skip(Rejection::PreviouslySent)
    );
}

#[test]
fn test_empty_blocklist_accepts_everything_new() {
    let filter = ArticleFilter::new(Vec::new());
    assert_eq!(filter.blocklisted_by("https://anything"), None);
    assert!(filter.should_send(&FeedEntry::new("t", "https://anything"), &PreviousLinks::default()));
}
