use interfaces::message::{autolink_form, extract_link, ArticleMessage, LINK_LABEL, TITLE_LABEL};

// Slack turns bare URLs into `<url>` and escapes `&` before storing text.
fn as_stored_by_slack(rendered: &str, link: &str) -> String {
    let stored_link = autolink_form(&link.replace('&', "&amp;"));
    rendered.replace(&format!("\n{}\n", link), &format!("\n{}\n", stored_link))
}

#[test]
fn test_render_layout() {
    let text = ArticleMessage::new("Intro", "https://dev.to/a").render();
    let lines: Vec<&str> = text.split('\n').collect();

    assert_eq!(lines.len(), 7);
    assert_eq!(lines[1], TITLE_LABEL);
    assert_eq!(lines[2], "Intro");
    assert_eq!(lines[4], LINK_LABEL);
    assert_eq!(lines[5], "https://dev.to/a");
    assert_eq!(lines[0], lines[6]);
    assert!(!text.starts_with('\n'));
    assert!(!text.ends_with('\n'));
}

#[test]
fn test_round_trip_through_history() {
    let link = "https://x/y";
    let rendered = ArticleMessage::new("T", link).render();

    assert_eq!(extract_link(&rendered).as_deref(), Some(link));

    let stored = as_stored_by_slack(&rendered, link);
    assert_eq!(extract_link(&stored), Some(autolink_form(link)));
}

#[test]
fn test_round_trip_strips_escaped_ampersand() {
    let link = "https://example.com/search?q=rust&page=2";
    let stored = as_stored_by_slack(&ArticleMessage::new("Q", link).render(), link);

    assert!(stored.contains("&amp;"));
    assert_eq!(extract_link(&stored), Some(autolink_form(link)));
}

#[test]
fn test_extract_ignores_unrelated_messages() {
    assert_eq!(extract_link("hello\nworld"), None);
    assert_eq!(extract_link(""), None);
    // Label must be the whole line.
    assert_eq!(extract_link("リンク: https://x/y"), None);
    assert_eq!(extract_link(" リンク:\nhttps://x/y"), None);
}

#[test]
fn test_extract_label_on_last_line() {
    assert_eq!(extract_link("title\nリンク:"), None);
}

#[test]
fn test_extract_uses_first_label() {
    let text = "リンク:\n<https://first>\nリンク:\n<https://second>";
    assert_eq!(extract_link(text).as_deref(), Some("<https://first>"));
}
