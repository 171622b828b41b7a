//! Link extraction from comment text.

pub mod filter;

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;

use crate::domain::Comment;

pub use filter::{base_domain, is_excluded, EXCLUDED_DOMAINS};

// Permissive RFC 1738-era character class. `$-_` is a range and swallows most
// ASCII punctuation, so a trailing period or parenthesis stays in the match.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"http[s]?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\\(\\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+")
        .unwrap()
});

/// First URL in already-decoded text.
pub fn find_url(text: &str) -> Option<&str> {
    URL_PATTERN.find(text).map(|m| m.as_str())
}

/// Decode the comment's HTML text and return the first URL it contains.
///
/// When a URL is found the comment's text is replaced by its decoded form.
/// Comments without text (deleted or flagged) yield `None`.
pub fn extract_url(comment: &mut Comment) -> Option<String> {
    let text = comment.text.as_deref()?;
    let decoded = decode_html_entities(text).into_owned();
    let url = find_url(&decoded)?.to_string();

    comment.text = Some(decoded);
    Some(url)
}
