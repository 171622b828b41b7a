use chrono::{DateTime, Utc};

/// One `<item>` of the output feed.
///
/// `link` is the comment permalink and the deduplication key.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub description: String,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}
