//! RSS 2.0 output feed: channel metadata, reading prior entries, writing.

pub mod reader;
pub mod writer;

use chrono::{DateTime, SubsecRound, Utc};

use crate::domain::{FeedEntry, Gem};

pub use reader::read_prior_entries;
pub use writer::{render_feed, write_feed};

/// Fixed `<channel>` metadata of an output feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMeta {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
}

impl ChannelMeta {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            link: "https://news.ycombinator.com/".to_string(),
            description: "The top Hacker News comments containing URLs.".to_string(),
            language: "en".to_string(),
        }
    }

    /// Channel of the hourly poll feed.
    pub fn top_comments() -> Self {
        Self::new("Top HN Comments with URL")
    }

    /// Channel of the accumulating gems feed.
    pub fn gems() -> Self {
        Self::new("HN Gems: Commented URLs")
    }
}

/// Builds feed entries out of gems.
#[derive(Debug, Clone)]
pub struct EntryBuilder {
    link_base: String,
}

impl EntryBuilder {
    pub fn new(link_base: &str) -> Self {
        Self {
            link_base: link_base.trim_end_matches('/').to_string(),
        }
    }

    /// Poll-mode entry: dated by the comment's own posting time.
    pub fn top_comment(&self, gem: &Gem) -> FeedEntry {
        let comment = &gem.comment;
        let posted = comment.posted_at();
        let shown = posted
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown date".to_string());

        FeedEntry {
            title: format!("Comment by {} on {}", comment.author(), shown),
            link: format!("{}/item?id={}", self.link_base, comment.id),
            description: gem.text().to_string(),
            author: comment.by.clone(),
            published_at: posted,
        }
    }

    /// Gems-mode entry: dated by `discovered_at`; the posting time only
    /// appears in the description.
    pub fn gem(&self, gem: &Gem, discovered_at: DateTime<Utc>) -> FeedEntry {
        let comment = &gem.comment;
        let posted = comment
            .posted_at()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S%:z").to_string())
            .unwrap_or_else(|| "unknown".to_string());

        FeedEntry {
            title: format!("HN Gem: {} - {}", gem.base_domain, comment.author()),
            link: self.gem_link(comment.id),
            description: format!("{}<br><small>Posted: {}</small>", gem.text(), posted),
            author: comment.by.clone(),
            published_at: Some(discovered_at.trunc_subsecs(0)),
        }
    }

    pub fn gem_link(&self, comment_id: u64) -> String {
        format!("{}/context?id={}", self.link_base, comment_id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::Comment;

    fn gem() -> Gem {
        Gem {
            comment: Comment {
                id: 42,
                by: Some("alice".into()),
                time: Some(1_175_714_200),
                text: Some("visit http://foo.com".into()),
                kids: Some(vec![43]),
            },
            story_title: "My YC app".into(),
            url: "http://foo.com".into(),
            base_domain: "foo.com".into(),
        }
    }

    #[test]
    fn test_gem_entry() {
        let builder = EntryBuilder::new("https://news.ycombinator.com/");
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
            + chrono::Duration::milliseconds(750);
        let entry = builder.gem(&gem(), now);

        assert_eq!(entry.title, "HN Gem: foo.com - alice");
        assert_eq!(entry.link, "https://news.ycombinator.com/context?id=42");
        assert_eq!(
            entry.description,
            "visit http://foo.com<br><small>Posted: 2007-04-04 19:16:40+00:00</small>"
        );
        assert_eq!(entry.author.as_deref(), Some("alice"));
        assert_eq!(
            entry.published_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_top_comment_entry() {
        let builder = EntryBuilder::new("https://news.ycombinator.com");
        let entry = builder.top_comment(&gem());

        assert_eq!(entry.title, "Comment by alice on 2007-04-04 19:16:40");
        assert_eq!(entry.link, "https://news.ycombinator.com/item?id=42");
        assert_eq!(entry.description, "visit http://foo.com");
        assert_eq!(entry.published_at, gem().comment.posted_at());
    }

    #[test]
    fn test_channel_titles() {
        assert_eq!(ChannelMeta::gems().title, "HN Gems: Commented URLs");
        assert_eq!(ChannelMeta::top_comments().title, "Top HN Comments with URL");
        assert_eq!(ChannelMeta::gems().language, "en");
    }
}
