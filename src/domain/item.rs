use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

/// Raw record returned by the item endpoint.
///
/// Stories and comments share this shape; which optional fields are present
/// tells them apart.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Item {
    pub id: u64,
    pub by: Option<String>,
    pub time: Option<i64>,
    pub text: Option<String>,
    pub title: Option<String>,
    pub score: Option<i64>,
    pub kids: Option<Vec<u64>>,
}

/// A submitted post together with the ids of its top-level comments.
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub id: u64,
    pub title: String,
    pub score: i64,
    pub kids: Option<Vec<u64>>,
}

impl From<Item> for Story {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            title: item.title.unwrap_or_default(),
            score: item.score.unwrap_or(0),
            kids: item.kids,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: u64,
    pub by: Option<String>,
    pub time: Option<i64>,
    /// Raw HTML text; replaced by its decoded form once a URL is extracted.
    pub text: Option<String>,
    pub kids: Option<Vec<u64>>,
}

impl From<Item> for Comment {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            by: item.by,
            time: item.time,
            text: item.text,
            kids: item.kids,
        }
    }
}

impl Comment {
    pub fn author(&self) -> &str {
        self.by.as_deref().unwrap_or("unknown")
    }

    pub fn has_replies(&self) -> bool {
        self.kids.is_some()
    }

    pub fn first_reply(&self) -> Option<u64> {
        self.kids.as_ref().and_then(|kids| kids.first().copied())
    }

    /// Original posting time, if the API reported a valid one.
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        self.time
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
    }
}
