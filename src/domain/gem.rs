use crate::domain::Comment;

/// A comment that survived URL extraction (and, in gems mode, the domain filter).
#[derive(Debug, Clone, PartialEq)]
pub struct Gem {
    /// The comment, with its text already HTML-decoded.
    pub comment: Comment,
    pub story_title: String,
    pub url: String,
    pub base_domain: String,
}

impl Gem {
    pub fn text(&self) -> &str {
        self.comment.text.as_deref().unwrap_or("")
    }
}
