//! Walks the top stories and their comments, turning link-bearing comments
//! into [`Gem`]s.
//!
//! One algorithm serves both run modes; [`CollectPolicy`] decides which
//! comments are looked at and which of them are kept.

use crate::app::Result;
use crate::domain::{Comment, Gem, Story};
use crate::extractor::{base_domain, extract_url, is_excluded};
use crate::fetcher::Fetcher;

/// Which comments are considered and kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectPolicy {
    /// Poll mode: first `comments_per_story` comments of every story with
    /// comments, plus the first reply to each of them. No score or domain
    /// filtering.
    Unfiltered { comments_per_story: usize },
    /// Gems mode: stories scoring at least `min_score`, up to `depth`
    /// comments each; a comment must have replies and link outside the
    /// excluded domains.
    Filtered { min_score: i64, depth: usize },
}

/// Comment ids looked at in gems mode.
///
/// A story with fewer than `depth` comments loses its last one.
pub fn select_comment_ids(kids: &[u64], depth: usize) -> &[u64] {
    if kids.len() < depth {
        &kids[..kids.len().saturating_sub(1)]
    } else {
        &kids[..depth]
    }
}

pub struct Collector<'a> {
    fetcher: &'a (dyn Fetcher + Send + Sync),
    top_stories_limit: usize,
}

impl<'a> Collector<'a> {
    pub fn new(fetcher: &'a (dyn Fetcher + Send + Sync), top_stories_limit: usize) -> Self {
        Self {
            fetcher,
            top_stories_limit,
        }
    }

    /// Run one collection pass. Gems come out in story-then-comment order.
    pub async fn collect(&self, policy: CollectPolicy) -> Result<Vec<Gem>> {
        let mut story_ids = self.fetcher.fetch_top_story_ids().await?;
        story_ids.truncate(self.top_stories_limit);

        let total = story_ids.len();
        let mut gems = Vec::new();

        for (idx, story_id) in story_ids.into_iter().enumerate() {
            let done = idx + 1;
            if done % 10 == 0 || done == total {
                tracing::info!("Processing stories [{}/{}]", done, total);
            }

            tracing::debug!("Fetching story {}", story_id);
            let Some(item) = self.fetcher.fetch_item(story_id).await? else {
                tracing::warn!("Story {} not found, skipping", story_id);
                continue;
            };
            let story = Story::from(item);

            let Some(kids) = story.kids.as_deref() else {
                continue;
            };

            match policy {
                CollectPolicy::Unfiltered { comments_per_story } => {
                    let ids = &kids[..kids.len().min(comments_per_story)];
                    self.collect_with_first_reply(&story, ids, &mut gems).await?;
                }
                CollectPolicy::Filtered { min_score, depth } => {
                    if story.score < min_score {
                        tracing::debug!("Skipping story {} (score {})", story.id, story.score);
                        continue;
                    }
                    let ids = select_comment_ids(kids, depth);
                    self.collect_filtered(&story, ids, &mut gems).await?;
                }
            }
        }

        tracing::info!("Collected {} comments with links", gems.len());
        Ok(gems)
    }

    async fn collect_with_first_reply(
        &self,
        story: &Story,
        ids: &[u64],
        gems: &mut Vec<Gem>,
    ) -> Result<()> {
        for &comment_id in ids {
            tracing::debug!("Fetching comment {}", comment_id);
            let Some(comment) = self.fetch_comment(comment_id).await? else {
                continue;
            };
            let first_reply = comment.first_reply();

            if let Some(gem) = to_gem(comment, story) {
                gems.push(gem);
            }

            if let Some(reply_id) = first_reply {
                tracing::debug!("Fetching top response {}", reply_id);
                if let Some(reply) = self.fetch_comment(reply_id).await? {
                    if let Some(gem) = to_gem(reply, story) {
                        gems.push(gem);
                    }
                }
            }
        }

        Ok(())
    }

    async fn collect_filtered(
        &self,
        story: &Story,
        ids: &[u64],
        gems: &mut Vec<Gem>,
    ) -> Result<()> {
        for &comment_id in ids {
            tracing::debug!("Fetching comment {}", comment_id);
            let Some(comment) = self.fetch_comment(comment_id).await? else {
                continue;
            };
            if !comment.has_replies() {
                continue;
            }

            match to_gem(comment, story) {
                Some(gem) if is_excluded(&gem.base_domain) => {
                    tracing::debug!("Skipping excluded domain {}", gem.base_domain);
                }
                Some(gem) => gems.push(gem),
                None => {}
            }
        }

        Ok(())
    }

    async fn fetch_comment(&self, id: u64) -> Result<Option<Comment>> {
        let item = self.fetcher.fetch_item(id).await?;
        if item.is_none() {
            tracing::warn!("Comment {} not found, skipping", id);
        }
        Ok(item.map(Comment::from))
    }
}

fn to_gem(mut comment: Comment, story: &Story) -> Option<Gem> {
    let url = extract_url(&mut comment)?;
    Some(Gem {
        base_domain: base_domain(&url),
        url,
        story_title: story.title.clone(),
        comment,
    })
}
