pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Item;

pub use http_fetcher::HttpFetcher;

/// Read-only access to the Hacker News API.
#[async_trait]
pub trait Fetcher {
    /// Ids of the current top stories, best first.
    async fn fetch_top_story_ids(&self) -> Result<Vec<u64>>;

    /// A single story or comment. `None` when the API answers `null`.
    async fn fetch_item(&self, id: u64) -> Result<Option<Item>>;
}
