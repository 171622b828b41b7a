use std::sync::Arc;

use crate::app::Result;
use crate::collector::Collector;
use crate::config::Config;
use crate::feed::EntryBuilder;
use crate::fetcher::{Fetcher, HttpFetcher};

/// Everything one pipeline run needs, passed explicitly.
pub struct AppContext {
    pub config: Config,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self { config, fetcher }
    }

    pub fn collector(&self) -> Collector<'_> {
        Collector::new(self.fetcher.as_ref(), self.config.top_stories_limit)
    }

    pub fn entry_builder(&self) -> EntryBuilder {
        EntryBuilder::new(&self.config.item_link_base)
    }
}
