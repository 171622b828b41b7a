use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::app::Result;
use crate::config::Config;
use crate::domain::Item;
use crate::fetcher::Fetcher;

pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    /// GET `{base}/{endpoint}.json` and decode the body.
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}/{}.json", self.base_url, endpoint);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        response.error_for_status_ref()?;

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_top_story_ids(&self) -> Result<Vec<u64>> {
        self.get_json("topstories").await
    }

    async fn fetch_item(&self, id: u64) -> Result<Option<Item>> {
        self.get_json(&format!("item/{}", id)).await
    }
}
