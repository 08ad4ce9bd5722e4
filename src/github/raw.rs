// src/github/raw.rs
// Unauthenticated downloads of leaderboard markdown from raw.githubusercontent.com.

use async_trait::async_trait;
use tracing::debug;

use super::TableSource;
use crate::batch::DatasetId;
use crate::config::{BotConfig, USER_AGENT};
use crate::error::{BotError, BotResult};

pub struct GithubRawSource {
    client: reqwest::Client,
    root: String,
}

impl GithubRawSource {
    pub fn new(config: &BotConfig) -> BotResult<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &BotConfig) -> Self {
        Self {
            client,
            root: config.raw_content_root(),
        }
    }

    pub fn url_for(&self, dataset: &DatasetId) -> String {
        format!("{}/{}", self.root, dataset.markdown_path())
    }
}

#[async_trait]
impl TableSource for GithubRawSource {
    async fn fetch(&self, dataset: &DatasetId) -> BotResult<String> {
        let url = self.url_for(dataset);
        debug!(%dataset, %url, "fetching leaderboard");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BotError::UpstreamStatus {
                url,
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}
