use crate::config::Config;
use crate::errors::{CompositionError, Result};
use crate::scrapers::base::Fetcher;
use crate::util;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use std::time::Duration;

/// 基于 reqwest 的数据源抓取器
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(CompositionError::RequestError)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        info!("Fetching {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompositionError::FetchError(format!(
                "HTTP status {} from {}",
                status, url
            )));
        }

        // IBOV 导出文件是 Latin-1 编码，不能依赖响应头里的 charset
        let bytes = response.bytes().await?;
        debug!("Received {} bytes from {}", bytes.len(), url);

        Ok(util::decode_text(&bytes))
    }
}
