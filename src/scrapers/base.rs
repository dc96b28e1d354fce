use crate::config::Config;
use crate::errors::{CompositionError, Result};
use crate::models::index::IndexId;
use crate::models::table::CanonicalTable;
use crate::scrapers::html;
use async_trait::async_trait;
use log::debug;

/// Raw content fetched for one index, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawContent {
    /// 分号分隔的文本导出（IBOV）
    Text(String),
    /// 页面中解析出的全部表格，按文档顺序（S&P 500）
    Tables(Vec<CanonicalTable>),
}

/// Base trait for fetching index source content
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the body at `url` as text
    async fn fetch_text(&self, url: &str) -> Result<String>;

    /// Fetch an HTML document and parse every table in it
    async fn fetch_tables(&self, url: &str) -> Result<Vec<CanonicalTable>> {
        let body = self.fetch_text(url).await?;
        let tables = html::parse_tables(&body);
        if tables.is_empty() {
            return Err(CompositionError::parse(format!("no tables found at {}", url)));
        }
        debug!("Parsed {} tables from {}", tables.len(), url);
        Ok(tables)
    }

    /// Fetch the raw content for an index from its configured source
    async fn fetch_raw(&self, index: IndexId, config: &Config) -> Result<RawContent> {
        let url = config.url_for(index);
        match index {
            IndexId::Ibov => Ok(RawContent::Text(self.fetch_text(url).await?)),
            IndexId::Sp500 => Ok(RawContent::Tables(self.fetch_tables(url).await?)),
        }
    }
}
