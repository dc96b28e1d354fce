use crate::config::Config;
use crate::errors::Result;
use crate::logging::logged;
use crate::models::index::{AssetFilter, IndexId, OutputMode};
use crate::models::table::Composition;
use crate::normalizer::normalize;
use crate::scrapers::base::Fetcher;
use crate::scrapers::http::HttpFetcher;
use crate::selector::{select, Selection};
use log::info;
use std::sync::Arc;

/// 成分股服务：抓取 -> 规范化 -> 筛选，每次调用只请求一次数据源
pub struct CompositionService {
    config: Config,
    fetcher: Arc<dyn Fetcher>,
}

impl CompositionService {
    /// 使用指定的抓取器创建服务
    pub fn new(config: Config, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { config, fetcher }
    }

    /// 使用 HTTP 抓取器创建服务
    pub fn with_http(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::new(config, Arc::new(fetcher)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Latest composition of `index`, reduced, filtered and shaped per the arguments.
    ///
    /// The call is logged at debug level before it runs; a failure is logged
    /// at error level and returned unchanged.
    pub async fn index_composition(
        &self,
        index: IndexId,
        assets: AssetFilter,
        mode: OutputMode,
        reduction: bool,
    ) -> Result<Composition> {
        let signature = format!(
            "'{}', assets={}, mode='{}', reduction={}",
            index, assets, mode, reduction
        );
        let selection = Selection::new(assets, mode, reduction);
        logged("index_composition", &signature, self.compose(index, &selection)).await
    }

    pub(crate) async fn compose(&self, index: IndexId, selection: &Selection) -> Result<Composition> {
        let raw = self.fetcher.fetch_raw(index, &self.config).await?;
        let table = normalize(index, raw)?;
        let composition = select(index, table, selection)?;

        info!(
            "{} composition: {} entries (mode={}, reduction={})",
            index,
            composition.len(),
            selection.mode,
            selection.reduction
        );
        Ok(composition)
    }
}
