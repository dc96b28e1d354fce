// 公开导出的模块，供外部使用
pub mod models;
pub mod errors;
pub mod config;
pub mod logging;
pub mod normalizer;
pub mod selector;
pub mod scrapers;
pub mod services;

#[doc(hidden)]
pub mod util;

// 重新导出常用类型，方便使用
pub use config::Config;
pub use errors::{CompositionError, Result};
pub use models::index::{AssetFilter, IndexId, OutputMode};
pub use models::table::{CanonicalTable, Composition, IbovConstituent};
pub use scrapers::base::{Fetcher, RawContent};
pub use scrapers::http::HttpFetcher;
pub use selector::Selection;
pub use services::composition_service::CompositionService;

/// Latest composition of IBOV or the S&P 500, fetched over HTTP with the default [`Config`].
///
/// * `index`: `"ibov"` or `"sp500"`.
/// * `assets`: `"all"` or a comma separated ticker list, e.g. `"PETR4,VALE3"`.
/// * `mode`: `"df"` for the whole table, `"list"` for the tickers only.
/// * `reduction`: `false` drops the two trailing reduction rows of the IBOV export.
///
/// Unknown `index` or `mode` values are rejected with
/// [`CompositionError::InvalidArgument`].
pub async fn index_composition(index: &str, assets: &str, mode: &str, reduction: bool) -> Result<Composition> {
    let signature = format!(
        "'{}', assets='{}', mode='{}', reduction={}",
        index, assets, mode, reduction
    );

    logging::logged("index_composition", &signature, run(index, assets, mode, reduction)).await
}

async fn run(index: &str, assets: &str, mode: &str, reduction: bool) -> Result<Composition> {
    let index = IndexId::from_str(index)?;
    let selection = Selection::new(AssetFilter::from_str(assets)?, OutputMode::from_str(mode)?, reduction);
    let service = CompositionService::with_http(Config::new())?;
    service.compose(index, &selection).await
}
