use crate::errors::Result;
use crate::models::index::{AssetFilter, IndexId, OutputMode};
use crate::models::table::{CanonicalTable, Composition};
use log::debug;

/// IBOV 导出末尾的汇总行数（理论总量、Redutor）
pub const REDUCTION_ROWS: usize = 2;

/// Post-processing options for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub assets: AssetFilter,
    pub mode: OutputMode,
    /// `false` drops the trailing reduction rows (IBOV only).
    pub reduction: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            assets: AssetFilter::All,
            mode: OutputMode::Df,
            reduction: true,
        }
    }
}

impl Selection {
    pub fn new(assets: AssetFilter, mode: OutputMode, reduction: bool) -> Self {
        Self {
            assets,
            mode,
            reduction,
        }
    }
}

/// Applies reduction, asset filter and output mode, in that order.
pub fn select(index: IndexId, mut table: CanonicalTable, selection: &Selection) -> Result<Composition> {
    if index.has_reduction_rows() && !selection.reduction {
        table.drop_last(REDUCTION_ROWS);
    }

    let ticker = index.ticker_column();

    if let AssetFilter::Only(assets) = &selection.assets {
        let before = table.len();
        table.retain_by(ticker, |t| assets.contains(t))?;
        debug!("Asset filter kept {} of {} rows", table.len(), before);
    }

    match selection.mode {
        OutputMode::Df => Ok(Composition::Table(table)),
        OutputMode::List => Ok(Composition::Tickers(table.column(ticker)?)),
    }
}
