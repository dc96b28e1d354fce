use crate::errors::{CompositionError, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// 支持的指数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexId {
    /// Ibovespa, B3 的基准指数
    Ibov,
    /// S&P 500
    Sp500,
}

impl IndexId {
    pub const ALL: [IndexId; 2] = [IndexId::Ibov, IndexId::Sp500];

    pub fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_lowercase();
        IndexId::ALL
            .into_iter()
            .find(|index| index.as_str() == needle)
            .ok_or_else(|| {
                let expected: Vec<&str> = IndexId::ALL.iter().map(IndexId::as_str).collect();
                CompositionError::invalid(format!(
                    "unknown index '{}', expected one of: {}",
                    s,
                    expected.join(", ")
                ))
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexId::Ibov => "ibov",
            IndexId::Sp500 => "sp500",
        }
    }

    /// Column holding the ticker symbol in the canonical table.
    pub fn ticker_column(&self) -> &'static str {
        match self {
            IndexId::Ibov => "Código",
            IndexId::Sp500 => "Symbol",
        }
    }

    /// Only the IBOV export carries trailing reduction rows.
    pub fn has_reduction_rows(&self) -> bool {
        matches!(self, IndexId::Ibov)
    }
}

impl fmt::Display for IndexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 输出形式：完整表格或仅代码列表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Df,
    List,
}

impl OutputMode {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "df" => Ok(OutputMode::Df),
            "list" => Ok(OutputMode::List),
            _ => Err(CompositionError::invalid(format!(
                "unknown mode '{}', expected one of: df, list",
                s
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Df => "df",
            OutputMode::List => "list",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AssetFilter {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl AssetFilter {
    pub fn only<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AssetFilter::Only(tickers.into_iter().map(Into::into).collect())
    }

    /// Parses `"all"` or a comma separated ticker list such as `"PETR4,VALE3"`.
    pub fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(AssetFilter::All);
        }

        let tickers: BTreeSet<String> = s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        if tickers.is_empty() {
            return Err(CompositionError::invalid(
                "asset filter must be 'all' or a comma separated list of tickers",
            ));
        }
        Ok(AssetFilter::Only(tickers))
    }

    pub fn matches(&self, ticker: &str) -> bool {
        match self {
            AssetFilter::All => true,
            AssetFilter::Only(set) => set.contains(ticker),
        }
    }
}

impl fmt::Display for AssetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetFilter::All => f.write_str("all"),
            AssetFilter::Only(set) => {
                let joined: Vec<&str> = set.iter().map(String::as_str).collect();
                write!(f, "{{{}}}", joined.join(","))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_from_str() {
        assert_eq!(IndexId::from_str("ibov").unwrap(), IndexId::Ibov);
        assert_eq!(IndexId::from_str(" IBOV ").unwrap(), IndexId::Ibov);
        assert_eq!(IndexId::from_str("sp500").unwrap(), IndexId::Sp500);
        assert_eq!(IndexId::from_str("SP500").unwrap(), IndexId::Sp500);
        match IndexId::from_str("nasdaq") {
            Err(CompositionError::InvalidArgument(msg)) => {
                assert_eq!(msg, "unknown index 'nasdaq', expected one of: ibov, sp500")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_index_round_trips_through_as_str() {
        for index in IndexId::ALL {
            assert_eq!(IndexId::from_str(index.as_str()).unwrap(), index);
        }
    }

    #[test]
    fn test_index_ticker_column() {
        assert_eq!(IndexId::Ibov.ticker_column(), "Código");
        assert_eq!(IndexId::Sp500.ticker_column(), "Symbol");
        assert!(IndexId::Ibov.has_reduction_rows());
        assert!(!IndexId::Sp500.has_reduction_rows());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!(OutputMode::from_str("df").unwrap(), OutputMode::Df);
        assert_eq!(OutputMode::from_str("LIST").unwrap(), OutputMode::List);
        assert_eq!(OutputMode::default(), OutputMode::Df);
        assert!(OutputMode::from_str("table").is_err());
    }

    #[test]
    fn test_asset_filter_from_str() {
        assert_eq!(AssetFilter::from_str("all").unwrap(), AssetFilter::All);
        assert_eq!(AssetFilter::from_str("ALL").unwrap(), AssetFilter::All);

        let filter = AssetFilter::from_str("PETR4, VALE3,,").unwrap();
        assert_eq!(filter, AssetFilter::only(["PETR4", "VALE3"]));
        assert!(filter.matches("PETR4"));
        assert!(!filter.matches("ITUB4"));

        assert!(AssetFilter::from_str(" , ").is_err());
    }

    #[test]
    fn test_asset_filter_display() {
        assert_eq!(AssetFilter::All.to_string(), "all");
        assert_eq!(
            AssetFilter::only(["MSFT", "AAPL"]).to_string(),
            "{AAPL,MSFT}"
        );
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serde_json::to_string(&IndexId::Sp500).unwrap(), r#""sp500""#);
        assert_eq!(serde_json::to_string(&OutputMode::List).unwrap(), r#""list""#);
    }
}
