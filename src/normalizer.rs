use crate::errors::{CompositionError, Result};
use crate::models::index::IndexId;
use crate::models::table::CanonicalTable;
use crate::scrapers::base::RawContent;
use log::debug;

/// IBOV 规范列，按输出顺序排列
pub const IBOV_COLUMNS: [&str; 5] = ["Código", "Ação", "Tipo", "Qtde. Teórica", "Part. (%)"];

/// Converts fetched raw content into the canonical table for `index`.
pub fn normalize(index: IndexId, raw: RawContent) -> Result<CanonicalTable> {
    match (index, raw) {
        (IndexId::Ibov, RawContent::Text(text)) => normalize_ibov(&text),
        (IndexId::Sp500, RawContent::Tables(tables)) => normalize_sp500(tables),
        (index, _) => Err(CompositionError::parse(format!(
            "raw content does not match the {} source format",
            index
        ))),
    }
}

/// Row 0 is a title, row 1 the header; the remaining rows are projected onto
/// [`IBOV_COLUMNS`].
fn normalize_ibov(text: &str) -> Result<CanonicalTable> {
    let mut rows = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(';').map(|cell| cell.trim().to_string()).collect::<Vec<_>>());

    let (_title, header) = match (rows.next(), rows.next()) {
        (Some(title), Some(header)) => (title, header),
        _ => {
            return Err(CompositionError::parse(
                "IBOV export has fewer than 2 rows, header row missing",
            ))
        }
    };

    let raw = CanonicalTable::new(header, rows.collect());
    let table = raw.select_columns(&IBOV_COLUMNS)?;

    debug!("Normalized {} IBOV rows", table.len());
    Ok(table)
}

fn normalize_sp500(tables: Vec<CanonicalTable>) -> Result<CanonicalTable> {
    let table = tables
        .into_iter()
        .next()
        .ok_or_else(|| CompositionError::parse("no table found in S&P 500 page"))?;

    let ticker = IndexId::Sp500.ticker_column();
    if !table.has_column(ticker) {
        return Err(CompositionError::parse(format!(
            "first S&P 500 table has no '{}' column",
            ticker
        )));
    }

    debug!("Normalized {} S&P 500 rows", table.len());
    Ok(table)
}
