use crate::errors::{CompositionError, Result};
use crate::util;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// 规范化后的成分表：有序列名 + 有序行，每行单元格数量与列数一致
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CanonicalTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CanonicalTable {
    /// Builds a table, padding short rows with empty cells and truncating long ones.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Values of one column in row order.
    pub fn column(&self, name: &str) -> Result<Vec<String>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| CompositionError::parse(format!("column '{}' not found", name)))?;
        Ok(self.rows.iter().map(|row| row[idx].clone()).collect())
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }

    /// Drops the last `n` rows; a shorter table becomes empty.
    pub fn drop_last(&mut self, n: usize) {
        let keep = self.rows.len().saturating_sub(n);
        self.rows.truncate(keep);
    }

    /// Keeps the rows whose value in `column` satisfies the predicate, order preserved.
    pub fn retain_by<F>(&mut self, column: &str, mut keep: F) -> Result<()>
    where
        F: FnMut(&str) -> bool,
    {
        let idx = self
            .column_index(column)
            .ok_or_else(|| CompositionError::parse(format!("column '{}' not found", column)))?;
        self.rows.retain(|row| keep(&row[idx]));
        Ok(())
    }

    /// Projects the table onto the given columns, in the given order.
    pub fn select_columns(&self, names: &[&str]) -> Result<CanonicalTable> {
        let indices = names
            .iter()
            .map(|name| {
                self.column_index(name).ok_or_else(|| {
                    CompositionError::parse(format!("expected column '{}' not found", name))
                })
            })
            .collect::<Result<Vec<usize>>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(CanonicalTable {
            columns: names.iter().map(|n| n.to_string()).collect(),
            rows,
        })
    }

    /// 将 IBOV 表解析为带类型的成分股记录
    pub fn ibov_constituents(&self) -> Result<Vec<IbovConstituent>> {
        let projected = self.select_columns(&crate::normalizer::IBOV_COLUMNS)?;
        Ok(projected
            .rows
            .iter()
            .map(|row| IbovConstituent {
                ticker: row[0].clone(),
                name: row[1].clone(),
                share_class: row[2].clone(),
                theoretical_quantity: util::parse_br_integer(&row[3]),
                weight_pct: util::parse_br_decimal(&row[4]),
            })
            .collect())
    }
}

/// Serializes as an array of `{column: value}` objects.
impl Serialize for CanonicalTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        struct Record<'a>(&'a [String], &'a [String]);

        impl Serialize for Record<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (column, value) in self.0.iter().zip(self.1) {
                    map.serialize_entry(column, value)?;
                }
                map.end()
            }
        }

        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&Record(&self.columns, row))?;
        }
        seq.end()
    }
}

/// 一次调用的结果：完整表格或代码列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Composition {
    Table(CanonicalTable),
    Tickers(Vec<String>),
}

impl Composition {
    pub fn as_table(&self) -> Option<&CanonicalTable> {
        match self {
            Composition::Table(table) => Some(table),
            Composition::Tickers(_) => None,
        }
    }

    pub fn as_tickers(&self) -> Option<&[String]> {
        match self {
            Composition::Table(_) => None,
            Composition::Tickers(tickers) => Some(tickers),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Composition::Table(table) => table.len(),
            Composition::Tickers(tickers) => tickers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tab separated table with a header line, or one ticker per line.
    pub fn to_text(&self) -> String {
        match self {
            Composition::Table(table) => {
                let mut lines = Vec::with_capacity(table.len() + 1);
                lines.push(table.columns().join("\t"));
                lines.extend(table.rows().iter().map(|row| row.join("\t")));
                lines.join("\n")
            }
            Composition::Tickers(tickers) => tickers.join("\n"),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Typed view of one IBOV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IbovConstituent {
    pub ticker: String,
    pub name: String,
    pub share_class: String,
    pub theoretical_quantity: Option<u64>,
    pub weight_pct: Option<f64>,
}
