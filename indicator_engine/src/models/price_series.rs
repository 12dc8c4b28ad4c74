//! Column-oriented view over a kline series.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::error::{IndicatorError, Result};
use crate::models::bar::Bar;

/// Name of the column every indicator reads from.
pub const CLOSE: &str = "close";

/// Named numeric columns of equal length, optionally with bar timestamps.
///
/// This is the input handed to [`IndicatorEngine`](crate::engine::IndicatorEngine).
/// Column order is preserved as inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    columns: IndexMap<String, Vec<f64>>,
    timestamps: Option<Vec<DateTime<Utc>>>,
    len: usize,
}

impl PriceSeries {
    /// Build from raw named columns.
    ///
    /// Errors:
    /// - Columns of differing lengths
    pub fn from_columns(columns: IndexMap<String, Vec<f64>>) -> Result<Self> {
        let len = columns.values().next().map_or(0, Vec::len);
        if let Some((name, col)) = columns.iter().find(|(_, c)| c.len() != len) {
            return Err(IndicatorError::invalid(format!(
                "column '{name}' has {} rows, expected {len}",
                col.len()
            )));
        }
        Ok(Self {
            columns,
            timestamps: None,
            len,
        })
    }

    /// Attach bar open times. Must line up with the columns.
    pub fn with_timestamps(mut self, timestamps: Vec<DateTime<Utc>>) -> Result<Self> {
        if !self.columns.is_empty() && timestamps.len() != self.len {
            return Err(IndicatorError::invalid(format!(
                "timestamps have {} rows, expected {}",
                timestamps.len(),
                self.len
            )));
        }
        self.len = timestamps.len();
        self.timestamps = Some(timestamps);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn timestamps(&self) -> Option<&[DateTime<Utc>]> {
        self.timestamps.as_deref()
    }
}

impl From<&[Bar]> for PriceSeries {
    fn from(bars: &[Bar]) -> Self {
        let mut columns: IndexMap<String, Vec<f64>> = IndexMap::new();
        let fields: [(&str, fn(&Bar) -> f64); 5] = [
            ("open", |b| b.open),
            ("high", |b| b.high),
            ("low", |b| b.low),
            (CLOSE, |b| b.close),
            ("volume", |b| b.volume),
        ];
        for (name, get) in fields {
            columns.insert(name.to_string(), bars.iter().map(get).collect());
        }
        Self {
            columns,
            timestamps: Some(bars.iter().map(|b| b.timestamp).collect()),
            len: bars.len(),
        }
    }
}
