use indicator_engine::IndicatorError;
use partition_store::StoreError;
use polars::prelude::PolarsError;
use thiserror::Error;

use crate::pipeline::UnitKey;

/// Why a single (date, symbol, timeframe) unit could not be processed.
#[derive(Debug, Error)]
pub enum UnitFailure {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),

    #[error("column '{column}': {source}")]
    Column {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("column '{column}' has unsupported dtype {dtype}")]
    Dtype { column: String, dtype: String },

    #[error("timestamp at row {row} is missing or out of range")]
    BadTimestamp { row: usize },

    #[error("timestamps are not strictly increasing at row {row}")]
    Unordered { row: usize },
}

/// A failed unit, tagged with the unit it belongs to.
#[derive(Debug, Error)]
#[error("unit {unit} failed: {source}")]
pub struct UnitError {
    pub unit: UnitKey,
    #[source]
    pub source: UnitFailure,
}

impl UnitError {
    pub fn new(unit: UnitKey, source: impl Into<UnitFailure>) -> Self {
        Self {
            unit,
            source: source.into(),
        }
    }
}
