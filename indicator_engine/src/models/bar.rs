//! Canonical in-memory representation of one exchange kline (OHLCV).

use chrono::{DateTime, Utc};

/// A single candlestick for a given open time.
///
/// Series of bars are expected to be sorted ascending by `timestamp` with no
/// duplicates; the engine relies on it and does not re-check.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Open time of the bar (UTC).
    pub timestamp: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the bar interval.
    pub high: f64,

    /// Lowest price during the bar interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Base-asset volume traded during the bar interval.
    pub volume: f64,
}

impl Bar {
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}
