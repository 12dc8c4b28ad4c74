//! Bridges between polars frames and the indicator engine's plain columns.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use indicator_engine::{IndicatorSet, PriceSeries};
use polars::prelude::*;

use crate::error::UnitFailure;

/// Bar open-time column.
pub const TS: &str = "ts";

/// Numeric kline columns handed to the engine when present.
pub const PRICE_COLUMNS: [&str; 5] = ["open", "high", "low", "close", "volume"];

/// Pull the OHLCV columns (as `f64`, nulls become `NaN`) and the optional `ts`
/// column out of a kline frame.
///
/// A frame without `close` still converts; the engine constructor is what
/// rejects it.
pub fn price_series_from_frame(df: &DataFrame) -> Result<PriceSeries, UnitFailure> {
    let mut columns = IndexMap::new();
    for name in PRICE_COLUMNS {
        if let Ok(column) = df.column(name) {
            columns.insert(name.to_string(), to_f64(name, column)?);
        }
    }
    let series = PriceSeries::from_columns(columns)?;
    match timestamps(df)? {
        Some(ts) => Ok(series.with_timestamps(ts)?),
        None => Ok(series),
    }
}

fn to_f64(name: &str, column: &Column) -> Result<Vec<f64>, UnitFailure> {
    let column_err = |source| UnitFailure::Column {
        column: name.to_string(),
        source,
    };
    let cast = column
        .as_materialized_series()
        .cast(&DataType::Float64)
        .map_err(column_err)?;
    let values = cast.f64().map_err(column_err)?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// `ts` as UTC instants. Accepts a datetime column of any unit or integer
/// epoch milliseconds.
fn timestamps(df: &DataFrame) -> Result<Option<Vec<DateTime<Utc>>>, UnitFailure> {
    let Ok(column) = df.column(TS) else {
        return Ok(None);
    };
    let column_err = |source| UnitFailure::Column {
        column: TS.to_string(),
        source,
    };
    let series = column.as_materialized_series();
    let millis = match series.dtype() {
        DataType::Datetime(_, tz) => series
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, tz.clone()))
            .and_then(|s| s.cast(&DataType::Int64))
            .map_err(column_err)?,
        dtype if dtype.is_integer() => series.cast(&DataType::Int64).map_err(column_err)?,
        other => {
            return Err(UnitFailure::Dtype {
                column: TS.to_string(),
                dtype: other.to_string(),
            });
        }
    };
    let millis = millis.i64().map_err(column_err)?;

    millis
        .into_iter()
        .enumerate()
        .map(|(row, ms)| {
            ms.and_then(DateTime::from_timestamp_millis)
                .ok_or(UnitFailure::BadTimestamp { row })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Bars must be strictly increasing in time: no duplicates, no reordering.
pub fn check_ordering(ts: &[DateTime<Utc>]) -> Result<(), UnitFailure> {
    match ts.windows(2).position(|w| w[1] <= w[0]) {
        Some(i) => Err(UnitFailure::Unordered { row: i + 1 }),
        None => Ok(()),
    }
}

/// Append one `Float64` column per indicator, in insertion order. A column
/// that already exists under the same name is replaced.
pub fn attach_indicators(df: &mut DataFrame, set: &IndicatorSet) -> Result<(), UnitFailure> {
    for (name, values) in set {
        df.with_column(Series::new(name.as_str().into(), values.as_slice()))
            .map_err(|source| UnitFailure::Column {
                column: name.clone(),
                source,
            })?;
    }
    Ok(())
}
