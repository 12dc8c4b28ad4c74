//! Partition keys and their directory layout.
//!
//! ```text
//! <root>/Kline/Date/<MM-DD-YYYY>/<SYMBOL>/<TIMEFRAME>
//! <root>/Kline/Historical/<SYMBOL>/<TIMEFRAME>
//! <root>/Processed/<MM-DD-YYYY>/<SYMBOL>/<TIMEFRAME>
//! <root>/Indicator/<MM-DD-YYYY>/<SYMBOL>/<TIMEFRAME>
//! ```
//!
//! Symbol and timeframe are optional; leaving them off addresses the parent
//! (coarser) partition. The date is always explicit: callers resolve "today"
//! once per batch and pass it in, so a batch straddling midnight still writes
//! one consistent date.

use std::{fmt, path::PathBuf, str::FromStr};

use chrono::NaiveDate;
use snafu::ensure;

use crate::error::{InvalidArgumentSnafu, Result, StoreError};
use crate::timeframe::Timeframe;

/// Date segment format used in every dated partition.
pub const DATE_FORMAT: &str = "%m-%d-%Y";

/// Top-level data category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Raw exchange klines.
    Kline,
    /// Legacy per-indicator outputs. Always dated.
    Indicator,
    /// Klines augmented with indicator columns. Always dated.
    Processed,
}

impl Category {
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Kline => "Kline",
            Category::Indicator => "Indicator",
            Category::Processed => "Processed",
        }
    }

    /// Only raw klines keep an evergreen `Historical` bucket.
    pub fn supports_historical(self) -> bool {
        matches!(self, Category::Kline)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for Category {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kline" => Ok(Category::Kline),
            "indicator" => Ok(Category::Indicator),
            "processed" => Ok(Category::Processed),
            other => InvalidArgumentSnafu {
                message: format!("unknown category '{other}'"),
            }
            .fail(),
        }
    }
}

/// Whether a partition lives under a calendar date or in the evergreen bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateMode {
    Dated(NaiveDate),
    Historical,
}

impl DateMode {
    /// Build a mode from its textual name (`Date`/`Dated` or `Historical`).
    ///
    /// `date` is required for the dated mode and ignored otherwise.
    pub fn parse(mode: &str, date: Option<NaiveDate>) -> Result<Self> {
        match mode.trim() {
            "Date" | "Dated" => {
                let date = date.ok_or_else(|| {
                    InvalidArgumentSnafu {
                        message: "dated partitions need an explicit date",
                    }
                    .build()
                })?;
                Ok(DateMode::Dated(date))
            }
            "Historical" => Ok(DateMode::Historical),
            other => InvalidArgumentSnafu {
                message: format!("date mode must be \"Date\" or \"Historical\", got '{other}'"),
            }
            .fail(),
        }
    }
}

/// Render a date as a partition segment (`MM-DD-YYYY`).
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a partition date segment (`MM-DD-YYYY`).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| {
        InvalidArgumentSnafu {
            message: format!("date '{s}' is not MM-DD-YYYY: {e}"),
        }
        .build()
    })
}

/// Fully validated (category, date mode, symbol, timeframe) tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionKey {
    category: Category,
    date_mode: DateMode,
    symbol: Option<String>,
    timeframe: Option<Timeframe>,
}

impl PartitionKey {
    /// Errors:
    /// - `Historical` for a category that is dated only
    pub fn new(category: Category, date_mode: DateMode) -> Result<Self> {
        ensure!(
            date_mode != DateMode::Historical || category.supports_historical(),
            InvalidArgumentSnafu {
                message: format!("{category} partitions have no Historical variant"),
            }
        );
        Ok(Self {
            category,
            date_mode,
            symbol: None,
            timeframe: None,
        })
    }

    /// Build a key from loosely typed parts (CLI flags, config strings).
    ///
    /// Everything is validated before the key exists, so a bad mode or
    /// timeframe never reaches the filesystem.
    pub fn parse(
        category: &str,
        date_mode: &str,
        date: Option<NaiveDate>,
        symbol: Option<&str>,
        timeframe: Option<&str>,
    ) -> Result<Self> {
        let mut key = Self::new(category.parse()?, DateMode::parse(date_mode, date)?)?;
        if let Some(symbol) = symbol {
            key = key.with_symbol(symbol)?;
        }
        if let Some(tf) = timeframe {
            key = key.with_timeframe(tf.parse()?)?;
        }
        Ok(key)
    }

    /// Shorthand for a dated key.
    pub fn dated(category: Category, date: NaiveDate) -> Self {
        Self {
            category,
            date_mode: DateMode::Dated(date),
            symbol: None,
            timeframe: None,
        }
    }

    /// Narrow to one symbol.
    ///
    /// Errors:
    /// - Empty symbol, or one that could escape its directory
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Result<Self> {
        let symbol = symbol.into();
        let trimmed = symbol.trim();
        ensure!(
            !trimmed.is_empty()
                && trimmed != "."
                && trimmed != ".."
                && !trimmed.contains(['/', '\\']),
            InvalidArgumentSnafu {
                message: format!("symbol '{symbol}' is not a valid path segment"),
            }
        );
        self.symbol = Some(trimmed.to_string());
        Ok(self)
    }

    /// Narrow to one timeframe. Sits below the symbol segment when both are set.
    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Result<Self> {
        self.timeframe = Some(timeframe);
        Ok(self)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn date_mode(&self) -> DateMode {
        self.date_mode
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn timeframe(&self) -> Option<Timeframe> {
        self.timeframe
    }

    /// Path of this partition relative to the storage root.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::from(self.category.dir_name());
        match (self.category, self.date_mode) {
            (Category::Kline, DateMode::Dated(date)) => {
                path.push("Date");
                path.push(format_date(date));
            }
            (Category::Kline, DateMode::Historical) => path.push("Historical"),
            (_, DateMode::Dated(date)) => path.push(format_date(date)),
            // rejected by PartitionKey::new
            (_, DateMode::Historical) => path.push("Historical"),
        }
        if let Some(symbol) = &self.symbol {
            path.push(symbol);
        }
        if let Some(tf) = self.timeframe {
            path.push(tf.to_string());
        }
        path
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.relative_path();
        let segments: Vec<_> = path.iter().map(|s| s.to_string_lossy()).collect();
        f.write_str(&segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 3).unwrap()
    }

    #[test]
    fn date_segment_is_month_first() {
        assert_eq!(format_date(date()), "10-03-2024");
        assert_eq!(parse_date("10-03-2024").unwrap(), date());
        assert!(parse_date("2024-10-03").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn unknown_mode_is_invalid_argument() {
        let err = DateMode::parse("InvalidMode", Some(date())).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(DateMode::parse("Date", None).is_err());
        assert_eq!(DateMode::parse("Historical", None).unwrap(), DateMode::Historical);
    }

    #[test]
    fn historical_only_for_klines() {
        assert!(PartitionKey::new(Category::Kline, DateMode::Historical).is_ok());
        for c in [Category::Processed, Category::Indicator] {
            let err = PartitionKey::new(c, DateMode::Historical).unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn symbol_must_be_a_single_segment() {
        let key = PartitionKey::dated(Category::Kline, date());
        for bad in ["", "  ", "..", "BTC/USDT", "a\\b"] {
            assert!(key.clone().with_symbol(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn timeframe_without_symbol_is_one_segment() {
        let tf: Timeframe = "15m".parse().unwrap();
        let key = PartitionKey::dated(Category::Kline, date()).with_timeframe(tf).unwrap();
        assert_eq!(key.to_string(), "Kline/Date/10-03-2024/15m");
    }

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!("processed".parse::<Category>().unwrap(), Category::Processed);
        assert_eq!("Kline".parse::<Category>().unwrap(), Category::Kline);
        assert!("Klines".parse::<Category>().is_err());
    }
}
