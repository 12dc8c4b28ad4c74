//! Kline intervals as they appear in partition paths.
//!
//! A [`Timeframe`] pairs a non-zero amount with a [`TimeframeUnit`]. Its
//! `Display` form is the folder segment (`15m`, `4h`, `1D`, `1W`, `1M`) and
//! `FromStr` accepts exactly that spelling, so a timeframe parsed from a path
//! renders back to the same path.
//!
//! ```
//! use partition_store::timeframe::{Timeframe, TimeframeUnit};
//!
//! let tf: Timeframe = "240m".parse().unwrap();
//! assert_eq!(tf.amount().get(), 240);
//! assert_eq!(tf.unit(), TimeframeUnit::Minute);
//! assert_eq!(tf.to_string(), "240m");
//! ```

use std::{fmt, num::NonZeroU32, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use snafu::OptionExt;

use crate::error::{InvalidArgumentSnafu, StoreError};

/// Interval unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeframeUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl TimeframeUnit {
    fn suffix(self) -> &'static str {
        match self {
            TimeframeUnit::Minute => "m",
            TimeframeUnit::Hour => "h",
            TimeframeUnit::Day => "D",
            TimeframeUnit::Week => "W",
            TimeframeUnit::Month => "M",
        }
    }
}

/// amount × unit (e.g. 15-Minute, 4-Hour, 1-Day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timeframe {
    amount: NonZeroU32,
    unit: TimeframeUnit,
}

impl Timeframe {
    pub const fn new(amount: NonZeroU32, unit: TimeframeUnit) -> Self {
        Self { amount, unit }
    }

    /// Minute timeframe; `None` for zero.
    pub fn minutes(amount: u32) -> Option<Self> {
        NonZeroU32::new(amount).map(|a| Self::new(a, TimeframeUnit::Minute))
    }

    pub const fn amount(&self) -> NonZeroU32 {
        self.amount
    }

    pub const fn unit(&self) -> TimeframeUnit {
        self.unit
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount.get(), self.unit.suffix())
    }
}

impl FromStr for Timeframe {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // 15m / 4h / 1D / 1W / 1M
        let s = s.trim();
        let split = s
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .filter(|&i| i > 0)
            .context(InvalidArgumentSnafu {
                message: format!("timeframe '{s}' must look like 15m, 4h, 1D, 1W or 1M"),
            })?;
        let (digits, unit) = s.split_at(split);

        // canonical digits only: no sign, no leading zero
        let amount = Some(digits)
            .filter(|d| d.bytes().all(|b| b.is_ascii_digit()) && !d.starts_with('0'))
            .and_then(|d| d.parse::<u32>().ok())
            .and_then(NonZeroU32::new)
            .context(InvalidArgumentSnafu {
                message: format!("timeframe amount '{digits}' must be a positive integer"),
            })?;
        let unit = match unit {
            "m" => TimeframeUnit::Minute,
            "h" => TimeframeUnit::Hour,
            "D" => TimeframeUnit::Day,
            "W" => TimeframeUnit::Week,
            "M" => TimeframeUnit::Month,
            other => {
                return InvalidArgumentSnafu {
                    message: format!("unknown timeframe unit '{other}'"),
                }
                .fail();
            }
        };
        Ok(Timeframe::new(amount, unit))
    }
}

impl Serialize for Timeframe {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timeframe {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
