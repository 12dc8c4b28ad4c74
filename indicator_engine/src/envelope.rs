//! Moving average envelopes.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};
use crate::moving_average::{ema, sma};

/// Base average used for an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaType {
    Sma,
    Ema,
}

impl fmt::Display for MaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MaType::Sma => "sma",
            MaType::Ema => "ema",
        })
    }
}

impl FromStr for MaType {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sma" => Ok(MaType::Sma),
            "ema" => Ok(MaType::Ema),
            other => Err(IndicatorError::invalid(format!(
                "unsupported ma_type '{other}', expected 'sma' or 'ema'"
            ))),
        }
    }
}

/// Upper and lower bands around a moving average.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// `base * (1 + percentage)` and `base * (1 - percentage)`.
///
/// `percentage` is a fraction (0.025 for 2.5%).
pub fn envelopes(
    close: &[f64],
    window: usize,
    percentage: f64,
    ma_type: MaType,
) -> Result<Envelope> {
    if !percentage.is_finite() || percentage < 0.0 {
        return Err(IndicatorError::invalid(format!(
            "envelope percentage must be finite and >= 0, got {percentage}"
        )));
    }
    let base = match ma_type {
        MaType::Sma => sma(close, window)?,
        MaType::Ema => ema(close, window)?,
    };
    Ok(Envelope {
        upper: base.iter().map(|b| b * (1.0 + percentage)).collect(),
        lower: base.iter().map(|b| b * (1.0 - percentage)).collect(),
    })
}
