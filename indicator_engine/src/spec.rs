//! Declarative description of *which indicators to compute*.
//!
//! An [`IndicatorSpec`] is what a batch configuration lists; it knows the
//! column names it produces and how to fill them from an
//! [`IndicatorEngine`].
//!
//! ```
//! use indicator_engine::spec::IndicatorSpec;
//!
//! let spec = IndicatorSpec::Rsi { periods: 14 };
//! assert_eq!(spec.column_names(), vec!["RSI_14".to_string()]);
//! ```

use serde::{Deserialize, Serialize};

use crate::engine::IndicatorEngine;
use crate::envelope::MaType;
use crate::error::Result;
use crate::momentum::DEFAULT_RSI_PERIODS;
use crate::set::IndicatorSet;

fn default_rsi_periods() -> usize {
    DEFAULT_RSI_PERIODS
}

fn default_smoothing() -> usize {
    3
}

fn default_ma_type() -> MaType {
    MaType::Sma
}

/// One entry of the indicator battery (serde tag: `kind`, snake_case).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorSpec {
    /// Simple moving average of close.
    Sma { window: usize },
    /// Exponential moving average of close; `lookback` masks the warm-up.
    Ema {
        span: usize,
        #[serde(default)]
        lookback: bool,
    },
    /// Relative strength index.
    Rsi {
        #[serde(default = "default_rsi_periods")]
        periods: usize,
    },
    /// Linearly weighted moving average of close.
    Wma { window: usize },
    /// Hull moving average of close.
    Hma { window: usize },
    /// Upper/lower bands around an SMA or EMA.
    Envelopes {
        window: usize,
        percentage: f64,
        #[serde(default = "default_ma_type")]
        ma_type: MaType,
    },
    /// Stochastic RSI %K and %D.
    StochRsi {
        #[serde(default = "default_rsi_periods")]
        periods: usize,
        #[serde(default = "default_smoothing")]
        smooth_k: usize,
        #[serde(default = "default_smoothing")]
        smooth_d: usize,
    },
}

impl IndicatorSpec {
    /// Output column names, in the order they are inserted.
    pub fn column_names(&self) -> Vec<String> {
        match self {
            IndicatorSpec::Sma { window } => vec![format!("SMA_{window}")],
            IndicatorSpec::Ema { span, .. } => vec![format!("EMA_{span}")],
            IndicatorSpec::Rsi { periods } => vec![format!("RSI_{periods}")],
            IndicatorSpec::Wma { window } => vec![format!("WMA_{window}")],
            IndicatorSpec::Hma { window } => vec![format!("HMA_{window}")],
            IndicatorSpec::Envelopes { window, ma_type, .. } => {
                let base = format!("ENV_{}_{window}", ma_type.to_string().to_uppercase());
                vec![format!("{base}_UPPER"), format!("{base}_LOWER")]
            }
            IndicatorSpec::StochRsi { periods, .. } => {
                vec![format!("STOCHRSI_{periods}_K"), format!("STOCHRSI_{periods}_D")]
            }
        }
    }

    /// Compute this indicator and insert its column(s) into `out`.
    pub fn compute_into(&self, engine: &IndicatorEngine<'_>, out: &mut IndicatorSet) -> Result<()> {
        let mut names = self.column_names().into_iter();
        let mut put = |values: Vec<f64>| -> Result<()> {
            // column_names() always yields one name per output series
            if let Some(name) = names.next() {
                out.insert(name, values)?;
            }
            Ok(())
        };

        match *self {
            IndicatorSpec::Sma { window } => put(engine.sma(window)?),
            IndicatorSpec::Ema { span, lookback } => put(if lookback {
                engine.ema_with_lookback(span)?
            } else {
                engine.ema(span)?
            }),
            IndicatorSpec::Rsi { periods } => put(engine.rsi(periods)?),
            IndicatorSpec::Wma { window } => put(engine.wma(window)?),
            IndicatorSpec::Hma { window } => put(engine.hma(window)?),
            IndicatorSpec::Envelopes {
                window,
                percentage,
                ma_type,
            } => {
                let env = engine.envelopes(window, percentage, ma_type)?;
                put(env.upper)?;
                put(env.lower)
            }
            IndicatorSpec::StochRsi {
                periods,
                smooth_k,
                smooth_d,
            } => {
                let s = engine.stoch_rsi(periods, smooth_k, smooth_d)?;
                put(s.k)?;
                put(s.d)
            }
        }
    }
}

/// Compute a whole battery into a fresh [`IndicatorSet`].
///
/// Stops at the first failing spec; a later spec with the same column name
/// overwrites an earlier one.
pub fn compute_all(engine: &IndicatorEngine<'_>, specs: &[IndicatorSpec]) -> Result<IndicatorSet> {
    let mut set = IndicatorSet::new(engine.len());
    for spec in specs {
        spec.compute_into(engine, &mut set)?;
    }
    Ok(set)
}
