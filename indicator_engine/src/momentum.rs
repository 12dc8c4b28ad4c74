//! Momentum oscillators: RSI and stochastic RSI.

use crate::error::{Result, ensure_window};
use crate::rolling::{diff, rolling_max, rolling_mean, rolling_min};

/// Default RSI lookback.
pub const DEFAULT_RSI_PERIODS: usize = 14;

/// Relative strength index using simple rolling means of gains and losses.
///
/// Undefined for the first `periods` positions (the first delta does not
/// exist). A window with no losses reports 100.
pub fn rsi(close: &[f64], periods: usize) -> Result<Vec<f64>> {
    ensure_window("RSI", "periods", periods, 1)?;

    let delta = diff(close);
    // NaN stays NaN through both clips.
    let gain: Vec<f64> = delta.iter().map(|&d| if d < 0.0 { 0.0 } else { d }).collect();
    let loss: Vec<f64> = delta.iter().map(|&d| if d > 0.0 { 0.0 } else { -d }).collect();

    let avg_gain = rolling_mean(&gain, periods);
    let avg_loss = rolling_mean(&loss, periods);

    let out = avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&g, &l)| {
            if g.is_nan() || l.is_nan() {
                f64::NAN
            } else if l == 0.0 {
                100.0
            } else {
                100.0 - 100.0 / (1.0 + g / l)
            }
        })
        .collect();
    Ok(out)
}

/// %K and %D lines of the stochastic RSI.
#[derive(Debug, Clone, PartialEq)]
pub struct StochRsi {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
}

/// Stochastic oscillator applied to RSI.
///
/// `(rsi - min) / (max - min)` over a trailing `periods` window, undefined
/// when the window is flat. %K is its `smooth_k` mean scaled to 0..100 and %D
/// is the `smooth_d` mean of %K.
pub fn stoch_rsi(
    close: &[f64],
    periods: usize,
    smooth_k: usize,
    smooth_d: usize,
) -> Result<StochRsi> {
    ensure_window("StochRSI", "periods", periods, 1)?;
    ensure_window("StochRSI", "smooth_k", smooth_k, 1)?;
    ensure_window("StochRSI", "smooth_d", smooth_d, 1)?;

    let rsi = rsi(close, periods)?;
    let lo = rolling_min(&rsi, periods);
    let hi = rolling_max(&rsi, periods);

    let stoch: Vec<f64> = rsi
        .iter()
        .zip(lo.iter().zip(&hi))
        .map(|(&r, (&lo, &hi))| {
            let range = hi - lo;
            if range == 0.0 || range.is_nan() {
                f64::NAN
            } else {
                (r - lo) / range
            }
        })
        .collect();

    let k: Vec<f64> = rolling_mean(&stoch, smooth_k)
        .into_iter()
        .map(|v| v * 100.0)
        .collect();
    let d = rolling_mean(&k, smooth_d);
    Ok(StochRsi { k, d })
}
