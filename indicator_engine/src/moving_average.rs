//! Moving averages over arbitrary `f64` series.
//!
//! These are free functions so they compose: HMA is WMA applied to a
//! combination of two other WMAs, with every intermediate passed explicitly.

use crate::error::{IndicatorError, Result, ensure_window};
use crate::rolling::rolling_mean;

/// Simple moving average over the trailing `window` values.
///
/// The first `window - 1` outputs are `NaN`.
pub fn sma(values: &[f64], window: usize) -> Result<Vec<f64>> {
    ensure_window("SMA", "window", window, 1)?;
    Ok(rolling_mean(values, window))
}

/// Exponential moving average with `alpha = 2 / (span + 1)`.
///
/// The recursion starts from the first finite value (`y0 = x0`), so there is
/// no warm-up: early values lean towards the first observation. Leading `NaN`
/// inputs stay `NaN`; an interior `NaN` repeats the previous average.
pub fn ema(values: &[f64], span: usize) -> Result<Vec<f64>> {
    ensure_window("EMA", "span", span, 1)?;
    let alpha = 2.0 / (span as f64 + 1.0);

    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &x in values {
        let next = match (prev, x.is_nan()) {
            (None, true) => None,
            (None, false) => Some(x),
            (Some(p), true) => Some(p),
            (Some(p), false) => Some(alpha * x + (1.0 - alpha) * p),
        };
        out.push(next.unwrap_or(f64::NAN));
        prev = next;
    }
    Ok(out)
}

/// [`ema`] with the first `span - 1` outputs masked as undefined.
pub fn ema_with_lookback(values: &[f64], span: usize) -> Result<Vec<f64>> {
    let mut out = ema(values, span)?;
    out.iter_mut().take(span - 1).for_each(|v| *v = f64::NAN);
    Ok(out)
}

/// Linearly weighted moving average.
///
/// Inside each window the oldest value has weight 1 and the newest has weight
/// `window`; the sum is normalised by `window * (window + 1) / 2`.
pub fn wma(values: &[f64], window: usize) -> Result<Vec<f64>> {
    ensure_window("WMA", "window", window, 1)?;
    let w = window as f64;
    let weight_sum = w * (w + 1.0) / 2.0;

    let out = (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return f64::NAN;
            }
            let start = i + 1 - window;
            values[start..=i]
                .iter()
                .enumerate()
                .map(|(j, v)| (j + 1) as f64 * v)
                .sum::<f64>()
                / weight_sum
        })
        .collect();
    Ok(out)
}

/// Hull moving average.
///
/// `WMA(floor(sqrt(window)))` of `2 * WMA(window / 2) - WMA(window)`.
/// Needs `window >= 4` so the half window is at least 2.
pub fn hma(values: &[f64], window: usize) -> Result<Vec<f64>> {
    if window < 4 {
        return Err(IndicatorError::invalid(format!(
            "HMA requires window >= 4, got {window}"
        )));
    }
    let half = window / 2;
    let root = (window as f64).sqrt().floor() as usize;

    let fast = wma(values, half)?;
    let slow = wma(values, window)?;
    let raw: Vec<f64> = fast
        .iter()
        .zip(&slow)
        .map(|(f, s)| 2.0 * f - s)
        .collect();
    wma(&raw, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sma_matches_hand_computed() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 2).unwrap();
        assert!(out[0].is_nan());
        assert_eq!(&out[1..], &[1.5, 2.5, 3.5, 4.5]);
    }

    #[test]
    fn zero_window_is_invalid() {
        assert!(matches!(sma(&[1.0], 0), Err(IndicatorError::InvalidInput { .. })));
        assert!(matches!(ema(&[1.0], 0), Err(IndicatorError::InvalidInput { .. })));
        assert!(matches!(wma(&[1.0], 0), Err(IndicatorError::InvalidInput { .. })));
    }

    #[test]
    fn ema_seeds_from_first_close() {
        // span 3 => alpha 0.5
        let out = ema(&[10.0, 20.0, 20.0], 3).unwrap();
        assert_relative_eq!(out[0], 10.0);
        assert_relative_eq!(out[1], 15.0);
        assert_relative_eq!(out[2], 17.5);
    }

    #[test]
    fn ema_skips_leading_nan_and_holds_over_gaps() {
        let out = ema(&[f64::NAN, 4.0, f64::NAN, 8.0], 3).unwrap();
        assert!(out[0].is_nan());
        assert_relative_eq!(out[1], 4.0);
        assert_relative_eq!(out[2], 4.0);
        assert_relative_eq!(out[3], 6.0);
    }

    #[test]
    fn ema_lookback_masks_warmup() {
        let out = ema_with_lookback(&[1.0, 2.0, 3.0, 4.0], 3).unwrap();
        assert!(out[0].is_nan() && out[1].is_nan());
        assert!(out[2].is_finite());
    }

    #[test]
    fn wma_weights_newest_highest() {
        let out = wma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        assert!(out[1].is_nan());
        assert_relative_eq!(out[2], 14.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(out[3], 20.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn wma_huge_window_is_undefined_not_a_panic() {
        let out = wma(&[1.0, 2.0, 3.0], usize::MAX).unwrap();
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn hma_rejects_small_windows() {
        for w in 0..4 {
            assert!(matches!(
                hma(&[1.0; 10], w),
                Err(IndicatorError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn hma_warmup_and_linear_tracking() {
        // window 4: half 2, root 2. slow WMA fills at index 3, final WMA at 4.
        let values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let out = hma(&values, 4).unwrap();
        assert!(out[..4].iter().all(|v| v.is_nan()));
        // On a straight line the Hull average removes the lag entirely.
        for (i, v) in out.iter().enumerate().skip(4) {
            assert_relative_eq!(*v, i as f64, epsilon = 1e-9);
        }
    }
}
