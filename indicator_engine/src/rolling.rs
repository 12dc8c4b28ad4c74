//! Trailing-window primitives.
//!
//! Every helper here is right-aligned: output `i` is computed from inputs
//! `i + 1 - window ..= i`. Outputs are `NaN` until the window is full, and any
//! `NaN` inside a window makes that output `NaN` as well.

/// Rolling arithmetic mean.
///
/// Each window is summed from scratch so results do not depend on what came
/// before the window.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return vec![f64::NAN; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return f64::NAN;
            }
            // a NaN anywhere in the slice propagates through the sum
            values[i + 1 - window..=i].iter().sum::<f64>() / window as f64
        })
        .collect()
}

/// Rolling minimum.
pub fn rolling_min(values: &[f64], window: usize) -> Vec<f64> {
    rolling_fold(values, window, f64::min)
}

/// Rolling maximum.
pub fn rolling_max(values: &[f64], window: usize) -> Vec<f64> {
    rolling_fold(values, window, f64::max)
}

fn rolling_fold(values: &[f64], window: usize, f: fn(f64, f64) -> f64) -> Vec<f64> {
    if window == 0 {
        return vec![f64::NAN; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return f64::NAN;
            }
            let slice = &values[i + 1 - window..=i];
            if slice.iter().any(|v| v.is_nan()) {
                f64::NAN
            } else {
                slice.iter().copied().reduce(f).unwrap_or(f64::NAN)
            }
        })
        .collect()
}

/// First difference; position 0 is `NaN`.
pub fn diff(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    if !values.is_empty() {
        out.push(f64::NAN);
    }
    out.extend(values.windows(2).map(|w| w[1] - w[0]));
    out
}
