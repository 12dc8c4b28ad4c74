//! Invariants that must hold for every well-formed close series.

use indexmap::IndexMap;
use indicator_engine::{IndicatorEngine, PriceSeries};
use proptest::prelude::*;

fn close_series(close: Vec<f64>) -> PriceSeries {
    let mut cols = IndexMap::new();
    cols.insert("close".to_string(), close);
    PriceSeries::from_columns(cols).unwrap()
}

fn valid_price() -> impl Strategy<Value = f64> {
    0.01f64..10_000.0
}

fn closes(min: usize, max: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(valid_price(), min..=max)
}

proptest! {
    #[test]
    fn short_series_never_produce_values(
        window in 2usize..30,
        data in closes(0, 29),
    ) {
        prop_assume!(data.len() < window);
        let s = close_series(data);
        let engine = IndicatorEngine::new(&s).unwrap();

        prop_assert!(engine.sma(window).unwrap().iter().all(|v| v.is_nan()));
        prop_assert!(engine.wma(window).unwrap().iter().all(|v| v.is_nan()));
        prop_assert!(engine.ema_with_lookback(window).unwrap().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rsi_is_bounded(periods in 1usize..20, data in closes(1, 200)) {
        let s = close_series(data);
        let out = IndicatorEngine::new(&s).unwrap().rsi(periods).unwrap();
        for v in out.iter().filter(|v| !v.is_nan()) {
            prop_assert!((0.0..=100.0).contains(v), "rsi out of range: {v}");
        }
        prop_assert!(out.iter().take(periods).all(|v| v.is_nan()));
    }

    #[test]
    fn non_decreasing_closes_give_rsi_100(
        start in valid_price(),
        steps in prop::collection::vec(0.0f64..5.0, 5..60),
        periods in 1usize..5,
    ) {
        let mut close = vec![start];
        for s in steps {
            close.push(close[close.len() - 1] + s);
        }
        let series = close_series(close);
        let out = IndicatorEngine::new(&series).unwrap().rsi(periods).unwrap();
        prop_assert!(out.iter().skip(periods).all(|&v| v == 100.0));
    }

    #[test]
    fn wma_of_constant_is_constant(v in valid_price(), len in 1usize..80, window in 1usize..40) {
        let s = close_series(vec![v; len]);
        let out = IndicatorEngine::new(&s).unwrap().wma(window).unwrap();
        for x in out.iter().filter(|x| !x.is_nan()) {
            prop_assert!((x - v).abs() <= v * 1e-12, "wma {x} != {v}");
        }
    }

    #[test]
    fn stoch_rsi_lines_stay_in_percent_range(
        data in closes(30, 150),
        periods in 2usize..10,
        smooth_k in 1usize..5,
        smooth_d in 1usize..5,
    ) {
        let s = close_series(data);
        let out = IndicatorEngine::new(&s).unwrap().stoch_rsi(periods, smooth_k, smooth_d).unwrap();
        let first_k = 2 * periods - 1 + smooth_k - 1;
        prop_assert!(out.k.iter().take(first_k).all(|v| v.is_nan()));
        prop_assert!(out.d.iter().take(first_k + smooth_d - 1).all(|v| v.is_nan()));
        for v in out.k.iter().chain(&out.d).filter(|v| !v.is_nan()) {
            prop_assert!((0.0..=100.0).contains(v));
        }
    }
}
