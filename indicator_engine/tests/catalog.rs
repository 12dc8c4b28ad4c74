use approx::assert_relative_eq;
use chrono::{Duration, TimeZone, Utc};
use indicator_engine::envelope::MaType;
use indicator_engine::spec::compute_all;
use indicator_engine::{Bar, IndicatorEngine, IndicatorError, IndicatorSpec, PriceSeries};

fn bars(closes: &[f64]) -> Vec<Bar> {
    let t0 = Utc.with_ymd_and_hms(2024, 10, 3, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let t = t0 + Duration::minutes(15 * i as i64);
            Bar::new(t, c, c + 1.0, c - 1.0, c, 100.0)
        })
        .collect()
}

#[test]
fn rsi_on_strictly_increasing_closes() {
    let series = PriceSeries::from(bars(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0]).as_slice());
    let rsi = IndicatorEngine::new(&series).unwrap().rsi(3).unwrap();

    assert_eq!(rsi.len(), 7);
    assert!(rsi[0].is_nan());
    assert!(rsi[1].is_nan());
    assert!(rsi[2].is_nan(), "third delta window still contains the undefined first delta");
    assert!(rsi[3..].iter().all(|&v| v == 100.0));
}

#[test]
fn hma_below_four_is_invalid_input() {
    let series = PriceSeries::from(bars(&[1.0; 12]).as_slice());
    let engine = IndicatorEngine::new(&series).unwrap();
    for window in [1, 2, 3] {
        assert!(matches!(engine.hma(window), Err(IndicatorError::InvalidInput { .. })));
    }
    let out = engine.hma(4).unwrap();
    assert!(out[4..].iter().all(|&v| (v - 1.0).abs() < 1e-12));
}

#[test]
fn envelope_bands_use_opposite_signs() {
    let closes: Vec<f64> = (0..30).map(|i| 50.0 + i as f64).collect();
    let series = PriceSeries::from(bars(&closes).as_slice());
    let engine = IndicatorEngine::new(&series).unwrap();

    let sma = engine.sma(10).unwrap();
    let env = engine.envelopes(10, 0.02, MaType::Sma).unwrap();
    for i in 9..30 {
        assert_relative_eq!(env.upper[i], sma[i] * 1.02, epsilon = 1e-9);
        assert_relative_eq!(env.lower[i], sma[i] * 0.98, epsilon = 1e-9);
        assert!(env.upper[i] != env.lower[i]);
    }
}

#[test]
fn default_daily_battery() {
    let closes: Vec<f64> = (0..100)
        .map(|i| 30_000.0 + ((i as f64) / 3.0).sin() * 250.0)
        .collect();
    let series = PriceSeries::from(bars(&closes).as_slice());
    let engine = IndicatorEngine::new(&series).unwrap();
    let specs: Vec<IndicatorSpec> = [3, 5, 8, 13, 21]
        .into_iter()
        .map(|periods| IndicatorSpec::Rsi { periods })
        .collect();

    let set = compute_all(&engine, &specs).unwrap();
    assert_eq!(
        set.names().collect::<Vec<_>>(),
        vec!["RSI_3", "RSI_5", "RSI_8", "RSI_13", "RSI_21"]
    );
    for (name, values) in &set {
        assert_eq!(values.len(), 100, "{name}");
    }
    assert!(set.get("RSI_21").unwrap()[..21].iter().all(|v| v.is_nan()));
    assert!(set.get("RSI_21").unwrap()[21].is_finite());
}
