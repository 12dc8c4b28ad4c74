//! Technical indicators over in-memory kline series.
//!
//! The crate is pure computation: no I/O, no shared state. Inputs are borrowed
//! `f64` columns, outputs are freshly allocated vectors aligned 1:1 with the
//! input where `NaN` marks positions whose lookback window is not yet full.
//!
//! - [`engine::IndicatorEngine`] binds to a [`models::price_series::PriceSeries`]
//!   and exposes the catalog (SMA, EMA, RSI, WMA, HMA, envelopes, stochastic RSI).
//! - The free functions in [`moving_average`], [`momentum`] and [`envelope`]
//!   accept any series, which is how composite indicators (HMA) are built.
//! - [`set::IndicatorSet`] collects named results against a base length;
//!   [`spec::IndicatorSpec`] describes a battery declaratively.

pub mod engine;
pub mod envelope;
pub mod error;
pub mod models;
pub mod momentum;
pub mod moving_average;
pub mod rolling;
pub mod set;
pub mod spec;

pub use engine::IndicatorEngine;
pub use error::IndicatorError;
pub use models::{bar::Bar, price_series::PriceSeries};
pub use set::IndicatorSet;
pub use spec::IndicatorSpec;
