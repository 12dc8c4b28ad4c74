//! Entry point bound to one price series.

use tracing::debug;

use crate::envelope::{Envelope, MaType, envelopes};
use crate::error::{IndicatorError, Result};
use crate::models::price_series::{CLOSE, PriceSeries};
use crate::momentum::{StochRsi, rsi, stoch_rsi};
use crate::moving_average::{ema, ema_with_lookback, hma, sma, wma};

/// Computes the indicator catalog over one series' `close` column.
///
/// Construction borrows the series and fails when `close` is missing. None of
/// the methods mutate the input; each returns a fresh series aligned 1:1 with
/// it, `NaN` where the lookback is not yet satisfied.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorEngine<'a> {
    close: &'a [f64],
}

impl<'a> IndicatorEngine<'a> {
    pub fn new(series: &'a PriceSeries) -> Result<Self> {
        let close = series.column(CLOSE).ok_or_else(|| IndicatorError::InvalidInput {
            message: "series must contain a 'close' column for indicator calculations".into(),
        })?;
        debug!(rows = close.len(), "indicator engine bound to series");
        Ok(Self { close })
    }

    /// Number of rows every output will have.
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    pub fn close(&self) -> &'a [f64] {
        self.close
    }

    pub fn sma(&self, window: usize) -> Result<Vec<f64>> {
        sma(self.close, window)
    }

    pub fn ema(&self, span: usize) -> Result<Vec<f64>> {
        ema(self.close, span)
    }

    pub fn ema_with_lookback(&self, span: usize) -> Result<Vec<f64>> {
        ema_with_lookback(self.close, span)
    }

    pub fn rsi(&self, periods: usize) -> Result<Vec<f64>> {
        rsi(self.close, periods)
    }

    pub fn wma(&self, window: usize) -> Result<Vec<f64>> {
        wma(self.close, window)
    }

    pub fn hma(&self, window: usize) -> Result<Vec<f64>> {
        hma(self.close, window)
    }

    pub fn envelopes(&self, window: usize, percentage: f64, ma_type: MaType) -> Result<Envelope> {
        envelopes(self.close, window, percentage, ma_type)
    }

    pub fn stoch_rsi(&self, periods: usize, smooth_k: usize, smooth_d: usize) -> Result<StochRsi> {
        stoch_rsi(self.close, periods, smooth_k, smooth_d)
    }
}
