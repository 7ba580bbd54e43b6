//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::candle::Candle;

/// Calculate the latest EMA for a specific period.
///
/// Smoothing constant 2/(period+1), seeded by the simple moving average
/// of the first `period` closes.
pub fn calculate_ema(candles: &[Candle], period: usize) -> Option<f64> {
    if candles.len() < period {
        return None;
    }
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    math::ema(&closes, period)
}
