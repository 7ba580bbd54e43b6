//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::candle::Candle;
use crate::models::indicators::MacdValue;

/// Calculate MACD.
///
/// MACD line = EMA(fast) - EMA(slow)
/// Signal = EMA(signal_period) of the MACD line
/// Histogram = MACD - Signal
pub fn calculate_macd(
    candles: &[Candle],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Option<MacdValue> {
    if fast_period >= slow_period {
        return None;
    }
    // Need enough closes for the slow EMA plus `signal_period` MACD
    // points to seed the signal line.
    if candles.len() < slow_period + signal_period - 1 {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    let fast = math::ema_series(&closes, fast_period)?;
    let slow = math::ema_series(&closes, slow_period)?;

    // Both series end at the last close; align them from the point the
    // slow EMA becomes defined.
    let offset = fast.len() - slow.len();
    let macd_line: Vec<f64> = slow
        .iter()
        .zip(fast[offset..].iter())
        .map(|(s, f)| f - s)
        .collect();

    let signal = math::ema(&macd_line, signal_period)?;
    let line = *macd_line.last()?;

    Some(MacdValue {
        line,
        signal,
        histogram: line - signal,
    })
}
