//! OBV (On-Balance Volume) indicator

use crate::models::candle::Candle;

/// Cumulative OBV series: volume is added on an up-close, subtracted on
/// a down-close, carried unchanged on a flat close. Starts at zero on
/// the first candle.
pub fn obv_series(candles: &[Candle]) -> Vec<f64> {
    let mut series = Vec::with_capacity(candles.len());
    let mut obv = 0.0;
    for (i, candle) in candles.iter().enumerate() {
        if i > 0 {
            let prev_close = candles[i - 1].close;
            if candle.close > prev_close {
                obv += candle.volume;
            } else if candle.close < prev_close {
                obv -= candle.volume;
            }
        }
        series.push(obv);
    }
    series
}

/// Latest OBV value. Needs at least two candles to carry any
/// directional information.
pub fn calculate_obv(candles: &[Candle]) -> Option<f64> {
    if candles.len() < 2 {
        return None;
    }
    obv_series(candles).last().copied()
}

/// OBV change across the trailing `lookback` candles.
pub fn obv_slope(candles: &[Candle], lookback: usize) -> Option<f64> {
    if lookback == 0 || candles.len() <= lookback {
        return None;
    }
    let series = obv_series(candles);
    let last = *series.last()?;
    let earlier = series[series.len() - 1 - lookback];
    Some(last - earlier)
}
