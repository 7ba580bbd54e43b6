//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::candle::Candle;

/// Calculate ATR with Wilder's smoothing.
///
/// The first ATR is the simple mean of the first `period` true ranges,
/// then atr = (atr * (period - 1) + tr) / period.
pub fn calculate_atr(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period + 1 {
        return None;
    }

    let tr_values: Vec<f64> = (1..candles.len())
        .map(|i| math::true_range(candles[i].high, candles[i].low, candles[i - 1].close))
        .collect();

    let mut atr = tr_values[..period].iter().sum::<f64>() / period as f64;
    for tr in &tr_values[period..] {
        atr = (atr * (period as f64 - 1.0) + tr) / period as f64;
    }
    Some(atr)
}
