//! RSI (Relative Strength Index) indicator

use crate::models::candle::Candle;

/// Calculate RSI with Wilder's smoothing.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = smoothed average gain / smoothed average loss
///
/// The first averages are seeded by the simple mean of the first
/// `period` gains/losses, then smoothed with the Wilder recurrence
/// avg = (avg * (period - 1) + change) / period.
pub fn calculate_rsi(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period + 1 {
        return None;
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for i in 1..=period {
        let change = candles[i].close - candles[i - 1].close;
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss += change.abs();
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    for i in (period + 1)..candles.len() {
        let change = candles[i].close - candles[i - 1].close;
        let (gain, loss) = if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, change.abs())
        };
        avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
    }

    if avg_loss == 0.0 {
        // No losses: saturated at 100, except a fully flat series
        // which reads neutral.
        return Some(if avg_gain == 0.0 { 50.0 } else { 100.0 });
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}
