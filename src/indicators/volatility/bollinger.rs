//! Bollinger Bands indicator

use crate::common::math;
use crate::models::candle::Candle;
use crate::models::indicators::BollingerBands;

/// Calculate Bollinger Bands.
///
/// Middle = SMA(period)
/// Upper = Middle + std_dev * σ
/// Lower = Middle - std_dev * σ
pub fn calculate_bollinger_bands(
    candles: &[Candle],
    period: usize,
    std_dev: f64,
) -> Option<BollingerBands> {
    if candles.len() < period {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let middle = math::sma(&closes, period)?;
    let sigma = math::standard_deviation(&closes, period)?;

    Some(BollingerBands {
        upper: middle + std_dev * sigma,
        middle,
        lower: middle - std_dev * sigma,
    })
}
