//! Shared builders for unit tests

use chrono::{DateTime, Utc};
use sigmex::models::candle::{Candle, CandleSeries, Timeframe};

pub const BASE_TS: i64 = 1_700_000_000;

pub fn ts(i: usize) -> DateTime<Utc> {
    DateTime::from_timestamp(BASE_TS + i as i64 * 60, 0).unwrap()
}

pub fn candle(i: usize, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Candle {
    Candle::new(ts(i), open, high, low, close, volume)
}

pub fn series_from(candles: Vec<Candle>) -> CandleSeries {
    CandleSeries::new("BTC_USDT", Timeframe::M1, candles).unwrap()
}

/// Steadily rising closes with rising volume; produces a clean bullish
/// EMA ordering and a positive OBV slope.
pub fn uptrend_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let base = 100.0 + i as f64 * 0.5;
            candle(
                i,
                base,
                base + 0.5,
                base - 0.1,
                base + 0.4,
                1000.0 + i as f64 * 10.0,
            )
        })
        .collect()
}

pub fn downtrend_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let base = 200.0 - i as f64 * 0.5;
            candle(
                i,
                base,
                base + 0.1,
                base - 0.5,
                base - 0.4,
                1000.0 + i as f64 * 10.0,
            )
        })
        .collect()
}

/// Flat closes and flat volume.
pub fn flat_candles(count: usize, price: f64) -> Vec<Candle> {
    (0..count)
        .map(|i| candle(i, price, price, price, price, 1000.0))
        .collect()
}
