//! Indicator snapshot data models

use serde::{Deserialize, Serialize};

/// RSI value together with the period it was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiValue {
    pub value: f64,
    pub period: usize,
}

/// MACD line, signal line and histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdValue {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Bollinger band levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Latest indicator values for one candle series.
///
/// Every indicator is optional: `None` means the series was shorter than
/// that indicator's lookback. Callers must treat a missing value as
/// non-confirming, never as evidence in either direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub volume: f64,
    pub rsi_short: Option<RsiValue>,
    pub rsi_long: Option<RsiValue>,
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    pub macd: Option<MacdValue>,
    pub obv: Option<f64>,
    pub obv_slope: Option<f64>,
    pub atr: Option<f64>,
    pub bollinger: Option<BollingerBands>,
    pub volume_avg: Option<f64>,
    pub volume_spike: bool,
}

impl IndicatorSnapshot {
    /// Snapshot carrying only the last traded price and volume.
    pub fn bare(close: f64, volume: f64) -> Self {
        Self {
            close,
            volume,
            rsi_short: None,
            rsi_long: None,
            ema_fast: None,
            ema_slow: None,
            macd: None,
            obv: None,
            obv_slope: None,
            atr: None,
            bollinger: None,
            volume_avg: None,
            volume_spike: false,
        }
    }
}
