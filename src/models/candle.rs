//! Candle and candle-series data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::MarketDataError;

/// Single OHLCV candle. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        open_time: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Absolute size of the candle body.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Full high-to-low range.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Wick below the body.
    pub fn lower_wick(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    /// Wick above the body.
    pub fn upper_wick(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// Supported candle intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    M1,
    M5,
    M15,
    H1,
}

impl Timeframe {
    /// Interval identifier used by the MEXC contract kline endpoint.
    pub fn interval(&self) -> &'static str {
        match self {
            Timeframe::M1 => "Min1",
            Timeframe::M5 => "Min5",
            Timeframe::M15 => "Min15",
            Timeframe::H1 => "Min60",
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            Timeframe::M1 => Duration::from_secs(60),
            Timeframe::M5 => Duration::from_secs(300),
            Timeframe::M15 => Duration::from_secs(900),
            Timeframe::H1 => Duration::from_secs(3600),
        }
    }

    /// How long a cached series for this timeframe stays fresh.
    /// Half the candle interval, so a fresh entry is at most one
    /// half-candle behind the market.
    pub fn default_freshness(&self) -> Duration {
        self.duration() / 2
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.interval())
    }
}

/// Ordered candle sequence for one (pair, timeframe).
///
/// Construction validates that open times are strictly increasing;
/// downstream indicator code relies on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleSeries {
    pair: String,
    timeframe: Timeframe,
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(
        pair: impl Into<String>,
        timeframe: Timeframe,
        candles: Vec<Candle>,
    ) -> Result<Self, MarketDataError> {
        let pair = pair.into();
        for pair_of_candles in candles.windows(2) {
            if pair_of_candles[1].open_time <= pair_of_candles[0].open_time {
                return Err(MarketDataError::MalformedSeries {
                    pair,
                    detail: format!(
                        "open_time not strictly increasing at {}",
                        pair_of_candles[1].open_time
                    ),
                });
            }
        }
        Ok(Self {
            pair,
            timeframe,
            candles,
        })
    }

    pub fn pair(&self) -> &str {
        &self.pair
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Close prices in series order.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Volumes in series order.
    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}
