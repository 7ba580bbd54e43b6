//! Typed errors for the signal engine
//!
//! Nothing here is fatal to the process: the evaluation loop recovers
//! from every variant and moves on to the next pair.

use std::time::Duration;
use thiserror::Error;

use crate::models::candle::Timeframe;

/// Failures raised by the market-data layer.
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// No usable candle data after retries. The pair is skipped for
    /// this cycle.
    #[error("no usable candle data for {pair} {timeframe}")]
    DataUnavailable { pair: String, timeframe: Timeframe },

    /// Shared rate budget exhausted and no cached fallback exists.
    /// Carries a backoff hint so the caller can defer without spinning.
    #[error("rate budget exhausted, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    /// Upstream transport failure (HTTP status, connect error, decode
    /// error). Recovered at the cache boundary.
    #[error("transport error: {0}")]
    Transport(String),

    /// Candle ordering invariant violated. Aborts evaluation for the
    /// affected pair only.
    #[error("malformed candle series for {pair}: {detail}")]
    MalformedSeries { pair: String, detail: String },
}

/// Risk parameter derivation failures. Reported on the emitted signal,
/// never fatal.
#[derive(Debug, Error)]
pub enum RiskError {
    #[error(
        "insufficient margin: minimum notional {min_notional} exceeds fundable {fundable}"
    )]
    InsufficientMargin { min_notional: f64, fundable: f64 },
}

/// Alert delivery failures from the notification collaborator.
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("alert delivery failed: {0}")]
    Delivery(String),
}
