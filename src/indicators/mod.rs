//! Indicator engine: pure functions from a candle series to an
//! `IndicatorSnapshot`.
//!
//! Indicators whose lookback exceeds the available history are omitted
//! from the snapshot instead of raising; callers treat missing values
//! as non-confirming.

pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

use crate::common::math;
use crate::config::IndicatorParams;
use crate::models::candle::CandleSeries;
use crate::models::indicators::{IndicatorSnapshot, RsiValue};

/// Compute the full indicator snapshot for a series.
///
/// Stateless and deterministic: the same series and parameters always
/// produce bit-identical output.
pub fn snapshot(series: &CandleSeries, params: &IndicatorParams) -> IndicatorSnapshot {
    let candles = series.candles();
    let last = match candles.last() {
        Some(c) => c,
        None => return IndicatorSnapshot::bare(0.0, 0.0),
    };

    let mut snap = IndicatorSnapshot::bare(last.close, last.volume);

    snap.rsi_short =
        momentum::rsi::calculate_rsi(candles, params.rsi_short_period).map(|value| RsiValue {
            value,
            period: params.rsi_short_period,
        });
    snap.rsi_long =
        momentum::rsi::calculate_rsi(candles, params.rsi_long_period).map(|value| RsiValue {
            value,
            period: params.rsi_long_period,
        });
    snap.ema_fast = trend::ema::calculate_ema(candles, params.ema_fast_period);
    snap.ema_slow = trend::ema::calculate_ema(candles, params.ema_slow_period);
    snap.macd = momentum::macd::calculate_macd(
        candles,
        params.macd_fast_period,
        params.macd_slow_period,
        params.macd_signal_period,
    );
    snap.obv = volume::obv::calculate_obv(candles);
    snap.obv_slope = volume::obv::obv_slope(candles, params.obv_slope_lookback);
    snap.atr = volatility::atr::calculate_atr(candles, params.atr_period);
    snap.bollinger = volatility::bollinger::calculate_bollinger_bands(
        candles,
        params.bollinger_period,
        params.bollinger_std_dev,
    );

    // Rolling average excludes the current candle so a spike is judged
    // against preceding activity only.
    if candles.len() > params.volume_lookback {
        let volumes = series.volumes();
        let prior = &volumes[..volumes.len() - 1];
        snap.volume_avg = math::sma(prior, params.volume_lookback);
        if let Some(avg) = snap.volume_avg {
            snap.volume_spike = avg > 0.0 && last.volume >= params.volume_spike_multiplier * avg;
        }
    }

    snap
}
