//! Unit tests for RSI

use crate::test_utils::{flat_candles, series_from, uptrend_candles};
use sigmex::indicators::momentum::rsi::calculate_rsi;

#[test]
fn requires_period_plus_one_candles() {
    let candles = uptrend_candles(14);
    assert!(calculate_rsi(&candles, 14).is_none());
    let candles = uptrend_candles(15);
    assert!(calculate_rsi(&candles, 14).is_some());
}

#[test]
fn all_gains_saturate_at_100() {
    let candles = uptrend_candles(60);
    let rsi = calculate_rsi(&candles, 14).unwrap();
    assert_eq!(rsi, 100.0);
}

#[test]
fn all_losses_saturate_at_0() {
    let candles = crate::test_utils::downtrend_candles(60);
    let rsi = calculate_rsi(&candles, 14).unwrap();
    assert!(rsi.abs() < 1e-9);
}

#[test]
fn flat_series_reads_neutral() {
    let candles = flat_candles(60, 100.0);
    assert_eq!(calculate_rsi(&candles, 14), Some(50.0));
}

#[test]
fn stays_within_bounds_on_mixed_series() {
    let candles: Vec<_> = (0..80)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.9).sin() * 3.0;
            crate::test_utils::candle(i, close - 0.1, close + 0.2, close - 0.3, close, 1000.0)
        })
        .collect();
    let rsi = calculate_rsi(&candles, 14).unwrap();
    assert!((0.0..=100.0).contains(&rsi));
}

#[test]
fn mirrored_series_is_complementary() {
    // Price-mirroring swaps gains and losses, so RSI and its mirror
    // sum to 100 under Wilder's smoothing.
    let candles: Vec<_> = (0..80)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.9).sin() * 3.0 + i as f64 * 0.01;
            crate::test_utils::candle(i, close, close, close, close, 1000.0)
        })
        .collect();
    let mirrored: Vec<_> = candles
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let close = 200.0 - c.close;
            crate::test_utils::candle(i, close, close, close, close, 1000.0)
        })
        .collect();

    let rsi = calculate_rsi(&candles, 14).unwrap();
    let rsi_mirrored = calculate_rsi(&mirrored, 14).unwrap();
    assert!((rsi + rsi_mirrored - 100.0).abs() < 1e-9);
}

#[test]
fn deterministic_bit_for_bit() {
    let series = series_from(uptrend_candles(100));
    let a = calculate_rsi(series.candles(), 7).unwrap();
    let b = calculate_rsi(series.candles(), 7).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
}
