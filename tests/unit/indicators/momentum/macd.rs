//! Unit tests for MACD

use crate::test_utils::{flat_candles, uptrend_candles};
use sigmex::indicators::momentum::macd::calculate_macd;

#[test]
fn requires_slow_plus_signal_history() {
    // 26 + 9 - 1 = 34 closes needed for the default parameters.
    assert!(calculate_macd(&uptrend_candles(33), 12, 26, 9).is_none());
    assert!(calculate_macd(&uptrend_candles(34), 12, 26, 9).is_some());
}

#[test]
fn flat_series_yields_zero() {
    let macd = calculate_macd(&flat_candles(60, 100.0), 12, 26, 9).unwrap();
    assert!(macd.line.abs() < 1e-9);
    assert!(macd.signal.abs() < 1e-9);
    assert!(macd.histogram.abs() < 1e-9);
}

#[test]
fn uptrend_has_positive_line() {
    let macd = calculate_macd(&uptrend_candles(80), 12, 26, 9).unwrap();
    assert!(macd.line > 0.0);
}

#[test]
fn histogram_is_line_minus_signal() {
    let macd = calculate_macd(&uptrend_candles(80), 12, 26, 9).unwrap();
    assert!((macd.histogram - (macd.line - macd.signal)).abs() < 1e-12);
}
