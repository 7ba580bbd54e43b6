//! Unit tests for shared math helpers

use sigmex::common::math;

#[test]
fn sma_of_trailing_window() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(math::sma(&values, 2), Some(4.5));
    assert_eq!(math::sma(&values, 5), Some(3.0));
}

#[test]
fn sma_requires_enough_values() {
    assert_eq!(math::sma(&[1.0, 2.0], 3), None);
    assert_eq!(math::sma(&[1.0], 0), None);
}

#[test]
fn standard_deviation_known_case() {
    // Population sigma of this classic set is exactly 2.
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let sigma = math::standard_deviation(&values, 8).unwrap();
    assert!((sigma - 2.0).abs() < 1e-12);
}

#[test]
fn standard_deviation_of_constant_is_zero() {
    let values = [3.0; 10];
    assert_eq!(math::standard_deviation(&values, 10), Some(0.0));
}

#[test]
fn ema_seeded_by_sma() {
    // Seed = sma([1,2,3]) = 2, k = 0.5: 2 -> 3 -> 4.
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    let series = math::ema_series(&values, 3).unwrap();
    assert_eq!(series, vec![2.0, 3.0, 4.0]);
    assert_eq!(math::ema(&values, 3), Some(4.0));
}

#[test]
fn ema_of_constant_is_constant() {
    let values = [42.0; 30];
    assert_eq!(math::ema(&values, 10), Some(42.0));
}

#[test]
fn ema_requires_enough_values() {
    assert_eq!(math::ema(&[1.0, 2.0], 3), None);
}

#[test]
fn ema_is_deterministic() {
    let values: Vec<f64> = (0..100).map(|i| 100.0 + (i as f64 * 0.7).sin()).collect();
    let a = math::ema(&values, 20).unwrap();
    let b = math::ema(&values, 20).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
fn true_range_covers_gaps() {
    // No gap: plain high-low range.
    assert_eq!(math::true_range(10.0, 9.0, 9.5), 1.0);
    // Gap up: distance from previous close dominates.
    assert_eq!(math::true_range(12.0, 11.5, 10.0), 2.0);
    // Gap down.
    assert_eq!(math::true_range(9.0, 8.5, 10.0), 1.5);
}
