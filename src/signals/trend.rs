//! Reference trend analysis
//!
//! Derives the market-wide bias from the reference asset's snapshot.
//! Computed once per evaluation cycle and passed read-only into every
//! pair evaluation so all pairs see the same bias.

use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::{Polarity, TrendBias};

/// EMA separation (relative to the slow EMA) at which the bias
/// strength saturates.
const FULL_STRENGTH_SEPARATION: f64 = 0.02;

/// Derive the trend bias from the reference asset's indicator snapshot.
///
/// Bullish when EMA-fast > EMA-slow and the OBV slope is non-negative;
/// bearish under the mirrored condition; neutral otherwise or when any
/// required indicator is missing.
pub fn reference_bias(snapshot: &IndicatorSnapshot) -> TrendBias {
    let (ema_fast, ema_slow) = match (snapshot.ema_fast, snapshot.ema_slow) {
        (Some(fast), Some(slow)) if slow > 0.0 => (fast, slow),
        _ => return TrendBias::neutral(),
    };
    let obv_slope = match snapshot.obv_slope {
        Some(slope) => slope,
        None => return TrendBias::neutral(),
    };

    let direction = if ema_fast > ema_slow && obv_slope >= 0.0 {
        Polarity::Bullish
    } else if ema_fast < ema_slow && obv_slope <= 0.0 {
        Polarity::Bearish
    } else {
        return TrendBias::neutral();
    };

    let separation = (ema_fast - ema_slow).abs() / ema_slow;
    let strength = (separation / FULL_STRENGTH_SEPARATION).clamp(0.0, 1.0);

    TrendBias {
        direction,
        strength,
    }
}
