//! Candlestick pattern detection
//!
//! Each pattern is an independent predicate over the last one or two
//! candles. When several match, the winner is resolved through an
//! explicit priority table: engulfing > hammer / inverted hammer >
//! pinbar > doji. Detection is deterministic.

use serde::{Deserialize, Serialize};

use crate::models::candle::{Candle, CandleSeries};
use crate::models::signal::Polarity;

/// Named candlestick patterns this detector recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    BullishEngulfing,
    BearishEngulfing,
    Hammer,
    InvertedHammer,
    BullishPinbar,
    BearishPinbar,
    Doji,
}

impl Pattern {
    pub fn polarity(&self) -> Polarity {
        match self {
            Pattern::BullishEngulfing | Pattern::Hammer | Pattern::BullishPinbar => {
                Polarity::Bullish
            }
            Pattern::BearishEngulfing | Pattern::InvertedHammer | Pattern::BearishPinbar => {
                Polarity::Bearish
            }
            Pattern::Doji => Polarity::Neutral,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::BullishEngulfing => "bullish engulfing",
            Pattern::BearishEngulfing => "bearish engulfing",
            Pattern::Hammer => "hammer",
            Pattern::InvertedHammer => "inverted hammer",
            Pattern::BullishPinbar => "bullish pinbar",
            Pattern::BearishPinbar => "bearish pinbar",
            Pattern::Doji => "doji",
        }
    }
}

/// Dominant pattern for an evaluation, at most one per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternResult {
    pub pattern: Option<Pattern>,
    pub polarity: Polarity,
    pub strength: f64,
}

impl PatternResult {
    pub fn none() -> Self {
        Self {
            pattern: None,
            polarity: Polarity::Neutral,
            strength: 0.0,
        }
    }

    fn detected(pattern: Pattern, strength: f64) -> Self {
        Self {
            pattern: Some(pattern),
            polarity: pattern.polarity(),
            strength: strength.clamp(0.0, 1.0),
        }
    }
}

/// Resolution order when several predicates match.
const PRIORITY: &[Pattern] = &[
    Pattern::BullishEngulfing,
    Pattern::BearishEngulfing,
    Pattern::Hammer,
    Pattern::InvertedHammer,
    Pattern::BullishPinbar,
    Pattern::BearishPinbar,
    Pattern::Doji,
];

/// Classify the most recent candle(s) of a series.
pub fn detect(series: &CandleSeries) -> PatternResult {
    let candles = series.candles();
    let current = match candles.last() {
        Some(c) => c,
        None => return PatternResult::none(),
    };
    let previous = candles.len().checked_sub(2).map(|i| &candles[i]);

    for &pattern in PRIORITY {
        let strength = match pattern {
            Pattern::BullishEngulfing => previous.and_then(|p| bullish_engulfing(p, current)),
            Pattern::BearishEngulfing => previous.and_then(|p| bearish_engulfing(p, current)),
            Pattern::Hammer => hammer(current),
            Pattern::InvertedHammer => inverted_hammer(current),
            Pattern::BullishPinbar => bullish_pinbar(current),
            Pattern::BearishPinbar => bearish_pinbar(current),
            Pattern::Doji => doji(current),
        };
        if let Some(strength) = strength {
            return PatternResult::detected(pattern, strength);
        }
    }

    PatternResult::none()
}

/// Body no larger than 10% of the range. Flat candles count as perfect
/// dojis.
fn doji(candle: &Candle) -> Option<f64> {
    let range = candle.range();
    if range <= 0.0 {
        return Some(1.0);
    }
    let ratio = candle.body() / range;
    (ratio <= 0.1).then(|| 1.0 - ratio / 0.1)
}

/// Lower wick at least twice the body, upper wick at most half of it.
fn hammer(candle: &Candle) -> Option<f64> {
    let body = candle.body();
    if body <= 0.0 {
        return None;
    }
    let matches = candle.lower_wick() >= body * 2.0 && candle.upper_wick() <= body * 0.5;
    // Strength grows with how far the wick exceeds the 2x threshold,
    // saturating at 4x.
    matches.then(|| (candle.lower_wick() / body - 2.0) / 2.0)
}

fn inverted_hammer(candle: &Candle) -> Option<f64> {
    let body = candle.body();
    if body <= 0.0 {
        return None;
    }
    let matches = candle.upper_wick() >= body * 2.0 && candle.lower_wick() <= body * 0.5;
    matches.then(|| (candle.upper_wick() / body - 2.0) / 2.0)
}

/// Current bullish body opens below the prior close and closes above
/// the prior open, fully containing an opposing (bearish) body.
fn bullish_engulfing(prev: &Candle, current: &Candle) -> Option<f64> {
    let matches = prev.is_bearish()
        && current.is_bullish()
        && current.open < prev.close
        && current.close > prev.open;
    matches.then(|| engulfing_strength(prev, current))
}

fn bearish_engulfing(prev: &Candle, current: &Candle) -> Option<f64> {
    let matches = prev.is_bullish()
        && current.is_bearish()
        && current.open > prev.close
        && current.close < prev.open;
    matches.then(|| engulfing_strength(prev, current))
}

fn engulfing_strength(prev: &Candle, current: &Candle) -> f64 {
    let prev_body = prev.body();
    if prev_body <= 0.0 {
        return 1.0;
    }
    // How much larger the engulfing body is than the engulfed one.
    current.body() / prev_body - 1.0
}

/// Lower wick covers at least 60% of the range, body at most 30%,
/// upper wick at most 20%.
fn bullish_pinbar(candle: &Candle) -> Option<f64> {
    let range = candle.range();
    if range <= 0.0 {
        return None;
    }
    let matches = candle.lower_wick() >= range * 0.6
        && candle.body() <= range * 0.3
        && candle.upper_wick() <= range * 0.2;
    matches.then(|| (candle.lower_wick() / range - 0.6) / 0.4)
}

fn bearish_pinbar(candle: &Candle) -> Option<f64> {
    let range = candle.range();
    if range <= 0.0 {
        return None;
    }
    let matches = candle.upper_wick() >= range * 0.6
        && candle.body() <= range * 0.3
        && candle.lower_wick() <= range * 0.2;
    matches.then(|| (candle.upper_wick() / range - 0.6) / 0.4)
}
