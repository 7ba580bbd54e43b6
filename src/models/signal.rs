//! Signal data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trade direction of a qualified signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Long => Direction::Short,
            Direction::Short => Direction::Long,
        }
    }
}

/// Directional reading of a pattern or trend bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    Bullish,
    Bearish,
    Neutral,
}

impl Polarity {
    /// Whether this polarity confirms the given trade direction.
    pub fn confirms(&self, direction: Direction) -> bool {
        matches!(
            (self, direction),
            (Polarity::Bullish, Direction::Long) | (Polarity::Bearish, Direction::Short)
        )
    }

    /// Whether this polarity strictly opposes the given trade direction.
    pub fn opposes(&self, direction: Direction) -> bool {
        matches!(
            (self, direction),
            (Polarity::Bearish, Direction::Long) | (Polarity::Bullish, Direction::Short)
        )
    }
}

/// Market-wide bias derived from the reference asset, shared read-only
/// by every pair evaluation in the same cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendBias {
    pub direction: Polarity,
    pub strength: f64,
}

impl TrendBias {
    pub fn neutral() -> Self {
        Self {
            direction: Polarity::Neutral,
            strength: 0.0,
        }
    }
}

/// Fully-derived trading signal, ready for the alerting collaborator.
///
/// Immutable once built; corrections require producing a new signal.
/// `position_size_usdt` is `None` when sizing failed with
/// `InsufficientMargin` — the signal is still emitted, never dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub pair: String,
    pub direction: Direction,
    pub score: u8,
    pub reasons: Vec<String>,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit_levels: Vec<f64>,
    pub position_size_usdt: Option<f64>,
    pub leverage: u32,
    pub timestamp: DateTime<Utc>,
}
