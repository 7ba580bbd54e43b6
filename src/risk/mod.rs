//! Risk parameter derivation
//!
//! Turns a qualified signal's entry price and ATR into a stop-loss,
//! a Fibonacci take-profit ladder and a position size. Sizing failure
//! is reported, never fatal: the signal is still emitted with the size
//! left unset.

use tracing::warn;

use crate::config::RiskParams;
use crate::error::RiskError;
use crate::models::signal::Direction;

/// Derived risk parameters for one signal.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskOutcome {
    pub stop_loss: f64,
    /// Each level strictly farther from entry than the previous, in
    /// the trade's favorable direction.
    pub take_profit_levels: Vec<f64>,
    /// `None` when sizing failed with `InsufficientMargin`.
    pub position_size_usdt: Option<f64>,
}

/// Derive stop-loss, take-profit ladder and position size.
pub fn derive(
    direction: Direction,
    entry_price: f64,
    atr: f64,
    params: &RiskParams,
) -> RiskOutcome {
    let stop_distance = params.atr_multiplier * atr;

    let (stop_loss, take_profit_levels) = match direction {
        Direction::Long => (
            entry_price - stop_distance,
            params
                .fibonacci_ratios
                .iter()
                .map(|ratio| entry_price + ratio * stop_distance)
                .collect(),
        ),
        Direction::Short => (
            entry_price + stop_distance,
            params
                .fibonacci_ratios
                .iter()
                .map(|ratio| entry_price - ratio * stop_distance)
                .collect(),
        ),
    };

    let position_size_usdt = match position_notional(params) {
        Ok(size) => Some(size),
        Err(e) => {
            warn!(error = %e, "position sizing failed, emitting signal without size");
            None
        }
    };

    RiskOutcome {
        stop_loss,
        take_profit_levels,
        position_size_usdt,
    }
}

/// Leveraged notional from the configured margin slice, floored at the
/// minimum notional.
pub fn position_notional(params: &RiskParams) -> Result<f64, RiskError> {
    let fundable = params.account_margin_usdt * params.leverage as f64;
    if params.min_notional_usdt > fundable {
        return Err(RiskError::InsufficientMargin {
            min_notional: params.min_notional_usdt,
            fundable,
        });
    }

    let raw =
        params.account_margin_usdt * (params.position_size_percent / 100.0) * params.leverage as f64;
    Ok(raw.max(params.min_notional_usdt))
}
