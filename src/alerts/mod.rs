//! Alerting collaborator interface
//!
//! The engine hands fully populated signals to an `AlertSink`;
//! rendering and delivery (Telegram, email, ...) live behind this
//! trait. `format_signal` produces the plain-text body a sink can ship
//! as-is.

use async_trait::async_trait;
use tracing::info;

use crate::error::AlertError;
use crate::models::signal::{Direction, Signal};

#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send(&self, signal: &Signal) -> Result<(), AlertError>;
}

/// Render the alert body for a signal.
pub fn format_signal(signal: &Signal) -> String {
    let direction = match signal.direction {
        Direction::Long => "LONG",
        Direction::Short => "SHORT",
    };

    let mut lines = vec![
        "ENTRY SIGNAL DETECTED".to_string(),
        String::new(),
        format!("Pair: {}", signal.pair),
        format!("Direction: {direction}"),
        format!("Entry Price: ${:.6}", signal.entry_price),
        format!("Stop Loss: ${:.6}", signal.stop_loss),
        "Take Profit Targets:".to_string(),
    ];
    for (i, level) in signal.take_profit_levels.iter().enumerate() {
        lines.push(format!("  TP{}: ${:.6}", i + 1, level));
    }
    lines.push(format!("Leverage: {}x", signal.leverage));
    lines.push(match signal.position_size_usdt {
        Some(size) => format!("Position Size: {size:.2} USDT"),
        None => "Position Size: unavailable (insufficient margin)".to_string(),
    });
    lines.push(format!("Signal Strength: {}/7", signal.score));
    lines.push("Reasons:".to_string());
    for reason in &signal.reasons {
        lines.push(format!("  - {reason}"));
    }
    lines.push(format!(
        "Time: {}",
        signal.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    lines.join("\n")
}

/// Sink that writes alerts to the structured log. Useful on its own
/// and as the default wiring before a delivery channel is configured.
pub struct LogAlertSink;

#[async_trait]
impl AlertSink for LogAlertSink {
    async fn send(&self, signal: &Signal) -> Result<(), AlertError> {
        info!(
            pair = %signal.pair,
            direction = ?signal.direction,
            score = signal.score,
            "signal alert:\n{}",
            format_signal(signal)
        );
        Ok(())
    }
}
