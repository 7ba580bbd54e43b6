//! Sigmex: confluence-based trading signal engine
//!
//! Evaluates streaming market candles for a set of pairs and emits
//! scored trading signals (direction, confidence, entry context, risk
//! parameters) for manual execution. Market data flows through a
//! rate-limited, freshness-aware cache; scoring fuses indicators,
//! candlestick patterns, volume behavior and a reference-asset trend
//! bias.

pub mod alerts;
pub mod common;
pub mod config;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod patterns;
pub mod risk;
pub mod services;
pub mod signals;
