//! Signal engine façade
//!
//! Ties the cache, indicator engine, pattern detector, scorer and risk
//! calculator together. One `evaluate` call per monitored pair per
//! cycle; the reference bias is computed once per cycle and passed in
//! explicitly so every pair sees the same value.

use std::sync::Arc;

use chrono::{Timelike, Utc};
use tracing::{debug, info, warn};

use crate::alerts::AlertSink;
use crate::config::Config;
use crate::error::MarketDataError;
use crate::indicators;
use crate::models::signal::{Signal, TrendBias};
use crate::patterns;
use crate::risk;
use crate::services::cache::MarketDataCache;
use crate::services::market_data::CandleProvider;
use crate::signals::scorer::{self, ScoreInput};
use crate::signals::trend;

pub struct SignalEngine<P: CandleProvider> {
    cache: MarketDataCache<P>,
    config: Arc<Config>,
}

/// Outcome counts for one evaluation cycle.
#[derive(Debug, Default, Clone, Copy)]
pub struct CycleSummary {
    pub evaluated: usize,
    pub skipped: usize,
    pub signals: usize,
}

impl<P: CandleProvider> SignalEngine<P> {
    pub fn new(cache: MarketDataCache<P>, config: Arc<Config>) -> Self {
        Self { cache, config }
    }

    /// Compute the market-wide bias from the reference asset. Called
    /// once per cycle; the result is shared by every pair evaluation.
    pub async fn reference_bias(&self) -> Result<TrendBias, MarketDataError> {
        let series = self
            .cache
            .get_series(
                &self.config.reference_pair,
                self.config.trend_timeframe,
                self.config.min_candles,
            )
            .await?;
        let snapshot = indicators::snapshot(&series, &self.config.indicators);
        Ok(trend::reference_bias(&snapshot))
    }

    /// Evaluate one pair against the shared reference bias. Returns
    /// `Ok(None)` when no qualified signal emerges.
    pub async fn evaluate(
        &self,
        pair: &str,
        bias: TrendBias,
    ) -> Result<Option<Signal>, MarketDataError> {
        let entry_series = self
            .cache
            .get_series(pair, self.config.entry_timeframe, self.config.min_candles)
            .await?;
        let trend_series = self
            .cache
            .get_series(pair, self.config.trend_timeframe, self.config.min_candles)
            .await?;

        if entry_series.len() < self.config.min_candles
            || trend_series.len() < self.config.min_candles
        {
            debug!(
                pair = %pair,
                entry_len = entry_series.len(),
                trend_len = trend_series.len(),
                min = self.config.min_candles,
                "not enough history to evaluate"
            );
            return Ok(None);
        }

        let entry_snapshot = indicators::snapshot(&entry_series, &self.config.indicators);
        let trend_snapshot = indicators::snapshot(&trend_series, &self.config.indicators);
        let pattern = patterns::detect(&entry_series);

        let input = ScoreInput {
            pair,
            entry: &entry_snapshot,
            trend: &trend_snapshot,
            pattern,
            bias,
            utc_hour: Utc::now().hour(),
        };
        let state = scorer::evaluate(&input, &self.config.scoring);

        let qualified = match state.qualified() {
            Some(score) => score.clone(),
            None => return Ok(None),
        };

        let atr = match entry_snapshot.atr {
            Some(atr) if atr > 0.0 => atr,
            _ => {
                warn!(pair = %pair, "qualified signal without usable ATR, dropping");
                return Ok(None);
            }
        };

        let outcome = risk::derive(
            qualified.direction,
            entry_snapshot.close,
            atr,
            &self.config.risk,
        );

        let signal = Signal {
            pair: pair.to_string(),
            direction: qualified.direction,
            score: qualified.score,
            reasons: qualified.reasons,
            entry_price: entry_snapshot.close,
            stop_loss: outcome.stop_loss,
            take_profit_levels: outcome.take_profit_levels,
            position_size_usdt: outcome.position_size_usdt,
            leverage: self.config.risk.leverage,
            timestamp: Utc::now(),
        };

        info!(
            pair = %pair,
            direction = ?signal.direction,
            score = signal.score,
            entry = signal.entry_price,
            stop = signal.stop_loss,
            "qualified signal"
        );

        Ok(Some(signal))
    }

    /// Run one full evaluation cycle over the monitored pairs. A single
    /// pair's failure is logged and skipped; it never fails the cycle.
    pub async fn run_cycle(&self, sink: &dyn AlertSink) -> CycleSummary {
        let mut summary = CycleSummary::default();

        let bias = match self.reference_bias().await {
            Ok(bias) => bias,
            Err(e) => {
                warn!(
                    reference = %self.config.reference_pair,
                    error = %e,
                    "reference trend unavailable, skipping cycle"
                );
                summary.skipped = self.config.monitored_pairs.len();
                return summary;
            }
        };
        debug!(direction = ?bias.direction, strength = bias.strength, "reference bias");

        for pair in &self.config.monitored_pairs {
            match self.evaluate(pair, bias).await {
                Ok(Some(signal)) => {
                    summary.evaluated += 1;
                    summary.signals += 1;
                    if let Err(e) = sink.send(&signal).await {
                        warn!(pair = %pair, error = %e, "alert delivery failed");
                    }
                }
                Ok(None) => {
                    summary.evaluated += 1;
                }
                Err(MarketDataError::RateLimited { retry_after }) => {
                    summary.skipped += 1;
                    warn!(
                        pair = %pair,
                        retry_after_ms = retry_after.as_millis() as u64,
                        "rate budget exhausted, deferring pair to next cycle"
                    );
                }
                Err(e) => {
                    summary.skipped += 1;
                    warn!(pair = %pair, error = %e, "pair evaluation failed, continuing");
                }
            }
        }

        self.cache.purge_idle().await;

        info!(
            evaluated = summary.evaluated,
            skipped = summary.skipped,
            signals = summary.signals,
            "cycle complete"
        );
        summary
    }
}
