//! Cached, rate-limited market data acquisition
//!
//! Sole owner of cached candle series. A fresh entry is served without
//! touching the network; a stale one is refetched through the shared
//! rate budget and replaced atomically (entries hold `Arc` series, so
//! concurrent readers never observe a partial update). On fetch
//! failure the previous entry is served degraded-but-available.

use std::collections::HashMap;
use std::sync::Arc;

use backon::{ExponentialBuilder, Retryable};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::MarketDataParams;
use crate::error::MarketDataError;
use crate::models::candle::{CandleSeries, Timeframe};
use crate::services::market_data::CandleProvider;
use crate::services::rate_limit::RateBudget;

struct CacheEntry {
    series: Arc<CandleSeries>,
    fetched_at: Instant,
    last_access: Instant,
}

pub struct MarketDataCache<P> {
    provider: P,
    budget: Arc<RateBudget>,
    params: MarketDataParams,
    entries: RwLock<HashMap<(String, Timeframe), CacheEntry>>,
}

impl<P: CandleProvider> MarketDataCache<P> {
    pub fn new(provider: P, budget: Arc<RateBudget>, params: MarketDataParams) -> Self {
        Self {
            provider,
            budget,
            params,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Get a candle series, from cache when fresh enough.
    ///
    /// An entry younger than its timeframe's freshness window (and long
    /// enough for `min_candles`) is returned without a network call.
    /// Otherwise a fetch is issued through the shared rate budget with
    /// retries; on failure the previous entry is served if one exists.
    pub async fn get_series(
        &self,
        pair: &str,
        timeframe: Timeframe,
        min_candles: usize,
    ) -> Result<Arc<CandleSeries>, MarketDataError> {
        let key = (pair.to_string(), timeframe);

        {
            let mut entries = self.entries.write().await;
            if let Some(entry) = entries.get_mut(&key) {
                let fresh = entry.fetched_at.elapsed() < self.params.freshness(timeframe);
                if fresh && entry.series.len() >= min_candles {
                    entry.last_access = Instant::now();
                    return Ok(entry.series.clone());
                }
            }
        }

        match self.fetch_with_retries(pair, timeframe).await {
            Ok(series) => {
                let series = Arc::new(series);
                let now = Instant::now();
                let mut entries = self.entries.write().await;
                entries.insert(
                    key,
                    CacheEntry {
                        series: series.clone(),
                        fetched_at: now,
                        last_access: now,
                    },
                );
                Ok(series)
            }
            // Ordering violations are not recoverable through stale
            // data; the pair's evaluation aborts for this cycle.
            Err(e @ MarketDataError::MalformedSeries { .. }) => Err(e),
            Err(e) => {
                let mut entries = self.entries.write().await;
                if let Some(entry) = entries.get_mut(&key) {
                    warn!(
                        pair = %pair,
                        timeframe = %timeframe,
                        error = %e,
                        "fetch failed, serving previous entry"
                    );
                    entry.last_access = Instant::now();
                    return Ok(entry.series.clone());
                }
                match e {
                    MarketDataError::RateLimited { .. } => Err(e),
                    _ => Err(MarketDataError::DataUnavailable {
                        pair: pair.to_string(),
                        timeframe,
                    }),
                }
            }
        }
    }

    /// Purge entries untouched for the configured idle period. Bounds
    /// memory when pairs drop off the monitored list.
    pub async fn purge_idle(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.last_access.elapsed() < self.params.idle_eviction);
        let purged = before - entries.len();
        if purged > 0 {
            debug!(purged, "purged idle cache entries");
        }
        purged
    }

    async fn fetch_with_retries(
        &self,
        pair: &str,
        timeframe: Timeframe,
    ) -> Result<CandleSeries, MarketDataError> {
        let attempt = || async {
            // Every attempt takes its own token so retries also count
            // against the shared budget.
            self.budget
                .acquire_within(self.params.fetch_timeout)
                .await
                .map_err(|retry_after| MarketDataError::RateLimited { retry_after })?;

            tokio::time::timeout(
                self.params.fetch_timeout,
                self.provider
                    .fetch_candles(pair, timeframe, self.params.candle_limit),
            )
            .await
            .map_err(|_| {
                MarketDataError::Transport(format!(
                    "fetch timed out after {:?}",
                    self.params.fetch_timeout
                ))
            })?
        };

        attempt
            .retry(
                ExponentialBuilder::default().with_max_times(self.params.fetch_retries),
            )
            .when(|e| {
                matches!(
                    e,
                    MarketDataError::Transport(_) | MarketDataError::DataUnavailable { .. }
                )
            })
            .await
    }
}
