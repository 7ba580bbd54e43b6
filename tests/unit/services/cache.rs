//! Unit tests for the market data cache

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sigmex::config::MarketDataParams;
use sigmex::error::MarketDataError;
use sigmex::models::candle::{CandleSeries, Timeframe};
use sigmex::services::cache::MarketDataCache;
use sigmex::services::market_data::CandleProvider;
use sigmex::services::rate_limit::RateBudget;
use tokio::time::Instant;

use crate::test_utils::uptrend_candles;

#[derive(Clone, Default)]
struct MockProvider {
    state: Arc<MockState>,
}

#[derive(Default)]
struct MockState {
    calls: AtomicUsize,
    call_times: Mutex<Vec<Instant>>,
    fail: AtomicBool,
    candles: AtomicUsize,
}

impl MockProvider {
    fn serving(candles: usize) -> Self {
        let provider = Self::default();
        provider.state.candles.store(candles, Ordering::SeqCst);
        provider
    }

    fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    fn set_failing(&self, failing: bool) {
        self.state.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl CandleProvider for MockProvider {
    async fn fetch_candles(
        &self,
        pair: &str,
        timeframe: Timeframe,
        _limit: usize,
    ) -> Result<CandleSeries, MarketDataError> {
        self.state.calls.fetch_add(1, Ordering::SeqCst);
        self.state.call_times.lock().unwrap().push(Instant::now());

        if self.state.fail.load(Ordering::SeqCst) {
            return Err(MarketDataError::Transport("mock transport down".into()));
        }

        let count = self.state.candles.load(Ordering::SeqCst);
        CandleSeries::new(pair, timeframe, uptrend_candles(count))
    }
}

fn params() -> MarketDataParams {
    MarketDataParams {
        fetch_retries: 1,
        ..MarketDataParams::default()
    }
}

fn cache_with(provider: MockProvider, params: MarketDataParams) -> MarketDataCache<MockProvider> {
    let budget = Arc::new(RateBudget::new(
        params.rate_limit_requests,
        params.rate_limit_window,
    ));
    MarketDataCache::new(provider, budget, params)
}

#[tokio::test(start_paused = true)]
async fn fresh_entry_never_touches_the_network() {
    let provider = MockProvider::serving(100);
    let cache = cache_with(provider.clone(), params());

    let first = cache
        .get_series("BTC_USDT", Timeframe::M1, 50)
        .await
        .unwrap();
    let second = cache
        .get_series("BTC_USDT", Timeframe::M1, 50)
        .await
        .unwrap();

    assert_eq!(provider.calls(), 1);
    assert_eq!(first.len(), second.len());
}

#[tokio::test(start_paused = true)]
async fn stale_entry_is_refetched() {
    let provider = MockProvider::serving(100);
    let cache = cache_with(provider.clone(), params());

    cache
        .get_series("BTC_USDT", Timeframe::M1, 50)
        .await
        .unwrap();
    // M1 freshness window is 30s by default.
    tokio::time::advance(Duration::from_secs(31)).await;
    cache
        .get_series("BTC_USDT", Timeframe::M1, 50)
        .await
        .unwrap();

    assert_eq!(provider.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_refetch_serves_previous_entry() {
    let provider = MockProvider::serving(100);
    let cache = cache_with(provider.clone(), params());

    let original = cache
        .get_series("BTC_USDT", Timeframe::M1, 50)
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(31)).await;
    provider.set_failing(true);

    let degraded = cache
        .get_series("BTC_USDT", Timeframe::M1, 50)
        .await
        .expect("previous entry should be served");
    assert_eq!(degraded.len(), original.len());
    assert!(provider.calls() >= 2);
}

#[tokio::test(start_paused = true)]
async fn failure_without_fallback_is_data_unavailable() {
    let provider = MockProvider::serving(100);
    provider.set_failing(true);
    let cache = cache_with(provider.clone(), params());

    let err = cache
        .get_series("BTC_USDT", Timeframe::M1, 50)
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::DataUnavailable { .. }));
}

#[tokio::test(start_paused = true)]
async fn rate_budget_is_never_exceeded() {
    let provider = MockProvider::serving(100);
    let cache = cache_with(provider.clone(), params());

    for i in 0..30 {
        let pair = format!("PAIR{i}_USDT");
        cache.get_series(&pair, Timeframe::M1, 50).await.unwrap();
    }
    assert_eq!(provider.calls(), 30);

    // No 2-second window may contain more than 20 underlying fetches.
    let times = provider.state.call_times.lock().unwrap().clone();
    let window = Duration::from_secs(2);
    for &start in &times {
        let in_window = times
            .iter()
            .filter(|&&t| t >= start && t < start + window)
            .count();
        assert!(in_window <= 20, "{in_window} fetches inside one window");
    }
}

#[tokio::test(start_paused = true)]
async fn exhausted_budget_without_fallback_is_rate_limited() {
    let mut p = params();
    p.rate_limit_requests = 1;
    // Bounded wait shorter than the budget window forces the typed
    // rejection instead of blocking.
    p.fetch_timeout = Duration::from_secs(1);
    let provider = MockProvider::serving(100);
    let cache = cache_with(provider.clone(), p);

    cache
        .get_series("BTC_USDT", Timeframe::M1, 50)
        .await
        .unwrap();

    let err = cache
        .get_series("ETH_USDT", Timeframe::M1, 50)
        .await
        .unwrap_err();
    match err {
        MarketDataError::RateLimited { retry_after } => {
            assert!(retry_after > Duration::ZERO);
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
    assert_eq!(provider.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn idle_entries_are_purged() {
    let provider = MockProvider::serving(100);
    let cache = cache_with(provider.clone(), params());

    cache
        .get_series("BTC_USDT", Timeframe::M1, 50)
        .await
        .unwrap();
    // Default idle eviction is one hour.
    tokio::time::advance(Duration::from_secs(3601)).await;
    assert_eq!(cache.purge_idle().await, 1);

    cache
        .get_series("BTC_USDT", Timeframe::M1, 50)
        .await
        .unwrap();
    assert_eq!(provider.calls(), 2);
}
