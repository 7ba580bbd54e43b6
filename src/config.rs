//! Engine configuration
//!
//! All tunables are injected at construction and never re-read
//! mid-cycle. `Config::from_env` applies environment overrides on top
//! of the defaults; unset variables fall back silently.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use crate::models::candle::Timeframe;

/// Deployment environment, used to pick the log format.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "development".to_string())
}

/// Indicator lookbacks and thresholds.
#[derive(Debug, Clone)]
pub struct IndicatorParams {
    pub rsi_short_period: usize,
    pub rsi_long_period: usize,
    pub ema_fast_period: usize,
    pub ema_slow_period: usize,
    pub macd_fast_period: usize,
    pub macd_slow_period: usize,
    pub macd_signal_period: usize,
    pub atr_period: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub volume_lookback: usize,
    pub volume_spike_multiplier: f64,
    pub obv_slope_lookback: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_short_period: 7,
            rsi_long_period: 14,
            ema_fast_period: 20,
            ema_slow_period: 50,
            macd_fast_period: 12,
            macd_slow_period: 26,
            macd_signal_period: 9,
            atr_period: 14,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            volume_lookback: 20,
            volume_spike_multiplier: 2.0,
            obv_slope_lookback: 5,
        }
    }
}

/// Confluence scoring thresholds.
#[derive(Debug, Clone)]
pub struct ScoringParams {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub min_score: u8,
    /// UTC hours with historically better liquidity; matching the
    /// current hour earns a bonus point.
    pub priority_hours: Vec<u32>,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            min_score: 4,
            priority_hours: vec![0, 6, 13],
        }
    }
}

/// Stop-loss, take-profit and sizing parameters.
#[derive(Debug, Clone)]
pub struct RiskParams {
    pub atr_multiplier: f64,
    pub fibonacci_ratios: Vec<f64>,
    pub leverage: u32,
    pub position_size_percent: f64,
    pub account_margin_usdt: f64,
    pub min_notional_usdt: f64,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            atr_multiplier: 1.5,
            fibonacci_ratios: vec![0.382, 0.618, 1.0],
            leverage: 7,
            position_size_percent: 1.0,
            account_margin_usdt: 1000.0,
            min_notional_usdt: 1.0,
        }
    }
}

/// Market-data cache and rate-budget parameters.
#[derive(Debug, Clone)]
pub struct MarketDataParams {
    pub base_url: String,
    /// Requests allowed per rolling window, shared across all pairs.
    pub rate_limit_requests: usize,
    pub rate_limit_window: Duration,
    pub fetch_timeout: Duration,
    pub fetch_retries: usize,
    /// Entries untouched for this long are purged.
    pub idle_eviction: Duration,
    /// Per-timeframe freshness overrides; timeframes not listed use
    /// `Timeframe::default_freshness`.
    pub freshness_overrides: HashMap<Timeframe, Duration>,
    /// Candles requested per fetch.
    pub candle_limit: usize,
}

impl MarketDataParams {
    pub fn freshness(&self, timeframe: Timeframe) -> Duration {
        self.freshness_overrides
            .get(&timeframe)
            .copied()
            .unwrap_or_else(|| timeframe.default_freshness())
    }
}

impl Default for MarketDataParams {
    fn default() -> Self {
        Self {
            base_url: "https://contract.mexc.com".to_string(),
            rate_limit_requests: 20,
            rate_limit_window: Duration::from_secs(2),
            fetch_timeout: Duration::from_secs(10),
            fetch_retries: 3,
            idle_eviction: Duration::from_secs(3600),
            freshness_overrides: HashMap::new(),
            candle_limit: 100,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub monitored_pairs: Vec<String>,
    pub reference_pair: String,
    /// Timeframe the entry conditions are confirmed on.
    pub entry_timeframe: Timeframe,
    /// Timeframe the EMA trend and reference bias are read from.
    pub trend_timeframe: Timeframe,
    /// Minimum candles required before a pair is evaluated.
    pub min_candles: usize,
    pub evaluation_interval: Duration,
    pub indicators: IndicatorParams,
    pub scoring: ScoringParams,
    pub risk: RiskParams,
    pub market_data: MarketDataParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            monitored_pairs: vec![
                "BTC_USDT".to_string(),
                "ETH_USDT".to_string(),
                "SOL_USDT".to_string(),
            ],
            reference_pair: "BTC_USDT".to_string(),
            entry_timeframe: Timeframe::M1,
            trend_timeframe: Timeframe::M5,
            min_candles: 50,
            evaluation_interval: Duration::from_secs(300),
            indicators: IndicatorParams::default(),
            scoring: ScoringParams::default(),
            risk: RiskParams::default(),
            market_data: MarketDataParams::default(),
        }
    }
}

impl Config {
    /// Build a config from environment variables, falling back to the
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(pairs) = env::var("SIGMEX_PAIRS") {
            let pairs: Vec<String> = pairs
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
            if !pairs.is_empty() {
                config.monitored_pairs = pairs;
            }
        }
        if let Ok(reference) = env::var("SIGMEX_REFERENCE_PAIR") {
            config.reference_pair = reference;
        }
        if let Some(interval) = parse_env("SIGMEX_EVAL_INTERVAL_SECONDS") {
            config.evaluation_interval = Duration::from_secs(interval);
        }
        if let Some(min_score) = parse_env("SIGMEX_MIN_SCORE") {
            config.scoring.min_score = min_score;
        }
        if let Some(leverage) = parse_env("SIGMEX_LEVERAGE") {
            config.risk.leverage = leverage;
        }
        if let Some(margin) = parse_env("SIGMEX_ACCOUNT_MARGIN_USDT") {
            config.risk.account_margin_usdt = margin;
        }
        if let Ok(base_url) = env::var("MEXC_BASE_URL") {
            config.market_data.base_url = base_url;
        }

        config
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
