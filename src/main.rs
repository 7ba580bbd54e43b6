//! Sigmex runner
//!
//! Drives the evaluation loop on a fixed interval: one cycle evaluates
//! every monitored pair against the shared reference bias and hands
//! qualified signals to the alert sink.

use std::sync::Arc;

use dotenvy::dotenv;
use sigmex::alerts::LogAlertSink;
use sigmex::config::{get_environment, Config};
use sigmex::logging;
use sigmex::services::{MarketDataCache, MexcKlineClient, RateBudget};
use sigmex::signals::SignalEngine;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Arc::new(Config::from_env());

    info!("Starting Sigmex signal engine");
    info!(environment = %get_environment(), "Environment");
    info!(
        pairs = ?config.monitored_pairs,
        reference = %config.reference_pair,
        interval_s = config.evaluation_interval.as_secs(),
        min_score = config.scoring.min_score,
        "Configuration loaded"
    );

    let provider = MexcKlineClient::new(
        config.market_data.base_url.clone(),
        config.market_data.fetch_timeout,
    )?;
    let budget = Arc::new(RateBudget::new(
        config.market_data.rate_limit_requests,
        config.market_data.rate_limit_window,
    ));
    let cache = MarketDataCache::new(provider, budget, config.market_data.clone());
    let engine = SignalEngine::new(cache, config.clone());
    let sink = LogAlertSink;

    let mut ticker = tokio::time::interval(config.evaluation_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    info!("Engine started, waiting for first tick (Ctrl+C to stop)");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let summary = engine.run_cycle(&sink).await;
                info!(
                    evaluated = summary.evaluated,
                    skipped = summary.skipped,
                    signals = summary.signals,
                    "tick finished"
                );
            }
            _ = signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
