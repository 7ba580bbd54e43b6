//! Market data provider interface and the MEXC kline client

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::MarketDataError;
use crate::models::candle::{Candle, CandleSeries, Timeframe};

/// Exchange transport collaborator. The cache maps every failure from
/// this trait to `DataUnavailable` after its retry budget is spent.
#[async_trait]
pub trait CandleProvider: Send + Sync {
    /// Fetch up to `limit` most recent candles for a pair/timeframe.
    async fn fetch_candles(
        &self,
        pair: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries, MarketDataError>;
}

/// Client for the public MEXC contract kline endpoint.
pub struct MexcKlineClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct KlineResponse {
    success: bool,
    #[serde(default)]
    data: Option<Vec<Vec<f64>>>,
}

impl MexcKlineClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, MarketDataError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("sigmex/0.1")
            .build()
            .map_err(|e| MarketDataError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl CandleProvider for MexcKlineClient {
    async fn fetch_candles(
        &self,
        pair: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries, MarketDataError> {
        let end = Utc::now().timestamp_millis();
        let start = end - (limit as i64) * timeframe.duration().as_millis() as i64;
        let url = format!("{}/api/v1/contract/kline", self.base_url);

        debug!(pair = %pair, timeframe = %timeframe, limit, "fetching klines");

        let start = start.to_string();
        let end = end.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("symbol", pair),
                ("interval", timeframe.interval()),
                ("start", start.as_str()),
                ("end", end.as_str()),
            ])
            .send()
            .await
            .map_err(|e| MarketDataError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MarketDataError::Transport(format!(
                "kline request returned HTTP {}",
                response.status()
            )));
        }

        let body: KlineResponse = response
            .json()
            .await
            .map_err(|e| MarketDataError::Transport(e.to_string()))?;

        let rows = match body.data {
            Some(rows) if body.success && !rows.is_empty() => rows,
            _ => {
                return Err(MarketDataError::DataUnavailable {
                    pair: pair.to_string(),
                    timeframe,
                })
            }
        };

        let mut candles = Vec::with_capacity(rows.len());
        for row in rows {
            candles.push(parse_row(pair, &row)?);
        }

        CandleSeries::new(pair, timeframe, candles)
    }
}

/// Kline rows arrive as `[timestamp_s, open, high, low, close, volume]`.
fn parse_row(pair: &str, row: &[f64]) -> Result<Candle, MarketDataError> {
    if row.len() < 6 {
        return Err(MarketDataError::Transport(format!(
            "kline row for {pair} has {} fields, expected 6",
            row.len()
        )));
    }
    let open_time: DateTime<Utc> = DateTime::from_timestamp(row[0] as i64, 0).ok_or_else(|| {
        MarketDataError::Transport(format!("kline row for {pair} has invalid timestamp"))
    })?;
    Ok(Candle::new(
        open_time, row[1], row[2], row[3], row[4], row[5],
    ))
}
