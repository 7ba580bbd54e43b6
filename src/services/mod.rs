//! Market data acquisition: provider transport, shared rate budget and
//! the freshness-aware cache.

pub mod cache;
pub mod market_data;
pub mod rate_limit;

pub use cache::MarketDataCache;
pub use market_data::{CandleProvider, MexcKlineClient};
pub use rate_limit::RateBudget;
