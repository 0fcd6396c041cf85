//! Upstream market data API.

use async_trait::async_trait;
use serde_json::Value;

pub mod coingecko;

pub use coingecko::{ApiError, Coin, MarketSnapshot};

/// The three read-only endpoints the dashboard depends on.
///
/// `CoinGeckoClient` is the production implementation; tests substitute fakes.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Every known coin
    async fn coin_list(&self) -> Result<Vec<Coin>, ApiError>;

    /// Market rows for one coin id (zero or one)
    async fn markets(&self, coin_id: &str) -> Result<Vec<MarketSnapshot>, ApiError>;

    /// Unmodified market chart payload for one coin over `days` days
    async fn market_chart(&self, coin_id: &str, days: u32) -> Result<Value, ApiError>;
}
