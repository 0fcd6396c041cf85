use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::api::{ApiError, Coin, MarketDataSource, MarketSnapshot};
use crate::api::coingecko::MarketChartResponse;
use crate::config::Config;
use crate::models::{PriceHistory, PricePoint, MAX_DAYS, MIN_DAYS};
use crate::utils::{Cache, TtlCache};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("❌ Number of days must be between {min} and {max}, got {0}", min = MIN_DAYS, max = MAX_DAYS)]
    InvalidDays(u32),
}

pub type CoinListCache = Box<dyn Cache<(), Arc<Vec<Coin>>>>;
pub type MarketCache = Box<dyn Cache<String, Vec<MarketSnapshot>>>;
pub type HistoryCache = Box<dyn Cache<(String, u32), PriceHistory>>;

/// Memoizing front of a `MarketDataSource`.
///
/// The coin list expires after the configured TTL and every uncached fetch of
/// it waits a fixed courtesy delay first. Market rows and price histories are
/// kept for the whole session, keyed by their arguments.
pub struct MarketDataService {
    source: Arc<dyn MarketDataSource>,
    coin_list_cache: CoinListCache,
    market_cache: MarketCache,
    history_cache: HistoryCache,
    coin_list_delay: Duration,
}

impl MarketDataService {
    pub fn new(source: Arc<dyn MarketDataSource>, config: &Config) -> Self {
        Self::with_caches(
            source,
            Box::new(TtlCache::<(), Arc<Vec<Coin>>>::with_ttl(config.coin_list_ttl)),
            Box::new(TtlCache::<String, Vec<MarketSnapshot>>::session()),
            Box::new(TtlCache::<(String, u32), PriceHistory>::session()),
            config.coin_list_delay,
        )
    }

    pub fn with_caches(
        source: Arc<dyn MarketDataSource>,
        coin_list_cache: CoinListCache,
        market_cache: MarketCache,
        history_cache: HistoryCache,
        coin_list_delay: Duration,
    ) -> Self {
        Self {
            source,
            coin_list_cache,
            market_cache,
            history_cache,
            coin_list_delay,
        }
    }

    /// Every known coin
    pub async fn fetch_coin_list(&self) -> Result<Arc<Vec<Coin>>, DataError> {
        if let Some(coins) = self.coin_list_cache.get(&()) {
            debug!("Coin list cache hit ({} coins)", coins.len());
            return Ok(coins);
        }

        if !self.coin_list_delay.is_zero() {
            debug!("Waiting {}ms before fetching the coin list", self.coin_list_delay.as_millis());
            tokio::time::sleep(self.coin_list_delay).await;
        }

        let coins = Arc::new(self.source.coin_list().await?);
        info!("Fetched coin list: {} coins", coins.len());
        self.coin_list_cache.insert((), coins.clone());
        Ok(coins)
    }

    /// Market rows for one coin, zero or one of them
    pub async fn fetch_market_snapshot(&self, coin_id: &str) -> Result<Vec<MarketSnapshot>, DataError> {
        let key = coin_id.to_string();
        if let Some(rows) = self.market_cache.get(&key) {
            debug!("Market cache hit for {}", coin_id);
            return Ok(rows);
        }

        let rows = self.source.markets(coin_id).await?;
        info!("Fetched market snapshot for {}: {} row(s)", coin_id, rows.len());
        self.market_cache.insert(key, rows.clone());
        Ok(rows)
    }

    /// Price history for one coin over `days` days (1 to 90)
    pub async fn fetch_price_history(&self, coin_id: &str, days: u32) -> Result<PriceHistory, DataError> {
        if !(MIN_DAYS..=MAX_DAYS).contains(&days) {
            return Err(DataError::InvalidDays(days));
        }

        let key = (coin_id.to_string(), days);
        if let Some(history) = self.history_cache.get(&key) {
            debug!("History cache hit for {} over {}d", coin_id, days);
            return Ok(history);
        }

        let raw = self.source.market_chart(coin_id, days).await?;
        let history = parse_price_history(raw)?;
        info!(
            "Fetched price history for {} over {}d: {} point(s)",
            coin_id,
            days,
            history.prices.len()
        );
        self.history_cache.insert(key, history.clone());
        Ok(history)
    }
}

/// Pull `prices` out of a market chart payload. A missing or null `prices`
/// yields no samples; a present but malformed one is an error.
pub fn parse_price_history(raw: serde_json::Value) -> Result<PriceHistory, ApiError> {
    let chart: MarketChartResponse = serde_json::from_value(raw.clone())
        .map_err(|e| ApiError::DeserializationError(format!("Unexpected market chart payload: {}", e)))?;

    let prices = chart
        .prices
        .unwrap_or_default()
        .into_iter()
        .map(|[timestamp, price]| PricePoint {
            timestamp_ms: timestamp as i64,
            price,
        })
        .collect();

    Ok(PriceHistory { raw, prices })
}
