//! In-memory `MarketDataSource` and `ChartRenderer` for tests

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::{ApiError, Coin, MarketDataSource, MarketSnapshot};
use crate::models::{ChartKind, ChartPoint, ExchangeLocation};
use crate::services::chart_service::{ChartError, ChartRenderer};

pub const START_MS: i64 = 1_700_000_000_000;
pub const DAY_MS: i64 = 86_400_000;

pub struct FakeSource {
    pub coins: Vec<Coin>,
    pub markets: HashMap<String, Vec<MarketSnapshot>>,
    /// Payloads returned instead of the generated daily series
    pub chart_overrides: HashMap<String, Value>,
    pub coin_list_calls: AtomicUsize,
    pub market_calls: AtomicUsize,
    pub chart_calls: AtomicUsize,
    pub fail_coin_list: AtomicBool,
    pub fail_markets: AtomicBool,
    pub fail_charts: AtomicBool,
}

pub fn coin(id: &str, symbol: &str, name: &str) -> Coin {
    Coin {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
    }
}

pub fn market_row(value: Value) -> MarketSnapshot {
    serde_json::from_value(value).expect("market row must be a JSON object")
}

impl FakeSource {
    /// Bitcoin and Ethereum, each with a full market row
    pub fn with_default_coins() -> Self {
        let mut markets = HashMap::new();
        markets.insert(
            "bitcoin".to_string(),
            vec![market_row(json!({
                "id": "bitcoin",
                "name": "Bitcoin",
                "symbol": "btc",
                "current_price": 67000.5,
                "market_cap": 1_320_000_000_000u64,
                "price_change_percentage_24h": -1.25,
                "total_volume": 35_000_000_000u64
            }))],
        );
        markets.insert(
            "ethereum".to_string(),
            vec![market_row(json!({
                "id": "ethereum",
                "name": "Ethereum",
                "symbol": "eth",
                "current_price": 3500.0,
                "market_cap": 420_000_000_000u64,
                "price_change_percentage_24h": 2.5
            }))],
        );

        Self {
            coins: vec![
                coin("bitcoin", "btc", "Bitcoin"),
                coin("ethereum", "eth", "Ethereum"),
            ],
            markets,
            chart_overrides: HashMap::new(),
            coin_list_calls: AtomicUsize::new(0),
            market_calls: AtomicUsize::new(0),
            chart_calls: AtomicUsize::new(0),
            fail_coin_list: AtomicBool::new(false),
            fail_markets: AtomicBool::new(false),
            fail_charts: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl MarketDataSource for FakeSource {
    async fn coin_list(&self) -> Result<Vec<Coin>, ApiError> {
        self.coin_list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_coin_list.load(Ordering::SeqCst) {
            return Err(ApiError::RequestError("connection refused".to_string()));
        }
        Ok(self.coins.clone())
    }

    async fn markets(&self, coin_id: &str) -> Result<Vec<MarketSnapshot>, ApiError> {
        self.market_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_markets.load(Ordering::SeqCst) {
            return Err(ApiError::ServerError(502, "bad gateway".to_string()));
        }
        Ok(self.markets.get(coin_id).cloned().unwrap_or_default())
    }

    /// One daily sample per day plus the current one, like the daily granularity upstream
    async fn market_chart(&self, coin_id: &str, days: u32) -> Result<Value, ApiError> {
        self.chart_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_charts.load(Ordering::SeqCst) {
            return Err(ApiError::DeserializationError("expected value at line 1".to_string()));
        }
        if let Some(payload) = self.chart_overrides.get(coin_id) {
            return Ok(payload.clone());
        }
        if !self.coins.iter().any(|c| c.id == coin_id) {
            return Ok(json!({ "prices": [], "market_caps": [], "total_volumes": [] }));
        }

        let prices: Vec<Value> = (0..=days as i64)
            .map(|i| json!([START_MS + i * DAY_MS, 100.0 + i as f64]))
            .collect();
        Ok(json!({ "prices": prices, "market_caps": [], "total_volumes": [] }))
    }
}

/// A rendered price chart, as seen by `FakeRenderer`
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub file_stem: String,
    pub kind: ChartKind,
    pub title: String,
    pub points: usize,
}

/// Records render calls instead of drawing
#[derive(Default)]
pub struct FakeRenderer {
    pub charts: Mutex<Vec<RenderedChart>>,
    pub maps: AtomicUsize,
    pub fail: AtomicBool,
}

impl FakeRenderer {
    pub fn charts(&self) -> Vec<RenderedChart> {
        self.charts.lock().unwrap().clone()
    }
}

impl ChartRenderer for FakeRenderer {
    fn render_price_chart(
        &self,
        series: &[ChartPoint],
        kind: ChartKind,
        title: &str,
        _y_desc: &str,
        file_stem: &str,
    ) -> Result<PathBuf, ChartError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ChartError::Draw("no fonts".to_string()));
        }
        self.charts.lock().unwrap().push(RenderedChart {
            file_stem: file_stem.to_string(),
            kind,
            title: title.to_string(),
            points: series.len(),
        });
        Ok(PathBuf::from(format!("/tmp/charts/{}.png", file_stem)))
    }

    fn render_exchange_map(&self, _locations: &[ExchangeLocation]) -> Result<PathBuf, ChartError> {
        self.maps.fetch_add(1, Ordering::SeqCst);
        Ok(PathBuf::from("/tmp/charts/exchange_map.png"))
    }
}
