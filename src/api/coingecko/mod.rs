pub mod client;
pub mod models;

pub use client::CoinGeckoClient;
pub use models::{ApiError, Coin, MarketChartResponse, MarketSnapshot};
