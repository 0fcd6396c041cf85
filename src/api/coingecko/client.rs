use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, RETRY_AFTER};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::models::{ApiError, Coin, ErrorResponse, MarketSnapshot};
use crate::api::MarketDataSource;
use crate::config::Config;

/// CoinGecko public API client. One method per endpoint, no retries.
pub struct CoinGeckoClient {
    http_client: HttpClient,
    api_key: Option<String>,
    base_url: String,
    vs_currency: String,
}

impl CoinGeckoClient {
    const API_KEY_HEADER: &'static str = "x-cg-demo-api-key";

    /// Create a client from the runtime config
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut builder = HttpClient::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            vs_currency: config.vs_currency.clone(),
        })
    }

    fn coin_list_url(&self) -> String {
        format!("{}/coins/list", self.base_url)
    }

    fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.base_url)
    }

    fn market_chart_url(&self, coin_id: &str) -> String {
        format!("{}/coins/{}/market_chart", self.base_url, coin_id)
    }

    fn create_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(key) = &self.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|e| ApiError::RequestError(format!("Failed to create API key header: {}", e)))?;
            headers.insert(Self::API_KEY_HEADER, value);
        }

        Ok(headers)
    }

    /// Map a non-2xx response to an error, using the body's message when it has one
    async fn handle_error_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok());
        let body_text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body_text)
            .ok()
            .and_then(|body| body.message())
            .unwrap_or(body_text);

        classify_status(status, message, retry_after)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        debug!("GET {} {:?}", url, query);
        let headers = self.create_headers()?;

        let response = self
            .http_client
            .get(url)
            .headers(headers)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /coins/list
    pub async fn get_coin_list(&self) -> Result<Vec<Coin>, ApiError> {
        self.get_json(&self.coin_list_url(), &[]).await
    }

    /// GET /coins/markets?vs_currency={vs}&ids={coin_id}
    ///
    /// Returns zero rows when the id has no tracked markets.
    pub async fn get_markets(&self, coin_id: &str) -> Result<Vec<MarketSnapshot>, ApiError> {
        let query = [
            ("vs_currency", self.vs_currency.clone()),
            ("ids", coin_id.to_string()),
        ];
        self.get_json(&self.markets_url(), &query).await
    }

    /// GET /coins/{coin_id}/market_chart?vs_currency={vs}&days={days}
    ///
    /// The body is returned untouched; callers pick `prices` out of it.
    pub async fn get_market_chart(&self, coin_id: &str, days: u32) -> Result<Value, ApiError> {
        let query = [
            ("vs_currency", self.vs_currency.clone()),
            ("days", days.to_string()),
        ];
        self.get_json(&self.market_chart_url(coin_id), &query).await
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    async fn coin_list(&self) -> Result<Vec<Coin>, ApiError> {
        self.get_coin_list().await
    }

    async fn markets(&self, coin_id: &str) -> Result<Vec<MarketSnapshot>, ApiError> {
        self.get_markets(coin_id).await
    }

    async fn market_chart(&self, coin_id: &str, days: u32) -> Result<Value, ApiError> {
        self.get_market_chart(coin_id, days).await
    }
}

fn classify_status(status: u16, message: String, retry_after: Option<u64>) -> ApiError {
    match status {
        400 => ApiError::BadRequest(message),
        401 => ApiError::Unauthorized(message),
        403 => ApiError::Forbidden(message),
        404 => ApiError::NotFound(message),
        429 => {
            warn!("Rate limited by CoinGecko, retry after {:?} s", retry_after);
            ApiError::RateLimited { retry_after }
        }
        500..=599 => {
            warn!("Server error {}: {}", status, message);
            ApiError::ServerError(status, message)
        }
        _ => ApiError::HttpError(status, message),
    }
}
