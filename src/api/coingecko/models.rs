use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Entry of `GET /coins/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub id: String,
    pub symbol: String,
    pub name: String,
}

/// One row of `GET /coins/markets`.
///
/// Kept as the raw JSON object: the endpoint returns a superset of the columns
/// the dashboard shows, and a coin may lack some of them entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketSnapshot(pub Map<String, Value>);

impl MarketSnapshot {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    pub fn symbol(&self) -> Option<&str> {
        self.get("symbol").and_then(Value::as_str)
    }

    pub fn current_price(&self) -> Option<f64> {
        self.get("current_price").and_then(Value::as_f64)
    }

    pub fn market_cap(&self) -> Option<f64> {
        self.get("market_cap").and_then(Value::as_f64)
    }

    pub fn price_change_percentage_24h(&self) -> Option<f64> {
        self.get("price_change_percentage_24h").and_then(Value::as_f64)
    }
}

/// Body of `GET /coins/{id}/market_chart`. Only `prices` is consumed;
/// `market_caps` and `total_volumes` stay in the raw payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Option<Vec<[f64; 2]>>,
}

/// Error body CoinGecko sends with most non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<Value>,
    pub status: Option<ErrorStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorStatus {
    pub error_message: Option<String>,
}

impl ErrorResponse {
    /// Best human-readable message carried by the body, if any
    pub fn message(&self) -> Option<String> {
        if let Some(msg) = self.status.as_ref().and_then(|s| s.error_message.clone()) {
            return Some(msg);
        }
        match &self.error {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        }
    }
}

/// Errors of the CoinGecko HTTP layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Rate Limited. Retry after {}", describe_retry(.retry_after))]
    RateLimited { retry_after: Option<u64> },
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    #[error("Request Error: {0}")]
    RequestError(String),
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

fn describe_retry(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!("{} s", secs),
        None => "an unknown delay".to_string(),
    }
}
