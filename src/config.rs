use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read from the environment (and `.env` via dotenv in main).
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    /// CoinGecko demo key, sent as `x-cg-demo-api-key` when set
    pub api_key: Option<String>,
    pub vs_currency: String,
    pub chart_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    pub coin_list_ttl: Duration,
    /// Fixed pause before every uncached coin list request
    pub coin_list_delay: Duration,
    /// `None` disables the per-request timeout
    pub http_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            vs_currency: "usd".to_string(),
            chart_dir: std::env::temp_dir().join("crypto-tracker"),
            chart_width: 1024,
            chart_height: 768,
            coin_list_ttl: Duration::from_secs(300),
            coin_list_delay: Duration::from_millis(1500),
            http_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        if let Some(url) = get("COINGECKO_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        config.api_key = get("COINGECKO_API_KEY");
        if let Some(currency) = get("VS_CURRENCY") {
            config.vs_currency = currency.to_lowercase();
        }
        if let Some(dir) = get("CHART_DIR") {
            config.chart_dir = PathBuf::from(dir);
        }
        if let Some(width) = get("CHART_WIDTH") {
            config.chart_width = parse_value("CHART_WIDTH", &width)?;
        }
        if let Some(height) = get("CHART_HEIGHT") {
            config.chart_height = parse_value("CHART_HEIGHT", &height)?;
        }
        if let Some(ttl) = get("COIN_LIST_TTL_SECS") {
            config.coin_list_ttl = Duration::from_secs(parse_value("COIN_LIST_TTL_SECS", &ttl)?);
        }
        if let Some(delay) = get("COIN_LIST_DELAY_MS") {
            config.coin_list_delay = Duration::from_millis(parse_value("COIN_LIST_DELAY_MS", &delay)?);
        }
        if let Some(timeout) = get("HTTP_TIMEOUT_SECS") {
            let secs: u64 = parse_value("HTTP_TIMEOUT_SECS", &timeout)?;
            config.http_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if config.chart_width < 200 || config.chart_height < 150 {
            return Err(ConfigError::InvalidValue {
                key: "CHART_WIDTH/CHART_HEIGHT",
                value: format!("{}x{}", config.chart_width, config.chart_height),
                reason: "chart must be at least 200x150 pixels".to_string(),
            });
        }

        Ok(config)
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
