//! Exchange headquarters shown on the map

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeLocation {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

const fn location(name: &'static str, latitude: f64, longitude: f64) -> ExchangeLocation {
    ExchangeLocation {
        name,
        latitude,
        longitude,
    }
}

pub const EXCHANGE_LOCATIONS: [ExchangeLocation; 10] = [
    location("Binance", 19.3133, -81.2546),
    location("Coinbase", 37.7749, -122.4194),
    location("Kraken", 37.7749, -122.4194),
    location("Bitstamp", 51.5074, -0.1278),
    location("KuCoin", -4.6796, 55.4920),
    location("Huobi", 39.9042, 116.4074),
    location("OKX", 37.3382, -121.8863),
    location("Crypto.com", 1.3521, 103.8198),
    location("Gemini", 40.7128, -74.0060),
    location("Bitfinex", 22.3193, 114.1694),
];
