//! Data models shared by the services and commands

pub mod chart;
pub mod exchange;
pub mod view;

pub use crate::api::{Coin, MarketSnapshot};
pub use chart::{ChartKind, ChartPoint, PriceHistory, PricePoint, SeriesSummary};
pub use exchange::{ExchangeLocation, EXCHANGE_LOCATIONS};
pub use view::{Block, NoticeLevel, RenderedView, ViewState, MAX_DAYS, MIN_DAYS};
