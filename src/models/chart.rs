//! Price history and chart models

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One `[timestamp_ms, price]` sample as returned upstream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

/// Market chart payload for one `(coin, days)` request
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    /// Unmodified response body
    pub raw: Value,
    /// Samples from `prices`, in upstream order
    pub prices: Vec<PricePoint>,
}

/// A sample keyed by calendar date-time, ready for plotting
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: DateTime<Utc>,
    pub price: f64,
}

/// Caption data shown under a rendered chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    pub first: DateTime<Utc>,
    pub last: DateTime<Utc>,
    pub min_price: f64,
    pub max_price: f64,
    pub last_price: f64,
}

/// How a price series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Line,
    Area,
    Bar,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Line, ChartKind::Area, ChartKind::Bar];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Line => "Line Chart",
            ChartKind::Area => "Area Chart",
            ChartKind::Bar => "Bar Chart",
        }
    }

    /// Short name used in file names and commands
    pub fn slug(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Area => "area",
            ChartKind::Bar => "bar",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let normalized = normalized.strip_suffix(" chart").unwrap_or(&normalized);
        match normalized {
            "line" => Ok(ChartKind::Line),
            "area" => Ok(ChartKind::Area),
            "bar" => Ok(ChartKind::Bar),
            _ => Err(format!(
                "❌ Unknown chart type: '{}'. Supported: line, area, bar",
                s.trim()
            )),
        }
    }
}
