use chrono::DateTime;
use serde_json::Value;
use thiserror::Error;

use crate::models::{ChartPoint, ExchangeLocation, MarketSnapshot, PricePoint, SeriesSummary};
use crate::utils::Table;

/// Market columns shown to the user, in display order
pub const MARKET_COLUMNS: [&str; 5] = [
    "name",
    "symbol",
    "current_price",
    "market_cap",
    "price_change_percentage_24h",
];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("The selected coin does not have the expected market data available.")]
    NoExpectedData,
    #[error("Timestamp {0} ms is outside the representable date range")]
    TimestampOutOfRange(i64),
}

/// Market rows restricted to the columns the payload actually carries
#[derive(Debug, Clone, PartialEq)]
pub struct MarketTable {
    pub columns: Vec<&'static str>,
    /// One cell per column; `None` where a row lacks the column
    pub rows: Vec<Vec<Option<Value>>>,
}

impl MarketTable {
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(&self.columns);
        for row in &self.rows {
            table.add_row(row.iter().map(|cell| format_cell(cell.as_ref())).collect());
        }
        table
    }
}

/// Keep the subset of `MARKET_COLUMNS` present in at least one row.
/// No such column (including no rows at all) is `NoExpectedData`.
pub fn project_market_columns(rows: &[MarketSnapshot]) -> Result<MarketTable, FormatError> {
    let columns: Vec<&'static str> = MARKET_COLUMNS
        .iter()
        .copied()
        .filter(|column| rows.iter().any(|row| row.has_column(column)))
        .collect();

    if columns.is_empty() {
        return Err(FormatError::NoExpectedData);
    }

    let projected = rows
        .iter()
        .map(|row| columns.iter().map(|column| row.get(column).cloned()).collect())
        .collect();

    Ok(MarketTable {
        columns,
        rows: projected,
    })
}

/// Text for one cell. Numbers keep the exact digits they arrived with.
pub fn format_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "None".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Key every sample by its UTC date-time. Length and order are preserved;
/// the input is assumed to be chronological already.
pub fn to_time_series(points: &[PricePoint]) -> Result<Vec<ChartPoint>, FormatError> {
    points
        .iter()
        .map(|point| {
            DateTime::from_timestamp_millis(point.timestamp_ms)
                .map(|date| ChartPoint {
                    date,
                    price: point.price,
                })
                .ok_or(FormatError::TimestampOutOfRange(point.timestamp_ms))
        })
        .collect()
}

pub fn summarize_series(series: &[ChartPoint]) -> Option<SeriesSummary> {
    let first = series.first()?;
    let last = series.last()?;

    let (min_price, max_price) = series.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), point| (min.min(point.price), max.max(point.price)),
    );

    Some(SeriesSummary {
        first: first.date,
        last: last.date,
        min_price,
        max_price,
        last_price: last.price,
    })
}

pub fn describe_summary(summary: &SeriesSummary, vs_currency: &str) -> String {
    let currency = vs_currency.to_uppercase();
    format!(
        "{} → {} | last {} {} | low {} {} | high {} {}",
        summary.first.format("%Y-%m-%d %H:%M"),
        summary.last.format("%Y-%m-%d %H:%M"),
        summary.last_price,
        currency,
        summary.min_price,
        currency,
        summary.max_price,
        currency
    )
}

pub fn exchange_table(locations: &[ExchangeLocation]) -> Table {
    let mut table = Table::new(&["Exchange", "lat", "lon"]);
    for location in locations {
        table.add_row(vec![
            location.name.to_string(),
            location.latitude.to_string(),
            location.longitude.to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EXCHANGE_LOCATIONS;
    use crate::services::testing::{market_row, DAY_MS, START_MS};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_projects_present_columns_in_display_order() {
        let rows = vec![market_row(json!({
            "market_cap": 1_320_000_000_000u64,
            "id": "bitcoin",
            "name": "Bitcoin",
            "current_price": 67000.5,
            "total_volume": 1
        }))];

        let table = project_market_columns(&rows).unwrap();
        assert_eq!(table.columns, vec!["name", "current_price", "market_cap"]);
        assert_eq!(
            table.rows,
            vec![vec![
                Some(json!("Bitcoin")),
                Some(json!(67000.5)),
                Some(json!(1_320_000_000_000u64)),
            ]]
        );
    }

    #[test]
    fn test_never_includes_absent_columns() {
        let rows = vec![market_row(json!({ "symbol": "btc", "ath": 73000 }))];
        let table = project_market_columns(&rows).unwrap();
        assert_eq!(table.columns, vec!["symbol"]);
    }

    #[test]
    fn test_no_expected_columns() {
        let rows = vec![market_row(json!({ "id": "bitcoin", "ath": 73000 }))];
        assert_eq!(project_market_columns(&rows), Err(FormatError::NoExpectedData));
    }

    #[test]
    fn test_empty_market_payload() {
        assert_eq!(project_market_columns(&[]), Err(FormatError::NoExpectedData));
    }

    #[test]
    fn test_values_pass_through_unrounded() {
        let rows = vec![market_row(json!({
            "name": "Dogecoin",
            "current_price": 0.1234567891,
            "price_change_percentage_24h": null
        }))];
        let table = project_market_columns(&rows).unwrap().to_table();
        assert_eq!(table.rows()[0], vec!["Dogecoin", "0.1234567891", "None"]);
    }

    #[test]
    fn test_row_missing_a_column_gets_none_cell() {
        let rows = vec![
            market_row(json!({ "name": "A", "symbol": "a" })),
            market_row(json!({ "name": "B" })),
        ];
        let table = project_market_columns(&rows).unwrap();
        assert_eq!(table.rows[1], vec![Some(json!("B")), None]);
    }

    #[test]
    fn test_time_series_preserves_length_order_and_price() {
        let points: Vec<PricePoint> = (0..31)
            .map(|i| PricePoint {
                timestamp_ms: START_MS + i * DAY_MS,
                price: 100.0 + i as f64,
            })
            .collect();

        let series = to_time_series(&points).unwrap();
        assert_eq!(series.len(), 31);
        for (point, chart_point) in points.iter().zip(&series) {
            assert_eq!(chart_point.price, point.price);
            assert_eq!(chart_point.date.timestamp_millis(), point.timestamp_ms);
        }
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_time_series_converts_milliseconds() {
        let series = to_time_series(&[PricePoint {
            timestamp_ms: 1_700_000_000_123,
            price: 1.5,
        }])
        .unwrap();
        let expected = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap()
            + chrono::Duration::milliseconds(123);
        assert_eq!(series[0].date, expected);
    }

    #[test]
    fn test_time_series_does_not_sort() {
        let points = [
            PricePoint { timestamp_ms: START_MS + DAY_MS, price: 2.0 },
            PricePoint { timestamp_ms: START_MS, price: 1.0 },
        ];
        let series = to_time_series(&points).unwrap();
        assert_eq!(series[0].price, 2.0);
        assert_eq!(series[1].price, 1.0);
    }

    #[test]
    fn test_time_series_out_of_range() {
        let err = to_time_series(&[PricePoint { timestamp_ms: i64::MAX, price: 1.0 }]).unwrap_err();
        assert_eq!(err, FormatError::TimestampOutOfRange(i64::MAX));
    }

    #[test]
    fn test_summary() {
        let points = [
            PricePoint { timestamp_ms: START_MS, price: 3.0 },
            PricePoint { timestamp_ms: START_MS + DAY_MS, price: 1.0 },
            PricePoint { timestamp_ms: START_MS + 2 * DAY_MS, price: 2.0 },
        ];
        let series = to_time_series(&points).unwrap();
        let summary = summarize_series(&series).unwrap();
        assert_eq!(summary.min_price, 1.0);
        assert_eq!(summary.max_price, 3.0);
        assert_eq!(summary.last_price, 2.0);
        assert_eq!(summary.first, series[0].date);
        assert!(summarize_series(&[]).is_none());
        assert!(describe_summary(&summary, "usd").contains("last 2 USD"));
    }

    #[test]
    fn test_exchange_table_lists_all_locations() {
        let table = exchange_table(&EXCHANGE_LOCATIONS);
        assert_eq!(table.rows().len(), 10);
        assert_eq!(table.rows()[0], vec!["Binance", "19.3133", "-81.2546"]);
    }
}
