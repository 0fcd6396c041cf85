use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use plotters::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::models::{ChartKind, ChartPoint, ExchangeLocation};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("❌ Not enough price data to generate chart")]
    NotEnoughData,
    #[error("Failed to prepare chart file: {0}")]
    Io(String),
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

/// Turns series and locations into image files
pub trait ChartRenderer: Send + Sync {
    /// Draw `series` as `kind` and return the written file
    fn render_price_chart(
        &self,
        series: &[ChartPoint],
        kind: ChartKind,
        title: &str,
        y_desc: &str,
        file_stem: &str,
    ) -> Result<PathBuf, ChartError>;

    /// Draw the exchange headquarters on a longitude/latitude plane
    fn render_exchange_map(&self, locations: &[ExchangeLocation]) -> Result<PathBuf, ChartError>;
}

/// PNG renderer backed by plotters' bitmap backend
pub struct PlottersRenderer {
    output_dir: PathBuf,
    width: u32,
    height: u32,
}

impl PlottersRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            output_dir: config.chart_dir.clone(),
            width: config.chart_width,
            height: config.chart_height,
        }
    }

    fn output_path(&self, file_stem: &str) -> Result<PathBuf, ChartError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            ChartError::Io(format!("{}: {}", self.output_dir.display(), e))
        })?;
        Ok(self.output_dir.join(format!("{}.png", sanitize_file_stem(file_stem))))
    }

    fn draw_price_chart(
        &self,
        path: &Path,
        series: &[ChartPoint],
        kind: ChartKind,
        title: &str,
        y_desc: &str,
    ) -> Result<(), ChartError> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::Draw(format!("Failed to fill canvas: {}", e)))?;

        let (y_min, y_max) = price_bounds(series);
        let (x_min, x_max) = x_range(series, kind);

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 40.0).into_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(80)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| ChartError::Draw(format!("Failed to build chart: {}", e)))?;

        chart
            .configure_mesh()
            .y_desc(y_desc)
            .x_desc("Date")
            .x_label_formatter(&|date: &DateTime<Utc>| date.format("%Y-%m-%d").to_string())
            .draw()
            .map_err(|e| ChartError::Draw(format!("Failed to draw mesh: {}", e)))?;

        let points = series.iter().map(|p| (p.date, p.price));
        let drawn = match kind {
            ChartKind::Line => chart.draw_series(LineSeries::new(points, &BLUE)),
            ChartKind::Area => chart.draw_series(
                AreaSeries::new(points, y_min, BLUE.mix(0.3)).border_style(&BLUE),
            ),
            ChartKind::Bar => {
                let (t_min, t_max) = time_bounds(series);
                let width = bar_width(t_min, t_max, series.len());
                chart.draw_series(series.iter().map(|p| {
                    let (left, right) = bar_span(p.date, width);
                    Rectangle::new([(left, y_min), (right, p.price)], BLUE.filled())
                }))
            }
        };
        drawn.map_err(|e| ChartError::Draw(format!("Failed to draw series: {}", e)))?;

        root.present()
            .map_err(|e| ChartError::Draw(format!("Failed to render chart: {}", e)))?;
        Ok(())
    }

    fn draw_exchange_map(&self, path: &Path, locations: &[ExchangeLocation]) -> Result<(), ChartError> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::Draw(format!("Failed to fill canvas: {}", e)))?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Crypto Exchange Headquarters", ("sans-serif", 40.0).into_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(-180f64..180f64, -90f64..90f64)
            .map_err(|e| ChartError::Draw(format!("Failed to build map: {}", e)))?;

        chart
            .configure_mesh()
            .x_desc("Longitude")
            .y_desc("Latitude")
            .draw()
            .map_err(|e| ChartError::Draw(format!("Failed to draw mesh: {}", e)))?;

        chart
            .draw_series(locations.iter().map(|location| {
                EmptyElement::at((location.longitude, location.latitude))
                    + Circle::new((0, 0), 5, RED.filled())
                    + Text::new(location.name.to_string(), (8, -8), ("sans-serif", 14).into_font())
            }))
            .map_err(|e| ChartError::Draw(format!("Failed to draw locations: {}", e)))?;

        root.present()
            .map_err(|e| ChartError::Draw(format!("Failed to render map: {}", e)))?;
        Ok(())
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render_price_chart(
        &self,
        series: &[ChartPoint],
        kind: ChartKind,
        title: &str,
        y_desc: &str,
        file_stem: &str,
    ) -> Result<PathBuf, ChartError> {
        if series.is_empty() {
            return Err(ChartError::NotEnoughData);
        }

        let path = self.output_path(file_stem)?;
        debug!("Rendering {} with {} points to {}", kind, series.len(), path.display());
        self.draw_price_chart(&path, series, kind, title, y_desc)?;
        Ok(path)
    }

    fn render_exchange_map(&self, locations: &[ExchangeLocation]) -> Result<PathBuf, ChartError> {
        let path = self.output_path("exchange_map")?;
        debug!("Rendering {} exchange locations to {}", locations.len(), path.display());
        self.draw_exchange_map(&path, locations)?;
        Ok(path)
    }
}

/// Y range with 10% padding, floored at zero
pub fn price_bounds(series: &[ChartPoint]) -> (f64, f64) {
    let min_price = series.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
    let max_price = series.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);

    if !min_price.is_finite() || !max_price.is_finite() {
        return (0.0, 1.0);
    }

    let price_range = (max_price - min_price).max(max_price.abs() * 0.01).max(1e-8);
    let padding = price_range * 0.1;
    ((min_price - padding).max(0.0), max_price + padding)
}

/// X range of the series; a single sample is widened by an hour on each side
pub fn time_bounds(series: &[ChartPoint]) -> (DateTime<Utc>, DateTime<Utc>) {
    let first = series.first().map(|p| p.date).unwrap_or_default();
    let last = series.last().map(|p| p.date).unwrap_or(first);
    let (start, end) = if last < first { (last, first) } else { (first, last) };

    if start == end {
        (start - Duration::hours(1), end + Duration::hours(1))
    } else {
        (start, end)
    }
}

/// Width of one bar: 80% of the average spacing between samples
pub fn bar_width(x_min: DateTime<Utc>, x_max: DateTime<Utc>, count: usize) -> Duration {
    let span_ms = (x_max - x_min).num_milliseconds().max(0);
    let slot_ms = span_ms / count.max(1) as i64;
    Duration::milliseconds((slot_ms * 8 / 10).max(1))
}

/// Horizontal extent of a bar centred on `date`
pub fn bar_span(date: DateTime<Utc>, width: Duration) -> (DateTime<Utc>, DateTime<Utc>) {
    let left = date - width / 2;
    (left, left + width)
}

/// X axis range for `kind`. Bars get room for the outer halves of the first
/// and last bar.
pub fn x_range(series: &[ChartPoint], kind: ChartKind) -> (DateTime<Utc>, DateTime<Utc>) {
    let (start, end) = time_bounds(series);
    match kind {
        ChartKind::Bar => {
            let width = bar_width(start, end, series.len());
            (bar_span(start, width).0, bar_span(end, width).1)
        }
        ChartKind::Line | ChartKind::Area => (start, end),
    }
}

/// Keep file names to `[A-Za-z0-9_-]`
pub fn sanitize_file_stem(stem: &str) -> String {
    stem.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
