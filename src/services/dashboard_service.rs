use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::models::{
    ChartKind, NoticeLevel, RenderedView, ViewState, EXCHANGE_LOCATIONS, MAX_DAYS, MIN_DAYS,
};
use crate::services::chart_service::ChartRenderer;
use crate::services::format_service::{
    describe_summary, exchange_table, project_market_columns, summarize_series, to_time_series,
    FormatError,
};
use crate::services::market_data_service::{DataError, MarketDataService};
use crate::services::selection_service::{
    coin_names, filter_coins, resolve_id, resolve_id_or_default, DEFAULT_COIN_ID,
};

pub const TITLE: &str = "📈 Crypto Tracker for Beginners";
pub const LIST_PAGE_SIZE: usize = 20;
const NAME_PREVIEW: usize = 10;

/// Faults that end a render pass early
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Holds the user's inputs and re-derives the whole view from them.
///
/// There is no other state: every interaction calls `render`, which goes
/// through the memoized data service, so repeated passes are cheap.
pub struct Dashboard {
    data: MarketDataService,
    charts: Arc<dyn ChartRenderer>,
    vs_currency: String,
    state: ViewState,
}

impl Dashboard {
    pub fn new(data: MarketDataService, charts: Arc<dyn ChartRenderer>, vs_currency: &str) -> Self {
        Self {
            data,
            charts,
            vs_currency: vs_currency.to_string(),
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// A new search term changes the option list, which resets the selection
    pub fn set_search(&mut self, term: &str) {
        self.state.search = term.to_string();
        self.state.selected = None;
    }

    pub fn select(&mut self, name: &str) {
        self.state.selected = Some(name.to_string());
    }

    pub fn set_days(&mut self, days: u32) -> Result<(), String> {
        if !(MIN_DAYS..=MAX_DAYS).contains(&days) {
            return Err(DataError::InvalidDays(days).to_string());
        }
        self.state.days = days;
        Ok(())
    }

    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        self.state.chart_kind = kind;
    }

    pub fn set_show_raw(&mut self, show_raw: bool) {
        self.state.show_raw = show_raw;
    }

    /// Display names matching the current search, in list order
    pub async fn filtered_names(&self) -> Result<Vec<String>, DashboardError> {
        let coins = self.data.fetch_coin_list().await?;
        Ok(coin_names(&filter_coins(&coins, &self.state.search)))
    }

    /// One full pass over the current inputs. A fault stops the pass where it
    /// happened; everything rendered before it is kept.
    pub async fn render(&self) -> RenderedView {
        let mut view = RenderedView::default();
        view.heading(TITLE);
        view.caption("Track cryptocurrency prices, trends, and more, powered by the CoinGecko API.");

        if let Err(e) = self.render_sections(&mut view).await {
            error!("Render pass aborted: {}", e);
            view.notice(NoticeLevel::Error, format!("Something went wrong: {}", e));
        }

        view
    }

    /// Only the exchange map section
    pub fn render_map(&self) -> RenderedView {
        let mut view = RenderedView::default();
        self.render_map_section(&mut view);
        view
    }

    async fn render_sections(&self, view: &mut RenderedView) -> Result<(), DashboardError> {
        let coins = self.data.fetch_coin_list().await?;
        let names = coin_names(&filter_coins(&coins, &self.state.search));

        view.heading("Configuration");
        if !self.state.search.is_empty() {
            view.caption(format!("🔍 Search: \"{}\"", self.state.search));
        }
        view.caption(format!("{} result(s) found", names.len()));

        let selected_name = match (&self.state.selected, names.first()) {
            (Some(name), _) => name.clone(),
            (None, Some(first)) => first.clone(),
            (None, None) => {
                view.notice(
                    NoticeLevel::Warning,
                    "No coin matches the search term, so there is nothing to select.",
                );
                self.render_map_section(view);
                return Ok(());
            }
        };

        let preview: Vec<&str> = names.iter().take(NAME_PREVIEW).map(String::as_str).collect();
        let more = names.len().saturating_sub(NAME_PREVIEW);
        view.caption(if more > 0 {
            format!("Options: {} … (+{} more, see `list`)", preview.join(", "), more)
        } else {
            format!("Options: {}", preview.join(", "))
        });
        view.caption(format!(
            "Selected: {} | Days: {} | Chart: {} | Raw response: {}",
            selected_name,
            self.state.days,
            self.state.chart_kind,
            if self.state.show_raw { "on" } else { "off" }
        ));

        if resolve_id(&coins, &selected_name).is_none() {
            warn!("Selected coin '{}' is not in the coin list", selected_name);
            view.notice(
                NoticeLevel::Warning,
                format!(
                    "'{}' is not in the coin list, showing '{}' instead.",
                    selected_name, DEFAULT_COIN_ID
                ),
            );
        }
        let coin_id = resolve_id_or_default(&coins, &selected_name);
        info!("Rendering {} ({}) over {} day(s)", selected_name, coin_id, self.state.days);

        self.render_market_section(view, &selected_name, &coin_id).await?;
        self.render_history_section(view, &selected_name, &coin_id).await?;
        self.render_map_section(view);
        Ok(())
    }

    async fn render_market_section(
        &self,
        view: &mut RenderedView,
        selected_name: &str,
        coin_id: &str,
    ) -> Result<(), DashboardError> {
        view.heading(format!("📊 Current Market Data for {}", selected_name));

        let rows = self.data.fetch_market_snapshot(coin_id).await?;
        match project_market_columns(&rows) {
            Ok(table) => {
                if let Some(row) = rows.first() {
                    debug!(
                        "{} ({}) at {:?} {}, cap {:?}, 24h {:?}%",
                        row.name().unwrap_or(coin_id),
                        row.symbol().unwrap_or("?"),
                        row.current_price(),
                        self.vs_currency,
                        row.market_cap(),
                        row.price_change_percentage_24h()
                    );
                }
                view.table(table.to_table());
                view.notice(NoticeLevel::Success, "Market data loaded successfully!");
            }
            Err(FormatError::NoExpectedData) => {
                warn!("No expected market columns for {} ({} row(s))", coin_id, rows.len());
                view.notice(NoticeLevel::Warning, FormatError::NoExpectedData.to_string());
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    async fn render_history_section(
        &self,
        view: &mut RenderedView,
        selected_name: &str,
        coin_id: &str,
    ) -> Result<(), DashboardError> {
        view.heading("📉 Price Trend Over Time");

        let days = self.state.days;
        let history = self.data.fetch_price_history(coin_id, days).await?;

        if history.prices.is_empty() {
            warn!("No price history for {} over {}d", coin_id, days);
            view.notice(
                NoticeLevel::Warning,
                "Price data not available for this coin and time range.",
            );
        } else {
            let series = to_time_series(&history.prices)?;
            let kind = self.state.chart_kind;
            let title = format!("{} price, last {} day(s)", selected_name, days);
            let y_desc = format!("Price ({})", self.vs_currency.to_uppercase());
            let file_stem = format!("{}_{}d_{}", coin_id, days, kind.slug());

            match self.charts.render_price_chart(&series, kind, &title, &y_desc, &file_stem) {
                Ok(path) => {
                    view.chart(path);
                    view.notice(NoticeLevel::Info, "Price history chart generated.");
                }
                Err(e) => {
                    error!("Chart rendering failed for {}: {}", coin_id, e);
                    view.notice(NoticeLevel::Error, e.to_string());
                }
            }

            if let Some(summary) = summarize_series(&series) {
                view.caption(describe_summary(&summary, &self.vs_currency));
            }
        }

        if self.state.show_raw {
            view.heading("Raw API response");
            let raw = serde_json::to_string_pretty(&history.raw)
                .unwrap_or_else(|_| history.raw.to_string());
            view.raw(raw);
        }

        Ok(())
    }

    fn render_map_section(&self, view: &mut RenderedView) {
        view.heading("🌍 Crypto Exchange Headquarters");
        view.table(exchange_table(&EXCHANGE_LOCATIONS));

        match self.charts.render_exchange_map(&EXCHANGE_LOCATIONS) {
            Ok(path) => view.chart(path),
            Err(e) => {
                error!("Map rendering failed: {}", e);
                view.notice(NoticeLevel::Error, e.to_string());
            }
        }
    }
}
