use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod utils;

use api::coingecko::CoinGeckoClient;
use commands::Control;
use config::Config;
use services::chart_service::PlottersRenderer;
use services::dashboard_service::Dashboard;
use services::market_data_service::MarketDataService;

fn write_out<W: Write>(writer: &mut W, text: &str) -> std::io::Result<()> {
    writer.write_all(text.as_bytes())?;
    writer.flush()
}

fn print_out(text: &str) -> std::io::Result<()> {
    write_out(&mut std::io::stdout().lock(), text)
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crypto_tracker=info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    info!("📈 Starting Crypto Tracker...");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    info!(
        "Using {} (vs {}), charts in {}",
        config.base_url,
        config.vs_currency,
        config.chart_dir.display()
    );

    let client = match CoinGeckoClient::new(&config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create API client: {}", e);
            return;
        }
    };

    let data = MarketDataService::new(Arc::new(client), &config);
    let renderer = Arc::new(PlottersRenderer::new(&config));
    let mut dashboard = Dashboard::new(data, renderer, &config.vs_currency);

    let intro = format!("{}\nType `help` for commands.\n> ", dashboard.render().await);
    if let Err(e) = print_out(&intro) {
        warn!("Failed to write to stdout: {}", e);
        return;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        let mut out = String::new();
        let control = commands::handle_line(&mut dashboard, &line, &mut out).await;
        if control == Control::Continue {
            out.push_str("\n> ");
        }
        if let Err(e) = print_out(&out) {
            warn!("Failed to write to stdout, stopping: {}", e);
            break;
        }
        if control == Control::Quit {
            break;
        }
    }

    info!("👋 Crypto Tracker stopped");
}
