pub mod chart;
pub mod days;
pub mod help;
pub mod list;
pub mod map;
pub mod raw;
pub mod reload;
pub mod search;
pub mod select;

use std::fmt::Write;

use tracing::{debug, error};

use crate::services::dashboard_service::Dashboard;

/// What the REPL does after a line has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Run one input line against the dashboard, appending everything it prints
/// to `out`. Unknown commands are ignored.
pub async fn handle_line(dashboard: &mut Dashboard, line: &str, out: &mut String) -> Control {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return Control::Continue;
    }

    let command = parts[0].to_lowercase();
    let args = &parts[1..];

    let result = match command.as_str() {
        "search" | "find" => search::execute(dashboard, out, remainder(line, parts[0])).await,
        "select" | "coin" => select::execute(dashboard, out, remainder(line, parts[0])).await,
        "list" | "ls" => list::execute(dashboard, out, args).await,
        "days" => days::execute(dashboard, out, args).await,
        "chart" => chart::execute(dashboard, out, args).await,
        "reload" | "r" => reload::execute(dashboard, out, args).await,
        "raw" => raw::execute(dashboard, out, args).await,
        "map" => map::execute(dashboard, out, args).await,
        "help" | "?" => help::execute(out),
        "quit" | "exit" => return Control::Quit,
        _ => {
            debug!("Ignoring unknown command: {}", command);
            return Control::Continue;
        }
    };

    if let Err(e) = result {
        error!("❌ Error executing command {}: {}", command, e);
        let _ = writeln!(out, "\n⚠️  Command Error\n{}", e);
    }

    Control::Continue
}

/// Text after the command word and the single separator following it,
/// otherwise untouched
fn remainder<'a>(line: &'a str, command: &str) -> &'a str {
    let line = line.trim_start().trim_end_matches(|c: char| c == '\r' || c == '\n');
    let rest = line.get(command.len()..).unwrap_or("");
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => chars.as_str(),
        _ => rest,
    }
}

/// Re-run the whole page and append it to `out`
pub(crate) async fn render_into(dashboard: &Dashboard, out: &mut String) {
    let view = dashboard.render().await;
    let _ = write!(out, "{}", view);
}
