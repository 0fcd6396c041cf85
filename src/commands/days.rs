use crate::commands::render_into;
use crate::models::{MAX_DAYS, MIN_DAYS};
use crate::services::dashboard_service::Dashboard;

/// `days <n>`: price history range, 1 to 90
pub async fn execute(dashboard: &mut Dashboard, out: &mut String, args: &[&str]) -> Result<(), String> {
    let arg = args
        .first()
        .ok_or_else(|| format!("❌ Usage: `days <{}-{}>`", MIN_DAYS, MAX_DAYS))?;
    let days = arg
        .parse::<u32>()
        .map_err(|_| format!("❌ Invalid number of days: '{}'", arg))?;

    dashboard.set_days(days)?;
    render_into(dashboard, out).await;
    Ok(())
}
