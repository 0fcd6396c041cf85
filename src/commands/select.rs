use crate::commands::render_into;
use crate::services::dashboard_service::Dashboard;

/// `select <name>` picks a coin by display name, `select #<n>` by its number in `list`
pub async fn execute(dashboard: &mut Dashboard, out: &mut String, input: &str) -> Result<(), String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("❌ Usage: `select <coin name>` or `select #<number from list>`".to_string());
    }

    let name = match input.strip_prefix('#') {
        Some(number) => {
            let position = number
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("❌ Invalid list number: '{}'", input))?;
            let names = dashboard.filtered_names().await.map_err(|e| e.to_string())?;
            position
                .checked_sub(1)
                .and_then(|index| names.get(index))
                .cloned()
                .ok_or_else(|| {
                    format!("❌ No coin at position {}. The list has {} coin(s)", position, names.len())
                })?
        }
        None => input.to_string(),
    };

    tracing::info!("🪙 Selected coin: {}", name);
    dashboard.select(&name);
    render_into(dashboard, out).await;
    Ok(())
}
