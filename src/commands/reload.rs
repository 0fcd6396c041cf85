use crate::commands::render_into;
use crate::services::dashboard_service::Dashboard;

/// `reload`: run the page again with the same inputs. Cached data is reused.
pub async fn execute(dashboard: &mut Dashboard, out: &mut String, _args: &[&str]) -> Result<(), String> {
    tracing::debug!("Reloading dashboard");
    render_into(dashboard, out).await;
    Ok(())
}
