use crate::commands::render_into;
use crate::services::dashboard_service::Dashboard;

/// `raw [on|off]`; without an argument the toggle flips
pub async fn execute(dashboard: &mut Dashboard, out: &mut String, args: &[&str]) -> Result<(), String> {
    let show_raw = match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        None | Some("toggle") => !dashboard.state().show_raw,
        Some("on") | Some("true") | Some("yes") => true,
        Some("off") | Some("false") | Some("no") => false,
        Some(other) => return Err(format!("❌ Invalid option: '{}'. Use `raw [on|off]`", other)),
    };

    dashboard.set_show_raw(show_raw);
    render_into(dashboard, out).await;
    Ok(())
}
