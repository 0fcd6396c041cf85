use crate::commands::render_into;
use crate::models::ChartKind;
use crate::services::dashboard_service::Dashboard;

/// `chart <line|area|bar>`
pub async fn execute(dashboard: &mut Dashboard, out: &mut String, args: &[&str]) -> Result<(), String> {
    if args.is_empty() {
        let kinds: Vec<&str> = ChartKind::ALL.iter().map(|kind| kind.slug()).collect();
        return Err(format!("❌ Usage: `chart <{}>`", kinds.join("|")));
    }

    let kind: ChartKind = args.join(" ").parse()?;
    dashboard.set_chart_kind(kind);
    render_into(dashboard, out).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;

    #[tokio::test]
    async fn test_chart_switches_kind() {
        let mut dashboard = test_support::dashboard();
        let mut out = String::new();

        execute(&mut dashboard, &mut out, &["Area", "Chart"]).await.unwrap();

        assert_eq!(dashboard.state().chart_kind, ChartKind::Area);
        assert!(out.contains("bitcoin_30d_area.png"));
    }

    #[tokio::test]
    async fn test_chart_rejects_unknown_kind() {
        let mut dashboard = test_support::dashboard();
        let mut out = String::new();

        let err = execute(&mut dashboard, &mut out, &["pie"]).await.unwrap_err();
        assert!(err.contains("Unknown chart type"));
        let err = execute(&mut dashboard, &mut out, &[]).await.unwrap_err();
        assert!(err.contains("line|area|bar"));
        assert_eq!(dashboard.state().chart_kind, ChartKind::Line);
    }
}
