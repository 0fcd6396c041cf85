use tracing::info;

use crate::commands::render_into;
use crate::services::dashboard_service::Dashboard;

/// `search [term]`; no term clears the filter. The term is used as typed.
pub async fn execute(dashboard: &mut Dashboard, out: &mut String, term: &str) -> Result<(), String> {
    info!("🔍 Search command called with term: {:?}", term);

    dashboard.set_search(term);
    render_into(dashboard, out).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;

    #[tokio::test]
    async fn test_search_filters_and_resets_selection() {
        let mut dashboard = test_support::dashboard();
        dashboard.select("Bitcoin");
        let mut out = String::new();

        execute(&mut dashboard, &mut out, "eth").await.unwrap();

        assert_eq!(dashboard.state().search, "eth");
        assert!(dashboard.state().selected.is_none());
        assert!(out.contains("1 result(s) found"));
        assert!(out.contains("Current Market Data for Ethereum"));
    }

    #[tokio::test]
    async fn test_search_without_term_clears_filter() {
        let mut dashboard = test_support::dashboard();
        dashboard.set_search("eth");
        let mut out = String::new();

        execute(&mut dashboard, &mut out, "").await.unwrap();

        assert!(dashboard.state().search.is_empty());
        assert!(out.contains("2 result(s) found"));
    }

    #[tokio::test]
    async fn test_whitespace_term_is_a_real_search() {
        let mut dashboard = test_support::dashboard();
        let mut out = String::new();

        execute(&mut dashboard, &mut out, " ").await.unwrap();

        assert_eq!(dashboard.state().search, " ");
        assert!(out.contains("0 result(s) found"));
    }
}
