use std::fmt::Write;

use crate::services::dashboard_service::Dashboard;

/// `map`: only the exchange headquarters section
pub async fn execute(dashboard: &mut Dashboard, out: &mut String, _args: &[&str]) -> Result<(), String> {
    let _ = write!(out, "{}", dashboard.render_map());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;

    #[tokio::test]
    async fn test_map_lists_exchanges() {
        let mut dashboard = test_support::dashboard();
        let mut out = String::new();

        execute(&mut dashboard, &mut out, &[]).await.unwrap();

        assert!(out.contains("Crypto Exchange Headquarters"));
        assert!(out.contains("Binance"));
        assert!(out.contains("exchange_map.png"));
        assert!(!out.contains("Current Market Data"));
    }
}
