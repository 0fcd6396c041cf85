use crate::models::Coin;

/// Coin id used when a selected name cannot be resolved
pub const DEFAULT_COIN_ID: &str = "bitcoin";

/// Coins whose name contains `search_term`, ignoring case, in input order.
/// An empty term keeps every coin.
pub fn filter_coins(coins: &[Coin], search_term: &str) -> Vec<Coin> {
    if search_term.is_empty() {
        return coins.to_vec();
    }

    let term = search_term.to_lowercase();
    coins
        .iter()
        .filter(|coin| coin.name.to_lowercase().contains(&term))
        .cloned()
        .collect()
}

/// Id of the first coin named exactly `selected_name`
pub fn resolve_id(coins: &[Coin], selected_name: &str) -> Option<String> {
    coins
        .iter()
        .find(|coin| coin.name == selected_name)
        .map(|coin| coin.id.clone())
}

/// Like `resolve_id`, but falls back to `DEFAULT_COIN_ID`
pub fn resolve_id_or_default(coins: &[Coin], selected_name: &str) -> String {
    resolve_id(coins, selected_name).unwrap_or_else(|| DEFAULT_COIN_ID.to_string())
}

/// Display names in list order, for the selection list
pub fn coin_names(coins: &[Coin]) -> Vec<String> {
    coins.iter().map(|coin| coin.name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::coin;

    fn sample() -> Vec<Coin> {
        vec![
            coin("bitcoin", "btc", "Bitcoin"),
            coin("ethereum", "eth", "Ethereum"),
            coin("ethereum-classic", "etc", "Ethereum Classic"),
            coin("wrapped-bitcoin", "wbtc", "Wrapped Bitcoin"),
            coin("tether", "usdt", "Tether"),
        ]
    }

    #[test]
    fn test_empty_term_returns_input_unchanged() {
        let coins = sample();
        assert_eq!(filter_coins(&coins, ""), coins);
        // whitespace is a real search term
        assert_eq!(coin_names(&filter_coins(&coins, " ")), vec!["Ethereum Classic", "Wrapped Bitcoin"]);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let coins = sample();
        let filtered = filter_coins(&coins, "BiTcOiN");
        assert_eq!(coin_names(&filtered), vec!["Bitcoin", "Wrapped Bitcoin"]);

        // symbols are not searched
        assert!(filter_coins(&coins, "usdt").is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let coins = sample();
        let once = filter_coins(&coins, "eth");
        let twice = filter_coins(&once, "eth");
        assert_eq!(once, twice);
        assert!(once.iter().all(|c| c.name.to_lowercase().contains("eth")));
    }

    #[test]
    fn test_filter_keeps_duplicates_and_order() {
        let mut coins = sample();
        coins.push(coin("bitcoin-2", "btc2", "Bitcoin"));
        let filtered = filter_coins(&coins, "bitcoin");
        assert_eq!(
            filtered.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            vec!["bitcoin", "wrapped-bitcoin", "bitcoin-2"]
        );
    }

    #[test]
    fn test_search_scenario() {
        let coins = vec![
            coin("bitcoin", "btc", "Bitcoin"),
            coin("ethereum", "eth", "Ethereum"),
        ];
        let filtered = filter_coins(&coins, "eth");
        assert_eq!(coin_names(&filtered), vec!["Ethereum"]);
        assert_eq!(resolve_id(&coins, "Ethereum").as_deref(), Some("ethereum"));
    }

    #[test]
    fn test_resolve_exact_match_only() {
        let coins = sample();
        assert_eq!(resolve_id(&coins, "Tether").as_deref(), Some("tether"));
        assert_eq!(resolve_id(&coins, "tether"), None);
        assert_eq!(resolve_id(&coins, "Teth"), None);
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let mut coins = sample();
        coins.push(coin("bitcoin-2", "btc2", "Bitcoin"));
        assert_eq!(resolve_id(&coins, "Bitcoin").as_deref(), Some("bitcoin"));
    }

    #[test]
    fn test_resolve_or_default_falls_back_to_bitcoin() {
        let coins = sample();
        assert_eq!(resolve_id_or_default(&coins, "Dogecoin"), "bitcoin");
        assert_eq!(resolve_id_or_default(&[], "Tether"), "bitcoin");
        assert_eq!(resolve_id_or_default(&coins, "Tether"), "tether");
    }
}
