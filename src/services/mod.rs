pub mod chart_service;
pub mod dashboard_service;
pub mod format_service;
pub mod market_data_service;
pub mod selection_service;

#[cfg(test)]
pub mod testing;
