//! Aggregate metrics derived from the event log
//!
//! `Metrics` is a pure fold over the log: it is recomputed wholesale after
//! every append and persisted alongside the events, never mutated in place.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::utils::now_iso8601;

/// One row of the top-collectors leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorRank {
    pub nickname: String,
    pub items_owned: u64,
    pub total_spent: f64,
}

/// Aggregates folded from the entire current event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    // Traffic
    pub total_visitors: u64,
    pub total_page_views: u64,
    /// Unique session ids seen on `session_start` events
    pub total_sessions: u64,

    // Product interactions, keyed by product id
    pub product_views: HashMap<String, u64>,
    pub product_clicks: HashMap<String, u64>,
    pub product_likes: HashMap<String, u64>,
    pub add_to_cart_events: u64,

    // Transactions
    pub total_sales: u64,
    pub total_revenue: f64,
    pub average_transaction_value: f64,
    pub total_offers: u64,
    pub accepted_offers: u64,

    // P2P
    pub resale_volume: u64,
    pub average_price_appreciation: f64,
    pub top_collectors: Vec<CollectorRank>,

    // Performance
    pub average_page_load_time: f64,
    pub average_api_response_time: f64,

    pub last_updated: String,
}

impl Metrics {
    /// Zeroed metrics, as persisted before any event has been recorded
    pub fn empty() -> Self {
        Self {
            total_visitors: 0,
            total_page_views: 0,
            total_sessions: 0,
            product_views: HashMap::new(),
            product_clicks: HashMap::new(),
            product_likes: HashMap::new(),
            add_to_cart_events: 0,
            total_sales: 0,
            total_revenue: 0.0,
            average_transaction_value: 0.0,
            total_offers: 0,
            accepted_offers: 0,
            resale_volume: 0,
            average_price_appreciation: 0.0,
            top_collectors: Vec::new(),
            average_page_load_time: 0.0,
            average_api_response_time: 0.0,
            last_updated: now_iso8601(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metrics_are_zeroed() {
        let metrics = Metrics::empty();
        assert_eq!(metrics.total_visitors, 0);
        assert_eq!(metrics.total_sales, 0);
        assert_eq!(metrics.average_transaction_value, 0.0);
        assert!(metrics.product_views.is_empty());
        assert!(metrics.top_collectors.is_empty());
        assert!(!metrics.last_updated.is_empty());
    }

    #[test]
    fn test_metrics_serialize_camel_case() {
        let metrics = Metrics::empty();
        let json = serde_json::to_string(&metrics).unwrap();
        assert!(json.contains("\"totalPageViews\""));
        assert!(json.contains("\"averageTransactionValue\""));
        assert!(json.contains("\"topCollectors\""));
        assert!(json.contains("\"lastUpdated\""));
    }
}
