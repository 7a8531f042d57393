//! Derived read models: collector profiles and transaction views
//!
//! None of these are persisted; each is computed on demand by filtering
//! the current event log.

use serde::{Deserialize, Serialize};

use super::event::EventType;

/// Buy/sell direction of a timeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    #[serde(rename = "BOUGHT")]
    Bought,
    #[serde(rename = "SOLD")]
    Sold,
}

/// One buy or sell action in a collector's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub timestamp: String,
    pub action: TradeAction,
    pub product_name: String,
    /// Negative for purchases, positive for sales
    pub amount: f64,
}

/// Read-only view of a nickname's trading activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorProfile {
    pub nickname: String,
    pub items_owned: Vec<String>,
    pub total_spent: f64,
    pub items_sold: u64,
    pub total_earned: f64,
    /// `total_earned - total_spent`
    pub net_position: f64,
    /// Reverse-chronological buy/sell history
    pub timeline: Vec<TimelineEntry>,
}

/// Classification of a completed sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleKind {
    InitialSale,
    Resale,
}

/// A completed sale, as returned by the transaction history query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub product_id: String,
    pub product_name: String,
    pub buyer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
    pub price: f64,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: SaleKind,
}

/// One line of a product's human-readable event timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTimelineEntry {
    pub timestamp: String,
    pub event_type: EventType,
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_action_serialization() {
        assert_eq!(
            serde_json::to_string(&TradeAction::Bought).unwrap(),
            "\"BOUGHT\""
        );
        assert_eq!(serde_json::to_string(&TradeAction::Sold).unwrap(), "\"SOLD\"");
    }

    #[test]
    fn test_transaction_record_type_field() {
        let record = TransactionRecord {
            product_id: "tee-1".to_string(),
            product_name: "Tee".to_string(),
            buyer: "neo".to_string(),
            seller: Some("morpheus".to_string()),
            price: 200.0,
            timestamp: "2026-08-26T10:00:00.000Z".to_string(),
            kind: SaleKind::Resale,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"type\":\"resale\""));

        let initial = TransactionRecord {
            seller: None,
            kind: SaleKind::InitialSale,
            ..record
        };
        let json = serde_json::to_string(&initial).unwrap();
        assert!(json.contains("\"type\":\"initial_sale\""));
        assert!(!json.contains("\"seller\""));
    }
}
