//! Inventory ownership ledger
//!
//! Tracks who currently owns each product and its full purchase
//! provenance. This is derived incrementally from transaction events as
//! they are appended; it is distinct from any stock/availability record.

use serde::{Deserialize, Serialize};

/// One completed sale in a product's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub buyer: String,
    /// Previous owner, absent for the initial sale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
    pub price: f64,
    pub timestamp: String,
}

/// Ownership state for a single product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_owner: Option<String>,
    pub purchase_history: Vec<PurchaseRecord>,
    pub sold: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sale_price: Option<f64>,
}

impl LedgerEntry {
    /// Entry for a product first referenced by a transaction event,
    /// before any completed sale
    pub fn unsold(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current_owner: None,
            purchase_history: Vec::new(),
            sold: false,
            last_sale_price: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsold_entry() {
        let entry = LedgerEntry::unsold("Tee");
        assert_eq!(entry.name, "Tee");
        assert!(!entry.sold);
        assert!(entry.current_owner.is_none());
        assert!(entry.purchase_history.is_empty());
    }

    #[test]
    fn test_ledger_entry_serialization() {
        let entry = LedgerEntry {
            name: "Tee".to_string(),
            current_owner: Some("neo".to_string()),
            purchase_history: vec![PurchaseRecord {
                buyer: "neo".to_string(),
                seller: None,
                price: 149.0,
                timestamp: "2026-08-26T10:00:00.000Z".to_string(),
            }],
            sold: true,
            last_sale_price: Some(149.0),
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"currentOwner\":\"neo\""));
        assert!(json.contains("\"purchaseHistory\""));
        assert!(json.contains("\"lastSalePrice\":149.0"));
        // Initial sale has no seller
        assert!(!json.contains("\"seller\""));
    }
}
