//! The persisted store document
//!
//! The log, the folded metrics and the inventory ledger are persisted
//! together as a single JSON document. Every write replaces the whole
//! document; there is no partial update path.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::event::Event;
use super::inventory::LedgerEntry;
use super::metrics::Metrics;

/// Everything the store persists, as one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    /// Chronological event log, bounded by the retention cap
    pub events: Vec<Event>,
    /// Fully recomputed after each append
    pub metrics: Metrics,
    /// Ownership state per product id, updated incrementally
    pub inventory: HashMap<String, LedgerEntry>,
}

impl StoreDocument {
    /// The lazily-initialized state used when storage holds no document yet
    pub fn empty() -> Self {
        Self {
            events: Vec::new(),
            metrics: Metrics::empty(),
            inventory: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let document = StoreDocument::empty();
        assert!(document.events.is_empty());
        assert!(document.inventory.is_empty());
        assert_eq!(document.metrics.total_page_views, 0);
    }

    #[test]
    fn test_document_round_trip() {
        let document = StoreDocument::empty();
        let json = serde_json::to_string_pretty(&document).unwrap();
        assert!(json.contains("\"events\""));
        assert!(json.contains("\"metrics\""));
        assert!(json.contains("\"inventory\""));

        let parsed: StoreDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, document);
    }
}
