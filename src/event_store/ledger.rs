//! Incremental inventory ledger maintenance
//!
//! Unlike the metrics fold, the ledger is not rebuilt from the log on
//! every write; each transaction event is applied to it exactly once, at
//! append time. The ledger therefore survives log trimming and keeps the
//! full ownership provenance of every product ever transacted.

use std::collections::HashMap;

use crate::types::{Event, EventType, LedgerEntry, PurchaseRecord};

/// Apply one transaction event to the ledger
///
/// Any transaction event creates the product's entry if it does not exist
/// yet; only completed sales (`purchase_completed`, `resale_sold`) change
/// ownership.
pub fn apply_transaction(inventory: &mut HashMap<String, LedgerEntry>, event: &Event) {
    let Some(tx) = event.payload.transaction() else {
        return;
    };

    let entry = inventory
        .entry(tx.product_id.clone())
        .or_insert_with(|| LedgerEntry::unsold(tx.product_name.clone()));

    if matches!(
        event.event_type(),
        EventType::PurchaseCompleted | EventType::ResaleSold
    ) {
        entry.current_owner = Some(tx.buyer_nickname.clone());
        entry.sold = true;
        entry.last_sale_price = Some(tx.price);
        entry.purchase_history.push(PurchaseRecord {
            buyer: tx.buyer_nickname.clone(),
            seller: tx.seller_nickname.clone(),
            price: tx.price,
            timestamp: event.timestamp.clone(),
        });
    }
}
