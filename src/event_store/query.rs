//! Queries over the event log
//!
//! Filtering plus the derived read models: transaction history, collector
//! profiles and per-product timelines. All of these operate on a snapshot
//! of the log taken at call time.

use crate::types::{
    CollectorProfile, Event, EventType, ProductTimelineEntry, SaleKind, TimelineEntry,
    TradeAction, TransactionRecord,
};

/// Criteria for selecting events; all set fields must match (AND)
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Keep events whose type is in this set
    pub types: Option<Vec<EventType>>,
    /// Keep events referencing this product id (product and transaction kinds)
    pub product_id: Option<String>,
    /// Keep transaction events where this nickname is buyer or seller
    pub nickname: Option<String>,
    /// Inclusive lower bound on timestamp (ISO 8601 string comparison)
    pub start_date: Option<String>,
    /// Inclusive upper bound on timestamp
    pub end_date: Option<String>,
    /// Keep only the most recent N events after all other filters
    pub limit: Option<usize>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, event_type: EventType) -> Self {
        self.types.get_or_insert_with(Vec::new).push(event_type);
        self
    }

    pub fn with_types(mut self, types: Vec<EventType>) -> Self {
        self.types = Some(types);
        self
    }

    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    pub fn with_end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a single event satisfies every set criterion
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(types) = &self.types {
            if !types.contains(&event.event_type()) {
                return false;
            }
        }

        if let Some(product_id) = &self.product_id {
            match event.payload.product_id() {
                Some(id) if id == product_id => {}
                _ => return false,
            }
        }

        if let Some(nickname) = &self.nickname {
            let Some(tx) = event.payload.transaction() else {
                return false;
            };
            let is_buyer = tx.buyer_nickname == *nickname;
            let is_seller = tx.seller_nickname.as_deref() == Some(nickname.as_str());
            if !is_buyer && !is_seller {
                return false;
            }
        }

        if let Some(start) = &self.start_date {
            if event.timestamp < *start {
                return false;
            }
        }
        if let Some(end) = &self.end_date {
            if event.timestamp > *end {
                return false;
            }
        }

        true
    }

    /// Filter a log, preserving chronological order, then apply `limit`
    pub fn apply(&self, events: Vec<Event>) -> Vec<Event> {
        let mut kept: Vec<Event> = events.into_iter().filter(|e| self.matches(e)).collect();

        if let Some(limit) = self.limit {
            if kept.len() > limit {
                kept.drain(..kept.len() - limit);
            }
        }

        kept
    }
}

/// Completed sales (`purchase_completed` and `resale_sold`), classified as
/// initial sale or resale by the presence of a seller nickname
pub fn transaction_history(events: &[Event], product_id: Option<&str>) -> Vec<TransactionRecord> {
    events
        .iter()
        .filter(|e| {
            matches!(
                e.event_type(),
                EventType::PurchaseCompleted | EventType::ResaleSold
            )
        })
        .filter_map(|e| e.payload.transaction().map(|tx| (e, tx)))
        .filter(|(_, tx)| product_id.map_or(true, |id| tx.product_id == id))
        .map(|(e, tx)| TransactionRecord {
            product_id: tx.product_id.clone(),
            product_name: tx.product_name.clone(),
            buyer: tx.buyer_nickname.clone(),
            seller: tx.seller_nickname.clone(),
            price: tx.price,
            timestamp: e.timestamp.clone(),
            kind: if tx.seller_nickname.is_some() {
                SaleKind::Resale
            } else {
                SaleKind::InitialSale
            },
        })
        .collect()
}

/// Fold a nickname's transaction events into a profile
///
/// Buys add to `total_spent` and the owned list; sells add to
/// `total_earned` and remove the item. The timeline is returned newest
/// first.
pub fn collector_profile(events: &[Event], nickname: &str) -> CollectorProfile {
    let mut profile = CollectorProfile {
        nickname: nickname.to_string(),
        items_owned: Vec::new(),
        total_spent: 0.0,
        items_sold: 0,
        total_earned: 0.0,
        net_position: 0.0,
        timeline: Vec::new(),
    };

    let filter = EventFilter::new().with_nickname(nickname);
    for event in events.iter().filter(|e| filter.matches(e)) {
        let Some(tx) = event.payload.transaction() else {
            continue;
        };

        if tx.buyer_nickname == nickname {
            profile.total_spent += tx.price;
            profile.items_owned.push(tx.product_name.clone());
            profile.timeline.push(TimelineEntry {
                timestamp: event.timestamp.clone(),
                action: TradeAction::Bought,
                product_name: tx.product_name.clone(),
                amount: -tx.price,
            });
        }

        if tx.seller_nickname.as_deref() == Some(nickname) {
            profile.total_earned += tx.price;
            profile.items_sold += 1;
            profile.items_owned.retain(|name| name != &tx.product_name);
            profile.timeline.push(TimelineEntry {
                timestamp: event.timestamp.clone(),
                action: TradeAction::Sold,
                product_name: tx.product_name.clone(),
                amount: tx.price,
            });
        }
    }

    profile.net_position = profile.total_earned - profile.total_spent;
    profile
        .timeline
        .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    profile
}

/// Human-readable event timeline for one product
pub fn product_timeline(events: &[Event], product_id: &str) -> Vec<ProductTimelineEntry> {
    let filter = EventFilter::new().with_product_id(product_id);

    events
        .iter()
        .filter(|e| filter.matches(e))
        .map(|event| ProductTimelineEntry {
            timestamp: event.timestamp.clone(),
            event_type: event.event_type(),
            details: describe(event),
        })
        .collect()
}

fn describe(event: &Event) -> String {
    if let Some(product) = event.payload.product() {
        return format!("{}: {}", event.event_type(), product.product_name);
    }

    if let Some(tx) = event.payload.transaction() {
        match event.event_type() {
            EventType::PurchaseCompleted => {
                return format!(
                    "{} bought \"{}\" for {} {}",
                    tx.buyer_nickname, tx.product_name, tx.price, tx.currency
                );
            }
            EventType::ResaleSold => {
                let seller = tx.seller_nickname.as_deref().unwrap_or("unknown");
                let mut details = format!(
                    "{} bought from {} for {} {}",
                    tx.buyer_nickname, seller, tx.price, tx.currency
                );
                if let Some(gain) = tx.percentage_gain {
                    details.push_str(&format!(" ({:+}%)", gain));
                }
                return details;
            }
            EventType::OfferMade => {
                return format!("{} offered {} {}", tx.buyer_nickname, tx.price, tx.currency);
            }
            _ => {}
        }
    }

    String::new()
}
