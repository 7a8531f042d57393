//! The event log store
//!
//! Owns the append-only log, the folded metrics and the inventory ledger,
//! and persists all three as one document through an injected storage
//! backend. Writers are serialized through a single mutex; reads work on
//! a snapshot and never block writers.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::storage::{EventStorage, StorageError};
use crate::types::{
    CollectorProfile, Event, EventDraft, EventPayload, LedgerEntry, Metrics, PaymentMethod,
    ProductData, ProductTimelineEntry, StoreDocument, TransactionData, TransactionRecord,
};
use crate::utils::{generate_event_id, now_iso8601};
use crate::validation::{self, ValidationError};

use super::ledger::apply_transaction;
use super::metrics::compute_metrics;
use super::query::{self, EventFilter};

/// Default retention cap on the event log
pub const DEFAULT_MAX_EVENTS: usize = 10_000;

/// Configuration for the event store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Retention cap; oldest events are dropped first beyond this
    pub max_events: usize,
    /// Currency assigned to purchases and offers recorded without one
    pub default_currency: String,
    /// Payment method assigned to purchases recorded without one
    pub default_payment_method: PaymentMethod,
    /// Leaderboard size in the metrics fold
    pub top_collectors_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_events: DEFAULT_MAX_EVENTS,
            default_currency: "BRL".to_string(),
            default_payment_method: PaymentMethod::Pix,
            top_collectors_limit: 10,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_events(mut self, max_events: usize) -> Self {
        self.max_events = max_events;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    pub fn with_payment_method(mut self, payment_method: PaymentMethod) -> Self {
        self.default_payment_method = payment_method;
        self
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by store operations
///
/// Failures propagate to the caller as-is: the store performs no retry,
/// logging or recovery of its own.
#[derive(Debug)]
pub enum StoreError {
    Storage(StorageError),
    Validation(ValidationError),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Storage(e) => write!(f, "storage error: {}", e),
            StoreError::Validation(e) => write!(f, "validation error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StorageError> for StoreError {
    fn from(e: StorageError) -> Self {
        StoreError::Storage(e)
    }
}

impl From<ValidationError> for StoreError {
    fn from(e: ValidationError) -> Self {
        StoreError::Validation(e)
    }
}

/// Product interaction kinds accepted by [`EventStore::track_product_event`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAction {
    View,
    Click,
    Like,
    Unlike,
    AddToCart,
    RemoveFromCart,
}

/// Optional fields for [`EventStore::track_product_event`]
#[derive(Debug, Clone, Default)]
pub struct ProductEventOptions {
    pub category: Option<String>,
    pub price: Option<f64>,
    pub session_id: Option<String>,
}

/// Optional fields for [`EventStore::record_purchase`]
#[derive(Debug, Clone, Default)]
pub struct PurchaseOptions {
    /// Present for P2P resales; switches the event kind to `resale_sold`
    pub seller_nickname: Option<String>,
    pub original_price: Option<f64>,
    pub payment_method: Option<PaymentMethod>,
    pub session_id: Option<String>,
    pub notes: Option<String>,
}

/// Optional fields for [`EventStore::record_offer`]
#[derive(Debug, Clone, Default)]
pub struct OfferOptions {
    /// Emits `offer_accepted` instead of `offer_made`
    pub accepted: bool,
    pub original_price: Option<f64>,
    pub session_id: Option<String>,
}

/// Append-only event log with derived metrics and inventory ledger
pub struct EventStore {
    storage: Box<dyn EventStorage>,
    config: StoreConfig,
    /// Serializes the read-modify-write cycle of every append
    write_lock: Mutex<()>,
}

impl EventStore {
    /// Create a store with default configuration
    pub fn new(storage: Box<dyn EventStorage>) -> Self {
        Self::with_config(storage, StoreConfig::default())
    }

    /// Create a store with custom configuration
    pub fn with_config(storage: Box<dyn EventStorage>, config: StoreConfig) -> Self {
        Self {
            storage,
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn load_document(&self) -> StoreResult<StoreDocument> {
        Ok(self.storage.load()?.unwrap_or_else(StoreDocument::empty))
    }

    /// Validate, stamp and append an event, then refresh every derived
    /// aggregate and persist the whole document
    ///
    /// The returned event carries its assigned id and timestamp. If the
    /// log would exceed the retention cap, the oldest events are dropped
    /// before the metrics fold runs, so metrics always describe the
    /// retained log exactly. A storage failure propagates and leaves the
    /// previously persisted document untouched.
    pub fn record_event(&self, draft: EventDraft) -> StoreResult<Event> {
        validation::validate_payload(&draft.payload)?;

        let _guard = self.write_lock.lock();

        let mut document = self.load_document()?;

        let event = Event {
            id: generate_event_id(),
            timestamp: now_iso8601(),
            session_id: draft.session_id,
            user_agent: draft.user_agent,
            payload: draft.payload,
        };
        document.events.push(event.clone());

        // FIFO eviction from the head of the log
        if document.events.len() > self.config.max_events {
            let excess = document.events.len() - self.config.max_events;
            document.events.drain(..excess);
        }

        document.metrics = compute_metrics(&document.events, &self.config);

        if event.event_type().is_transaction() {
            apply_transaction(&mut document.inventory, &event);
        }

        self.storage.save(&document)?;

        Ok(event)
    }

    /// Snapshot of the log, filtered
    pub fn get_events(&self, filter: &EventFilter) -> StoreResult<Vec<Event>> {
        let document = self.load_document()?;
        Ok(filter.apply(document.events))
    }

    /// The persisted aggregate, as of the last append (not recomputed here)
    pub fn get_metrics(&self) -> StoreResult<Metrics> {
        Ok(self.load_document()?.metrics)
    }

    /// Ownership state for every product ever referenced by a transaction
    pub fn get_inventory_ledger(&self) -> StoreResult<HashMap<String, LedgerEntry>> {
        Ok(self.load_document()?.inventory)
    }

    /// Completed sales, optionally narrowed to one product
    pub fn get_transaction_history(
        &self,
        product_id: Option<&str>,
    ) -> StoreResult<Vec<TransactionRecord>> {
        let document = self.load_document()?;
        Ok(query::transaction_history(&document.events, product_id))
    }

    /// Trading profile for a nickname, computed fresh from the log
    pub fn get_collector_profile(&self, nickname: &str) -> StoreResult<CollectorProfile> {
        let document = self.load_document()?;
        Ok(query::collector_profile(&document.events, nickname))
    }

    /// Human-readable event timeline for one product
    pub fn get_product_timeline(
        &self,
        product_id: &str,
    ) -> StoreResult<Vec<ProductTimelineEntry>> {
        let document = self.load_document()?;
        Ok(query::product_timeline(&document.events, product_id))
    }

    /// Record a visitor event
    pub fn track_visitor(&self, session_id: Option<String>) -> StoreResult<Event> {
        self.record_event(EventDraft {
            payload: EventPayload::Visitor,
            session_id,
            user_agent: None,
        })
    }

    /// Record a page view
    pub fn track_page_view(&self, session_id: Option<String>) -> StoreResult<Event> {
        self.record_event(EventDraft {
            payload: EventPayload::PageView,
            session_id,
            user_agent: None,
        })
    }

    /// Record a product interaction
    pub fn track_product_event(
        &self,
        action: ProductAction,
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        options: ProductEventOptions,
    ) -> StoreResult<Event> {
        let data = ProductData {
            product_id: product_id.into(),
            product_name: product_name.into(),
            product_category: options.category,
            product_price: options.price,
        };

        let payload = match action {
            ProductAction::View => EventPayload::ProductView(data),
            ProductAction::Click => EventPayload::ProductClick(data),
            ProductAction::Like => EventPayload::ProductLike(data),
            ProductAction::Unlike => EventPayload::ProductUnlike(data),
            ProductAction::AddToCart => EventPayload::AddToCart(data),
            ProductAction::RemoveFromCart => EventPayload::RemoveFromCart(data),
        };

        self.record_event(EventDraft {
            payload,
            session_id: options.session_id,
            user_agent: None,
        })
    }

    /// Record a completed purchase: an initial sale, or a resale when
    /// `options.seller_nickname` is present
    ///
    /// Price appreciation fields are derived from `options.original_price`
    /// when given; the percentage gain is rounded to the nearest integer.
    /// Currency and payment method fall back to the configured defaults.
    pub fn record_purchase(
        &self,
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        buyer_nickname: impl Into<String>,
        price: f64,
        options: PurchaseOptions,
    ) -> StoreResult<Event> {
        let mut data = TransactionData::new(
            product_id,
            product_name,
            buyer_nickname,
            price,
            self.config.default_currency.clone(),
        );
        data.seller_nickname = options.seller_nickname.clone();
        data.payment_method =
            Some(options.payment_method.unwrap_or(self.config.default_payment_method));
        data.original_price = options.original_price;
        data.notes = options.notes;

        if let Some(original) = options.original_price.filter(|p| *p > 0.0) {
            data.price_increase = Some(price - original);
            data.percentage_gain = Some((((price - original) / original) * 100.0).round() as i64);
        }

        let payload = if options.seller_nickname.is_some() {
            EventPayload::ResaleSold(data)
        } else {
            EventPayload::PurchaseCompleted(data)
        };

        self.record_event(EventDraft {
            payload,
            session_id: options.session_id,
            user_agent: None,
        })
    }

    /// Record an offer on a product, accepted or merely made
    pub fn record_offer(
        &self,
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        buyer_nickname: impl Into<String>,
        offer_amount: f64,
        current_owner: Option<&str>,
        options: OfferOptions,
    ) -> StoreResult<Event> {
        let mut data = TransactionData::new(
            product_id,
            product_name,
            buyer_nickname,
            offer_amount,
            self.config.default_currency.clone(),
        );
        data.seller_nickname = current_owner.map(str::to_string);
        data.original_price = options.original_price;

        let payload = if options.accepted {
            EventPayload::OfferAccepted(data)
        } else {
            EventPayload::OfferMade(data)
        };

        self.record_event(EventDraft {
            payload,
            session_id: options.session_id,
            user_agent: None,
        })
    }
}
