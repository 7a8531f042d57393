//! Storefront Event Store
//!
//! An append-only log of storefront domain events (traffic, product
//! interactions, P2P transactions, performance samples) from which all
//! metrics, inventory ownership state and collector profiles are derived.
//! The log, the folded metrics and the ownership ledger are persisted
//! together as a single document with bounded retention.
//!
//! # Features
//!
//! - **Append-only log**: events are immutable; only bulk FIFO trimming
//!   at the 10,000-event retention cap removes them
//! - **Derived aggregates**: metrics are refolded from the whole log on
//!   every append; the inventory ledger is updated incrementally
//! - **Pluggable storage**: file-backed with atomic writes, in-memory,
//!   or any [`EventStorage`] implementation
//! - **Serialized writers**: appends are race-free behind a single mutex;
//!   reads are lock-free snapshots
//!
//! # Modules
//!
//! - `types`: event model, aggregates and the persisted document
//! - `event_store`: the store, filters, metrics fold and ledger
//! - `storage`: persistence backends
//! - `validation`: payload validation
//! - `utils`: timestamp and id helpers
//!
//! # Example
//!
//! ```no_run
//! use storefront_events::{EventStore, FileStorage, PurchaseOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = EventStore::new(Box::new(FileStorage::new("data/event-store.json")));
//!
//!     store.record_purchase("tee-1", "Tee", "neo", 149.0, PurchaseOptions::default())?;
//!
//!     let metrics = store.get_metrics()?;
//!     println!("revenue so far: {}", metrics.total_revenue);
//!     Ok(())
//! }
//! ```

pub mod event_store;
pub mod storage;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export commonly used items at crate root
pub use event_store::{
    EventFilter, EventStore, OfferOptions, ProductAction, ProductEventOptions, PurchaseOptions,
    StoreConfig, StoreError, StoreResult, DEFAULT_MAX_EVENTS,
};
pub use storage::{EventStorage, FileStorage, MemoryStorage, StorageError, StorageResult};
pub use types::{
    CollectorProfile, CollectorRank, ErrorData, Event, EventDraft, EventPayload, EventType,
    LedgerEntry, MetricUnit, Metrics, PaymentMethod, PerformanceData, ProductData,
    ProductTimelineEntry, PurchaseRecord, SaleKind, StoreDocument, TimelineEntry, TradeAction,
    TransactionData, TransactionRecord,
};
pub use validation::ValidationError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
