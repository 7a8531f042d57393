//! Event log store
//!
//! Single source of truth for all storefront activity:
//! - `EventStore`: validates, stamps and appends events; every metric and
//!   ownership fact is derived from the log, never stored redundantly
//! - `EventFilter`: snapshot queries over the log
//! - metrics fold and inventory ledger maintenance
//!
//! # Architecture
//!
//! ```text
//! Write path (serialized through one mutex):
//! ┌─────────┐   ┌──────────┐   ┌────────────┐   ┌──────────────┐   ┌─────────┐
//! │ caller  │──►│ validate │──►│ append +   │──►│ refold       │──►│ persist │
//! │ (draft) │   │ payload  │   │ FIFO trim  │   │ metrics +    │   │ whole   │
//! └─────────┘   └──────────┘   └────────────┘   │ apply ledger │   │ document│
//!                                               └──────────────┘   └─────────┘
//!
//! Read path (lock-free, snapshot semantics):
//! ┌────────────────┐   ┌────────────────────────────────────┐
//! │ load document  │──►│ filter / derive profile / history  │
//! └────────────────┘   └────────────────────────────────────┘
//! ```

mod ledger;
mod metrics;
mod query;
mod store;

pub use ledger::apply_transaction;
pub use metrics::compute_metrics;
pub use query::{collector_profile, product_timeline, transaction_history, EventFilter};
pub use store::{
    EventStore, OfferOptions, ProductAction, ProductEventOptions, PurchaseOptions, StoreConfig,
    StoreError, StoreResult, DEFAULT_MAX_EVENTS,
};
