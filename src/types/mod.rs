//! Data types for the storefront event store
//!
//! This module contains the event model, the derived aggregates and the
//! persisted document shape.

mod document;
mod event;
mod inventory;
mod metrics;
mod profile;

pub use document::StoreDocument;
pub use event::{
    ErrorData, Event, EventDraft, EventPayload, EventType, MetricUnit, PaymentMethod,
    PerformanceData, ProductData, TransactionData,
};
pub use inventory::{LedgerEntry, PurchaseRecord};
pub use metrics::{CollectorRank, Metrics};
pub use profile::{
    CollectorProfile, ProductTimelineEntry, SaleKind, TimelineEntry, TradeAction,
    TransactionRecord,
};
