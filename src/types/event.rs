//! Event types for the append-only domain event log
//!
//! Events are immutable records of something that happened in the
//! storefront: traffic, product interactions, P2P transactions,
//! performance samples and errors. The current metrics and inventory
//! state are derived from the log, never stored independently.

use serde::{Deserialize, Serialize};

/// Closed enumeration of every event kind the store accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    // Traffic
    Visitor,
    PageView,
    SessionStart,
    SessionEnd,

    // Product interactions
    ProductView,
    ProductClick,
    ProductLike,
    ProductUnlike,
    AddToCart,
    RemoveFromCart,

    // Transactions (P2P)
    PurchaseInitiated,
    PurchaseCompleted,
    PurchaseFailed,
    OfferMade,
    OfferAccepted,
    OfferRejected,
    ResaleListed,
    ResaleSold,

    // Performance
    PageLoadTime,
    ApiResponseTime,

    // Errors
    ErrorOccurred,
}

impl EventType {
    /// Whether this kind carries a [`ProductData`] payload
    pub fn is_product(self) -> bool {
        matches!(
            self,
            EventType::ProductView
                | EventType::ProductClick
                | EventType::ProductLike
                | EventType::ProductUnlike
                | EventType::AddToCart
                | EventType::RemoveFromCart
        )
    }

    /// Whether this kind carries a [`TransactionData`] payload
    pub fn is_transaction(self) -> bool {
        matches!(
            self,
            EventType::PurchaseInitiated
                | EventType::PurchaseCompleted
                | EventType::PurchaseFailed
                | EventType::OfferMade
                | EventType::OfferAccepted
                | EventType::OfferRejected
                | EventType::ResaleListed
                | EventType::ResaleSold
        )
    }

    /// Whether this kind carries a [`PerformanceData`] payload
    pub fn is_performance(self) -> bool {
        matches!(self, EventType::PageLoadTime | EventType::ApiResponseTime)
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventType::Visitor => "visitor",
            EventType::PageView => "page_view",
            EventType::SessionStart => "session_start",
            EventType::SessionEnd => "session_end",
            EventType::ProductView => "product_view",
            EventType::ProductClick => "product_click",
            EventType::ProductLike => "product_like",
            EventType::ProductUnlike => "product_unlike",
            EventType::AddToCart => "add_to_cart",
            EventType::RemoveFromCart => "remove_from_cart",
            EventType::PurchaseInitiated => "purchase_initiated",
            EventType::PurchaseCompleted => "purchase_completed",
            EventType::PurchaseFailed => "purchase_failed",
            EventType::OfferMade => "offer_made",
            EventType::OfferAccepted => "offer_accepted",
            EventType::OfferRejected => "offer_rejected",
            EventType::ResaleListed => "resale_listed",
            EventType::ResaleSold => "resale_sold",
            EventType::PageLoadTime => "page_load_time",
            EventType::ApiResponseTime => "api_response_time",
            EventType::ErrorOccurred => "error_occurred",
        };
        write!(f, "{}", name)
    }
}

/// How a transaction was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Pix,
    CreditCard,
    Cash,
    Other,
}

/// Unit for a performance sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricUnit {
    #[serde(rename = "ms")]
    Millis,
    #[serde(rename = "s")]
    Seconds,
}

/// Payload for product interaction events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub product_id: String,
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_price: Option<f64>,
}

/// Payload for transaction events (purchases, offers, resales)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    pub buyer_nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_session_id: Option<String>,

    /// Previous owner, present only for P2P resales
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_session_id: Option<String>,

    pub product_id: String,
    pub product_name: String,

    pub price: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    // Offer linkage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_increase: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_gain: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl TransactionData {
    /// Minimal transaction payload; optional fields start empty
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        buyer_nickname: impl Into<String>,
        price: f64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            buyer_nickname: buyer_nickname.into(),
            buyer_session_id: None,
            seller_nickname: None,
            seller_session_id: None,
            product_id: product_id.into(),
            product_name: product_name.into(),
            price,
            currency: currency.into(),
            payment_method: None,
            offer_id: None,
            original_price: None,
            offer_amount: None,
            price_increase: None,
            percentage_gain: None,
            notes: None,
            location: None,
        }
    }
}

/// Payload for performance sample events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceData {
    pub metric: String,
    pub value: f64,
    pub unit: MetricUnit,
}

/// Payload for error events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorData {
    pub error_type: String,
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

/// Tagged union of every event kind and its payload
///
/// Each variant statically enforces the fields its kind requires, so a
/// product event without a product id is unrepresentable rather than a
/// runtime surprise. Serializes with a `type` discriminator and the
/// payload fields inlined, matching the persisted document shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    Visitor,
    PageView,
    SessionStart,
    SessionEnd,

    ProductView(ProductData),
    ProductClick(ProductData),
    ProductLike(ProductData),
    ProductUnlike(ProductData),
    AddToCart(ProductData),
    RemoveFromCart(ProductData),

    PurchaseInitiated(TransactionData),
    PurchaseCompleted(TransactionData),
    PurchaseFailed(TransactionData),
    OfferMade(TransactionData),
    OfferAccepted(TransactionData),
    OfferRejected(TransactionData),
    ResaleListed(TransactionData),
    ResaleSold(TransactionData),

    PageLoadTime(PerformanceData),
    ApiResponseTime(PerformanceData),

    ErrorOccurred(ErrorData),
}

impl EventPayload {
    /// The discriminator for this payload
    pub fn event_type(&self) -> EventType {
        match self {
            EventPayload::Visitor => EventType::Visitor,
            EventPayload::PageView => EventType::PageView,
            EventPayload::SessionStart => EventType::SessionStart,
            EventPayload::SessionEnd => EventType::SessionEnd,
            EventPayload::ProductView(_) => EventType::ProductView,
            EventPayload::ProductClick(_) => EventType::ProductClick,
            EventPayload::ProductLike(_) => EventType::ProductLike,
            EventPayload::ProductUnlike(_) => EventType::ProductUnlike,
            EventPayload::AddToCart(_) => EventType::AddToCart,
            EventPayload::RemoveFromCart(_) => EventType::RemoveFromCart,
            EventPayload::PurchaseInitiated(_) => EventType::PurchaseInitiated,
            EventPayload::PurchaseCompleted(_) => EventType::PurchaseCompleted,
            EventPayload::PurchaseFailed(_) => EventType::PurchaseFailed,
            EventPayload::OfferMade(_) => EventType::OfferMade,
            EventPayload::OfferAccepted(_) => EventType::OfferAccepted,
            EventPayload::OfferRejected(_) => EventType::OfferRejected,
            EventPayload::ResaleListed(_) => EventType::ResaleListed,
            EventPayload::ResaleSold(_) => EventType::ResaleSold,
            EventPayload::PageLoadTime(_) => EventType::PageLoadTime,
            EventPayload::ApiResponseTime(_) => EventType::ApiResponseTime,
            EventPayload::ErrorOccurred(_) => EventType::ErrorOccurred,
        }
    }

    /// Product payload, if this is a product interaction event
    pub fn product(&self) -> Option<&ProductData> {
        match self {
            EventPayload::ProductView(data)
            | EventPayload::ProductClick(data)
            | EventPayload::ProductLike(data)
            | EventPayload::ProductUnlike(data)
            | EventPayload::AddToCart(data)
            | EventPayload::RemoveFromCart(data) => Some(data),
            _ => None,
        }
    }

    /// Transaction payload, if this is a transaction event
    pub fn transaction(&self) -> Option<&TransactionData> {
        match self {
            EventPayload::PurchaseInitiated(data)
            | EventPayload::PurchaseCompleted(data)
            | EventPayload::PurchaseFailed(data)
            | EventPayload::OfferMade(data)
            | EventPayload::OfferAccepted(data)
            | EventPayload::OfferRejected(data)
            | EventPayload::ResaleListed(data)
            | EventPayload::ResaleSold(data) => Some(data),
            _ => None,
        }
    }

    /// Performance payload, if this is a performance sample
    pub fn performance(&self) -> Option<&PerformanceData> {
        match self {
            EventPayload::PageLoadTime(data) | EventPayload::ApiResponseTime(data) => Some(data),
            _ => None,
        }
    }

    /// Error payload, if this is an error event
    pub fn error(&self) -> Option<&ErrorData> {
        match self {
            EventPayload::ErrorOccurred(data) => Some(data),
            _ => None,
        }
    }

    /// Product id referenced by this payload, for product and transaction events
    pub fn product_id(&self) -> Option<&str> {
        self.product()
            .map(|p| p.product_id.as_str())
            .or_else(|| self.transaction().map(|t| t.product_id.as_str()))
    }
}

/// An immutable event in the log
///
/// `id` and `timestamp` are assigned by the store at append time and are
/// never reused or rewritten. Events are only removed in bulk from the
/// head of the log when retention is exceeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl Event {
    /// The discriminator for this event
    pub fn event_type(&self) -> EventType {
        self.payload.event_type()
    }
}

/// An event as submitted by a caller, before the store assigns
/// `id` and `timestamp`
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub payload: EventPayload,
    pub session_id: Option<String>,
    pub user_agent: Option<String>,
}

impl EventDraft {
    pub fn new(payload: EventPayload) -> Self {
        Self {
            payload,
            session_id: None,
            user_agent: None,
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

impl From<EventPayload> for EventDraft {
    fn from(payload: EventPayload) -> Self {
        Self::new(payload)
    }
}
