//! Event payload validation
//!
//! The store rejects malformed payloads before anything is appended, so a
//! partially-populated event can never reach the log. Errors name the
//! offending field using its wire (camelCase) name.

use crate::types::EventPayload;

/// A payload field that is missing, empty or out of range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Wire name of the rejected field, e.g. `productId`
    pub field: &'static str,
}

impl ValidationError {
    fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "missing or invalid field '{}'", self.field)
    }
}

impl std::error::Error for ValidationError {}

/// Check that a payload carries the fields its kind requires
pub fn validate_payload(payload: &EventPayload) -> Result<(), ValidationError> {
    if let Some(product) = payload.product() {
        if product.product_id.is_empty() {
            return Err(ValidationError::new("productId"));
        }
        if product.product_name.is_empty() {
            return Err(ValidationError::new("productName"));
        }
        if let Some(price) = product.product_price {
            if !price.is_finite() || price < 0.0 {
                return Err(ValidationError::new("productPrice"));
            }
        }
    }

    if let Some(tx) = payload.transaction() {
        if tx.product_id.is_empty() {
            return Err(ValidationError::new("productId"));
        }
        if tx.product_name.is_empty() {
            return Err(ValidationError::new("productName"));
        }
        if tx.buyer_nickname.is_empty() {
            return Err(ValidationError::new("buyerNickname"));
        }
        if !tx.price.is_finite() || tx.price < 0.0 {
            return Err(ValidationError::new("price"));
        }
        if tx.currency.is_empty() {
            return Err(ValidationError::new("currency"));
        }
        if let Some(seller) = &tx.seller_nickname {
            if seller.is_empty() {
                return Err(ValidationError::new("sellerNickname"));
            }
        }
    }

    if let Some(sample) = payload.performance() {
        if sample.metric.is_empty() {
            return Err(ValidationError::new("metric"));
        }
        if !sample.value.is_finite() {
            return Err(ValidationError::new("value"));
        }
    }

    if let Some(error) = payload.error() {
        if error.error_type.is_empty() {
            return Err(ValidationError::new("errorType"));
        }
        if error.error_message.is_empty() {
            return Err(ValidationError::new("errorMessage"));
        }
    }

    Ok(())
}
