//! Commerce error types.

use crate::ids::{ProductId, Size};
use storefront_cache::CacheError;
use thiserror::Error;

/// Errors surfaced by the stores, the purchase flow and the session.
///
/// None of these are fatal: each one is reported to the caller so it can be
/// shown to the shopper.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Attempted to add a size the product does not offer.
    #[error("Product {product_id} is not offered in size {size}")]
    InvalidVariant { product_id: ProductId, size: Size },

    /// Tried to leave the cart step with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The order-submission service failed; the flow stays on order details.
    #[error("Order submission failed: {0}")]
    Submission(#[from] SubmissionError),

    /// Order details are missing required fields.
    #[error("Order details incomplete: missing {0}")]
    OrderDetailsIncomplete(String),

    /// `advance()` on a purchase that has already been confirmed.
    #[error("Order № {0} is already confirmed; reset the purchase to place another")]
    AlreadyConfirmed(String),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Product {0} is out of stock")]
    OutOfStock(ProductId),

    #[error("Storage error: {0}")]
    Storage(#[from] CacheError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Failure reported by the order-submission collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("order rejected: {0}")]
    Rejected(String),

    #[error("order service unavailable: {0}")]
    Unavailable(String),

    #[error("order service timed out")]
    Timeout,
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
