//! Shopping cart module.
//!
//! Contains the cart store, its line items and derived totals.

mod store;
mod summary;

pub use store::{CartLineItem, CartStore, MAX_QUANTITY_PER_ITEM};
pub use summary::CartSummary;
