//! Purchase module.
//!
//! Contains the purchase flow, order details and the order-submission
//! contract.

mod details;
mod flow;
mod submit;

pub use details::OrderDetails;
pub use flow::{PurchaseFlow, PurchaseStep};
pub use submit::{LocalOrderSubmitter, OrderReceipt, OrderSubmitter};
