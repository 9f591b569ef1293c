//! Purchase flow state machine.

use crate::cart::{CartLineItem, CartStore};
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::purchase::{OrderDetails, OrderSubmitter};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

const CONFIRMATION_NOTICE: &str = "Дякуємо за замовлення! \
    Ваше замовлення буде оброблене найближчим часом. \
    Наші менеджери обов'язково зв'яжуться з Вами для підтвердження деталей.";

/// Steps of the purchase panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseStep {
    /// Cart review.
    #[default]
    Cart,
    /// Contact and delivery form.
    OrderDetails,
    /// Order accepted.
    Confirmed,
}

impl PurchaseStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStep::Cart => "cart",
            PurchaseStep::OrderDetails => "order_details",
            PurchaseStep::Confirmed => "confirmed",
        }
    }

    /// Step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            PurchaseStep::Cart => 1,
            PurchaseStep::OrderDetails => 2,
            PurchaseStep::Confirmed => 3,
        }
    }
}

impl fmt::Display for PurchaseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pass through the purchase panel: Cart → OrderDetails → Confirmed.
///
/// Transitions only move forward through [`PurchaseFlow::advance`];
/// [`PurchaseFlow::reset`] returns to the cart step from anywhere. The cart is
/// emptied only when an order is confirmed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseFlow {
    step: PurchaseStep,
    /// Lines being ordered. Refreshed before submission; the receipt afterwards.
    cart_snapshot: Vec<CartLineItem>,
    order_id: Option<OrderId>,
    order_details: Option<OrderDetails>,
}

impl PurchaseFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> PurchaseStep {
        self.step
    }

    pub fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    pub fn cart_snapshot(&self) -> &[CartLineItem] {
        &self.cart_snapshot
    }

    pub fn order_details(&self) -> Option<&OrderDetails> {
        self.order_details.as_ref()
    }

    /// 1-based position of the current step.
    pub fn step_number(&self) -> u8 {
        self.step.number()
    }

    pub fn is_confirmed(&self) -> bool {
        self.step == PurchaseStep::Confirmed
    }

    /// Record the form contents. Validation happens on `advance`.
    pub fn set_order_details(&mut self, details: OrderDetails) {
        self.order_details = Some(details);
    }

    /// Move to the next step.
    ///
    /// - From `Cart`: requires a non-empty cart.
    /// - From `OrderDetails`: requires complete order details and a non-empty
    ///   cart, then submits the order. On success the flow is `Confirmed` and
    ///   the cart is cleared; on failure the flow stays on `OrderDetails` and
    ///   the error is returned so the caller can retry.
    /// - From `Confirmed`: always an error.
    pub async fn advance<S>(
        &mut self,
        cart: &mut CartStore,
        submitter: &S,
    ) -> Result<PurchaseStep, CommerceError>
    where
        S: OrderSubmitter + ?Sized,
    {
        match self.step {
            PurchaseStep::Cart => {
                if cart.is_empty() {
                    return Err(CommerceError::EmptyCart);
                }
                self.cart_snapshot = cart.snapshot();
                self.step = PurchaseStep::OrderDetails;
                info!(lines = self.cart_snapshot.len(), "purchase moved to order details");
            }
            PurchaseStep::OrderDetails => {
                let details = match &self.order_details {
                    Some(details) => details,
                    None => {
                        return Err(CommerceError::OrderDetailsIncomplete(
                            OrderDetails::default().missing_fields().join(", "),
                        ))
                    }
                };
                let missing = details.missing_fields();
                if !missing.is_empty() {
                    return Err(CommerceError::OrderDetailsIncomplete(missing.join(", ")));
                }
                if cart.is_empty() {
                    return Err(CommerceError::EmptyCart);
                }

                self.cart_snapshot = cart.snapshot();
                let submitted = submitter.submit(&self.cart_snapshot, details).await;
                match submitted {
                    Ok(order_id) => {
                        info!(%order_id, "order confirmed");
                        self.order_id = Some(order_id);
                        self.step = PurchaseStep::Confirmed;
                        self.complete_order(cart);
                    }
                    Err(e) => {
                        warn!(error = %e, "order submission failed");
                        return Err(e.into());
                    }
                }
            }
            PurchaseStep::Confirmed => {
                let order_id = self.order_id.as_ref().map(OrderId::as_str).unwrap_or_default();
                return Err(CommerceError::AlreadyConfirmed(order_id.to_string()));
            }
        }

        Ok(self.step)
    }

    /// Return to the cart step, forgetting any order id. The cart is untouched.
    pub fn reset(&mut self) {
        self.step = PurchaseStep::Cart;
        self.order_id = None;
        self.cart_snapshot.clear();
    }

    /// Closing the purchase panel.
    pub fn dismiss(&mut self) {
        self.reset();
    }

    /// Heading shown above the current step.
    pub fn current_step_label(&self) -> String {
        match self.step {
            PurchaseStep::Cart => "Кошик".to_string(),
            PurchaseStep::OrderDetails => "Замовлення".to_string(),
            PurchaseStep::Confirmed => format!(
                "Ми прийняли Ваше замовлення № {}",
                self.order_id.as_ref().map(OrderId::as_str).unwrap_or_default()
            ),
        }
    }

    /// Thank-you notice shown once the order is confirmed.
    pub fn confirmation_notice(&self) -> Option<&'static str> {
        self.is_confirmed().then_some(CONFIRMATION_NOTICE)
    }

    fn complete_order(&mut self, cart: &mut CartStore) {
        cart.clear();
    }
}
