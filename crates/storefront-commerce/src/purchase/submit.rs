//! Order submission.

use crate::cart::CartLineItem;
use crate::error::SubmissionError;
use crate::ids::OrderId;
use crate::money::{Currency, Money};
use crate::purchase::OrderDetails;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use storefront_cache::{cache_key, Cache};
use tracing::info;

/// External service that accepts an order and hands back its identifier.
///
/// This is the only asynchronous boundary of the purchase flow.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    async fn submit(
        &self,
        lines: &[CartLineItem],
        details: &OrderDetails,
    ) -> Result<OrderId, SubmissionError>;
}

/// What was ordered, as recorded by [`LocalOrderSubmitter`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub lines: Vec<CartLineItem>,
    pub details: OrderDetails,
    pub total: Money,
    /// Unix timestamp.
    pub placed_at: i64,
}

/// Submitter that accepts every order locally and files a receipt in the cache.
pub struct LocalOrderSubmitter {
    cache: Cache,
}

impl LocalOrderSubmitter {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// Look up a previously filed receipt.
    pub fn receipt(&self, order_id: &OrderId) -> Option<OrderReceipt> {
        self.cache
            .get(&cache_key!("order", order_id))
            .ok()
            .flatten()
    }
}

#[async_trait]
impl OrderSubmitter for LocalOrderSubmitter {
    async fn submit(
        &self,
        lines: &[CartLineItem],
        details: &OrderDetails,
    ) -> Result<OrderId, SubmissionError> {
        let currency = lines
            .first()
            .map(|l| l.price_snapshot.currency)
            .unwrap_or(Currency::default());
        let total = lines
            .iter()
            .fold(Money::zero(currency), |acc, l| acc + l.line_total());

        let receipt = OrderReceipt {
            order_id: OrderId::generate(),
            lines: lines.to_vec(),
            details: details.clone(),
            total,
            placed_at: current_timestamp(),
        };

        self.cache
            .set(&cache_key!("order", receipt.order_id), &receipt)
            .map_err(|e| SubmissionError::Unavailable(e.to_string()))?;

        info!(order_id = %receipt.order_id, total = %receipt.total, "order filed locally");
        Ok(receipt.order_id)
    }
}

fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
