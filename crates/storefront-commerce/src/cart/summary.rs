//! Derived cart figures.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Totals derived from the cart lines. Never stored, always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub total: Money,
    /// Sum of line quantities.
    pub item_count: u32,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}
