//! Cart store and line items.

use crate::cart::CartSummary;
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{ProductId, Size};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// One distinct (product, size) entry in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: ProductId,
    /// `Size::NONE` for sizeless products.
    pub selected_size: Size,
    /// Always at least 1 while the line is in the cart.
    pub quantity: u32,
    /// Price captured when the line was first added.
    pub price_snapshot: Money,
    /// Product name (denormalized for display).
    pub product_name: String,
}

impl CartLineItem {
    fn new(product: &Product, size: Size) -> Self {
        Self {
            product_id: product.id,
            selected_size: size,
            quantity: 1,
            price_snapshot: product.price,
            product_name: product.name.clone(),
        }
    }

    pub fn key(&self) -> (ProductId, Size) {
        (self.product_id, self.selected_size)
    }

    /// `price_snapshot * quantity`.
    pub fn line_total(&self) -> Money {
        self.price_snapshot.times(self.quantity)
    }

    fn matches(&self, product_id: ProductId, size: Size) -> bool {
        self.product_id == product_id && self.selected_size == size
    }
}

type Listener = Box<dyn Fn(&CartSummary) + Send>;

/// The session's cart: ordered line items keyed by `(product, size)`.
///
/// Every mutation is total except [`CartStore::add_item`], which rejects sizes
/// the product does not offer. Operations on lines that do not exist are
/// no-ops, so stale UI state can never break the flow.
pub struct CartStore {
    items: Vec<CartLineItem>,
    currency: Currency,
    listeners: Vec<Listener>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::with_currency(Currency::default())
    }

    pub fn with_currency(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
            listeners: Vec::new(),
        }
    }

    /// Add one unit of `product` in `size`.
    ///
    /// An existing `(product, size)` line is incremented instead of duplicated.
    /// Returns the line's quantity after the call.
    pub fn add_item(&mut self, product: &Product, size: Size) -> Result<u32, CommerceError> {
        if !product.offers_size(size) {
            return Err(CommerceError::InvalidVariant {
                product_id: product.id,
                size,
            });
        }

        let quantity = match self.position(product.id, size) {
            Some(index) => {
                let line = &mut self.items[index];
                if line.quantity >= MAX_QUANTITY_PER_ITEM {
                    debug!(product_id = %product.id, %size, "line already at maximum quantity");
                    return Ok(line.quantity);
                }
                line.quantity += 1;
                line.quantity
            }
            None => {
                self.items.push(CartLineItem::new(product, size));
                1
            }
        };

        debug!(product_id = %product.id, %size, quantity, "added to cart");
        self.notify();
        Ok(quantity)
    }

    /// Remove the `(product, size)` line regardless of its quantity.
    ///
    /// Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: ProductId, size: Size) -> bool {
        match self.position(product_id, size) {
            Some(index) => {
                self.items.remove(index);
                self.notify();
                true
            }
            None => {
                debug!(%product_id, %size, "remove on missing cart line ignored");
                false
            }
        }
    }

    /// Increase a line's quantity by one. Returns whether anything changed.
    pub fn increment_quantity(&mut self, product_id: ProductId, size: Size) -> bool {
        let Some(index) = self.position(product_id, size) else {
            debug!(%product_id, %size, "increment on missing cart line ignored");
            return false;
        };
        let line = &mut self.items[index];
        if line.quantity >= MAX_QUANTITY_PER_ITEM {
            return false;
        }
        line.quantity += 1;
        self.notify();
        true
    }

    /// Decrease a line's quantity by one; a line at quantity 1 is removed.
    ///
    /// Returns whether anything changed.
    pub fn decrement_quantity(&mut self, product_id: ProductId, size: Size) -> bool {
        let Some(index) = self.position(product_id, size) else {
            debug!(%product_id, %size, "decrement on missing cart line ignored");
            return false;
        };
        if self.items[index].quantity <= 1 {
            self.items.remove(index);
        } else {
            self.items[index].quantity -= 1;
        }
        self.notify();
        true
    }

    /// Sum of `price_snapshot * quantity` over all lines, computed on demand.
    pub fn total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(self.currency), |acc, line| {
                let line_total = line.line_total();
                acc.try_add(&line_total).unwrap_or_else(|| {
                    warn!(
                        product_id = %line.product_id,
                        currency = %line_total.currency,
                        "skipping cart line priced in a foreign currency"
                    );
                    acc
                })
            })
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.notify();
    }

    pub fn find_item(&self, product_id: ProductId, size: Size) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.matches(product_id, size))
    }

    /// Whether any size of `product_id` is in the cart.
    pub fn contains_product(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            total: self.total(),
            item_count: self.item_count(),
        }
    }

    pub fn snapshot(&self) -> Vec<CartLineItem> {
        self.items.clone()
    }

    /// Replace the contents with previously saved lines.
    ///
    /// Duplicate keys are merged and zero-quantity lines dropped, so a
    /// hand-edited or stale snapshot cannot break the line invariants.
    pub fn restore(&mut self, lines: Vec<CartLineItem>) {
        self.items.clear();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match self.position(line.product_id, line.selected_size) {
                Some(index) => {
                    let existing = &mut self.items[index];
                    existing.quantity = existing
                        .quantity
                        .saturating_add(line.quantity)
                        .min(MAX_QUANTITY_PER_ITEM);
                }
                None => {
                    let mut line = line;
                    line.quantity = line.quantity.min(MAX_QUANTITY_PER_ITEM);
                    self.items.push(line);
                }
            }
        }
        self.notify();
    }

    /// Register a callback that receives the recomputed summary after every
    /// effective mutation.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&CartSummary) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn position(&self, product_id: ProductId, size: Size) -> Option<usize> {
        self.items.iter().position(|i| i.matches(product_id, size))
    }

    fn notify(&self) {
        if self.listeners.is_empty() {
            return;
        }
        let summary = self.summary();
        for listener in &self.listeners {
            listener(&summary);
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("currency", &self.currency)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn sneakers() -> Product {
        Product::new(1, "Кеди", Money::from_units(100, Currency::UAH), 2).with_sizes([38, 39])
    }

    fn scarf() -> Product {
        Product::new(2, "Шарф", Money::from_units(250, Currency::UAH), 3)
    }

    #[test]
    fn test_add_twice_yields_one_line() {
        let mut cart = CartStore::new();
        cart.add_item(&scarf(), Size::NONE).unwrap();
        let quantity = cart.add_item(&scarf(), Size::NONE).unwrap();

        assert_eq!(quantity, 2);
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_sizes_are_distinct_lines() {
        let mut cart = CartStore::new();
        cart.add_item(&sneakers(), Size::new(38)).unwrap();
        cart.add_item(&sneakers(), Size::new(39)).unwrap();
        cart.add_item(&sneakers(), Size::NONE).unwrap();

        assert_eq!(cart.unique_item_count(), 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_invalid_variant_leaves_cart_unchanged() {
        let mut cart = CartStore::new();
        cart.add_item(&sneakers(), Size::new(38)).unwrap();

        let err = cart.add_item(&sneakers(), Size::new(45)).unwrap_err();
        assert!(matches!(
            err,
            CommerceError::InvalidVariant { product_id, size }
                if product_id == ProductId::new(1) && size == Size::new(45)
        ));
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = CartStore::new();
        cart.add_item(&scarf(), Size::NONE).unwrap();
        let before = cart.snapshot();

        assert!(!cart.remove_item(ProductId::new(99), Size::NONE));
        assert!(!cart.remove_item(ProductId::new(2), Size::new(40)));
        assert_eq!(cart.snapshot(), before);
    }

    #[test]
    fn test_remove_ignores_quantity() {
        let mut cart = CartStore::new();
        cart.add_item(&scarf(), Size::NONE).unwrap();
        cart.add_item(&scarf(), Size::NONE).unwrap();

        assert!(cart.remove_item(ProductId::new(2), Size::NONE));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_at_one_removes_then_noop() {
        let mut cart = CartStore::new();
        cart.add_item(&scarf(), Size::NONE).unwrap();

        assert!(cart.decrement_quantity(ProductId::new(2), Size::NONE));
        assert!(cart.is_empty());
        assert!(!cart.decrement_quantity(ProductId::new(2), Size::NONE));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increment_then_total() {
        let mut cart = CartStore::new();
        let product = scarf();
        cart.add_item(&product, Size::NONE).unwrap();
        cart.increment_quantity(product.id, Size::NONE);

        assert_eq!(cart.total(), product.price.times(2));
    }

    #[test]
    fn test_increment_missing_is_noop() {
        let mut cart = CartStore::new();
        assert!(!cart.increment_quantity(ProductId::new(1), Size::new(38)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_matches_lines_after_mixed_operations() {
        let mut cart = CartStore::new();
        cart.add_item(&sneakers(), Size::new(38)).unwrap();
        cart.add_item(&sneakers(), Size::new(38)).unwrap();
        cart.add_item(&scarf(), Size::NONE).unwrap();
        cart.increment_quantity(ProductId::new(2), Size::NONE);
        cart.decrement_quantity(ProductId::new(1), Size::new(38));
        cart.add_item(&sneakers(), Size::new(39)).unwrap();

        let expected: i64 = cart
            .lines()
            .iter()
            .map(|l| l.price_snapshot.amount_minor * i64::from(l.quantity))
            .sum();
        assert_eq!(cart.total().amount_minor, expected);
        // 100 + 2 * 250 + 100
        assert_eq!(cart.total(), Money::from_units(700, Currency::UAH));
    }

    #[test]
    fn test_price_snapshot_survives_catalog_change() {
        let mut cart = CartStore::new();
        let mut product = scarf();
        cart.add_item(&product, Size::NONE).unwrap();

        product.price = Money::from_units(999, Currency::UAH);
        cart.add_item(&product, Size::NONE).unwrap();

        assert_eq!(cart.total(), Money::from_units(500, Currency::UAH));
    }

    #[test]
    fn test_quantity_is_capped() {
        let mut cart = CartStore::new();
        let mut line = CartLineItem::new(&scarf(), Size::NONE);
        line.quantity = MAX_QUANTITY_PER_ITEM;
        cart.restore(vec![line]);

        assert!(!cart.increment_quantity(ProductId::new(2), Size::NONE));
        assert_eq!(cart.add_item(&scarf(), Size::NONE).unwrap(), MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_restore_merges_duplicates_and_drops_empty_lines() {
        let mut cart = CartStore::new();
        let mut empty = CartLineItem::new(&sneakers(), Size::new(38));
        empty.quantity = 0;
        cart.restore(vec![
            CartLineItem::new(&scarf(), Size::NONE),
            empty,
            CartLineItem::new(&scarf(), Size::NONE),
        ]);

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_clear() {
        let mut cart = CartStore::new();
        cart.add_item(&scarf(), Size::NONE).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_subscribers_see_recomputed_totals() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut cart = CartStore::new();
        cart.subscribe(move |summary| sink.lock().unwrap().push(summary.total.amount_minor));

        cart.add_item(&scarf(), Size::NONE).unwrap();
        cart.increment_quantity(ProductId::new(2), Size::NONE);
        cart.remove_item(ProductId::new(99), Size::NONE);
        cart.clear();

        assert_eq!(*seen.lock().unwrap(), vec![25000, 50000, 0]);
    }
}
