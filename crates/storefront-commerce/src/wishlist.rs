//! Wish list store.

use crate::catalog::Product;
use crate::ids::ProductId;
use indexmap::IndexSet;

/// The set of liked products, kept in the order they were liked.
///
/// Holds identifiers only; names and prices are resolved through the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishListStore {
    items: IndexSet<ProductId>,
}

impl WishListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Like a product. Idempotent; returns whether it was newly added.
    pub fn add_item(&mut self, product: &Product) -> bool {
        self.items.insert(product.id)
    }

    /// Returns whether the product was present.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        self.items.shift_remove(&product_id)
    }

    /// Flip the liked state. Returns `true` if the product is now liked.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.items.shift_remove(&product.id) {
            false
        } else {
            self.items.insert(product.id);
            true
        }
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.contains(&product_id)
    }

    /// All liked products, oldest first.
    pub fn get_all(&self) -> Vec<ProductId> {
        self.items.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.items.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace the contents; duplicates collapse.
    pub fn restore(&mut self, ids: impl IntoIterator<Item = ProductId>) {
        self.items = ids.into_iter().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn product(id: i64) -> Product {
        Product::new(id, format!("Товар {id}"), Money::from_units(10, Currency::UAH), 1)
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut wishlist = WishListStore::new();
        assert!(wishlist.add_item(&product(1)));
        assert!(!wishlist.add_item(&product(1)));
        assert_eq!(wishlist.get_all(), vec![ProductId::new(1)]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut wishlist = WishListStore::new();
        wishlist.add_item(&product(1));
        assert!(!wishlist.remove_item(ProductId::new(2)));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_insertion_order_survives_removal() {
        let mut wishlist = WishListStore::new();
        for id in [3, 1, 2] {
            wishlist.add_item(&product(id));
        }
        wishlist.remove_item(ProductId::new(1));
        assert_eq!(wishlist.get_all(), vec![ProductId::new(3), ProductId::new(2)]);
    }

    #[test]
    fn test_toggle() {
        let mut wishlist = WishListStore::new();
        assert!(wishlist.toggle(&product(5)));
        assert!(wishlist.contains(ProductId::new(5)));
        assert!(!wishlist.toggle(&product(5)));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_restore_collapses_duplicates() {
        let mut wishlist = WishListStore::new();
        wishlist.restore([ProductId::new(1), ProductId::new(1), ProductId::new(4)]);
        assert_eq!(wishlist.len(), 2);
    }
}
