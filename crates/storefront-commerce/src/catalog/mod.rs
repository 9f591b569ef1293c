//! Product catalog.
//!
//! The catalog is a read-only supplier: the stores only ever read products
//! from it.

mod product;

pub use product::Product;

use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId};
use crate::money::Currency;
use product::ProductRecord;

/// Supplier of the products available in the shop.
pub trait ProductCatalog: Send + Sync {
    /// All products, in catalog order.
    fn list(&self) -> &[Product];

    fn find(&self, id: ProductId) -> Option<&Product> {
        self.list().iter().find(|p| p.id == id)
    }
}

/// A catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a JSON array of products priced in the default currency.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        Self::from_json_in(json, Currency::default())
    }

    /// Parse a JSON array of products. Records without a `currency` are
    /// priced in `currency`.
    pub fn from_json_in(json: &str, currency: Currency) -> Result<Self, CommerceError> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        Ok(Self::new(
            records
                .into_iter()
                .map(|record| record.into_product(currency))
                .collect(),
        ))
    }

    /// Products in one category, in catalog order.
    pub fn by_category(&self, category: CategoryId) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn list(&self) -> &[Product] {
        &self.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            Product::new(1, "Кеди", Money::from_units(1200, Currency::UAH), 2),
            Product::new(2, "Футболка", Money::from_units(450, Currency::UAH), 1),
            Product::new(3, "Черевики", Money::from_units(2100, Currency::UAH), 2),
        ])
    }

    #[test]
    fn test_find() {
        let catalog = catalog();
        assert_eq!(catalog.find(ProductId::new(2)).unwrap().name, "Футболка");
        assert!(catalog.find(ProductId::new(9)).is_none());
    }

    #[test]
    fn test_by_category_keeps_order() {
        let catalog = catalog();
        let ids: Vec<i64> = catalog
            .by_category(CategoryId::new(2))
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_from_json_decimal_prices() {
        let json = r#"[
            {"id": 1, "name": "Сукня", "price": 1500, "quantityAvailable": 2, "category": 1},
            {"id": 2, "name": "Пояс", "price": 249.5, "category": 1, "sizes": [1, 2]}
        ]"#;
        let catalog = InMemoryCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.find(ProductId::new(1)).unwrap().price,
            Money::from_units(1500, Currency::UAH)
        );
        assert_eq!(
            catalog.find(ProductId::new(2)).unwrap().price,
            Money::new(24950, Currency::UAH)
        );
    }

    #[test]
    fn test_from_json_in_prices_in_catalog_currency() {
        let json = r#"[
            {"id": 1, "name": "Cap", "price": 12, "category": 1},
            {"id": 2, "name": "Scarf", "price": 30, "currency": "EUR", "category": 1}
        ]"#;
        let catalog = InMemoryCatalog::from_json_in(json, Currency::USD).unwrap();
        assert_eq!(
            catalog.find(ProductId::new(1)).unwrap().price,
            Money::from_units(12, Currency::USD)
        );
        assert_eq!(
            catalog.find(ProductId::new(2)).unwrap().price.currency,
            Currency::EUR
        );
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            InMemoryCatalog::from_json("{not json"),
            Err(CommerceError::Serialization(_))
        ));
    }
}
