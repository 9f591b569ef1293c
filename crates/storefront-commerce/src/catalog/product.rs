//! Product type.

use crate::ids::{CategoryId, ProductId, Size};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A product offered by the catalog. Read-only input to the stores.
///
/// On the wire the price is a decimal number with an optional `currency`
/// code next to it, e.g. `"price": 1890, "currency": "UAH"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "ProductRecord", into = "ProductRecord")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price at the time the catalog was read.
    pub price: Money,
    /// Units in stock.
    pub quantity_available: i64,
    pub category: CategoryId,
    /// Offered sizes in display order. Empty for sizeless products.
    pub sizes: Vec<Size>,
    /// Sizing guidance shown next to the size picker.
    pub size_hint: String,
    pub description: Option<String>,
    /// Badge text such as "Sale".
    pub feature: Option<String>,
}

/// Catalog file representation of a [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    id: ProductId,
    name: String,
    price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency: Option<Currency>,
    #[serde(default)]
    quantity_available: i64,
    category: CategoryId,
    #[serde(default)]
    sizes: Vec<Size>,
    #[serde(default)]
    size_hint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feature: Option<String>,
}

impl ProductRecord {
    /// Build the product, pricing it in `fallback` when the record names no currency.
    pub(crate) fn into_product(self, fallback: Currency) -> Product {
        Product {
            id: self.id,
            name: self.name,
            price: Money::from_decimal(self.price, self.currency.unwrap_or(fallback)),
            quantity_available: self.quantity_available,
            category: self.category,
            sizes: self.sizes,
            size_hint: self.size_hint,
            description: self.description,
            feature: self.feature,
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        record.into_product(Currency::default())
    }
}

impl From<Product> for ProductRecord {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price.to_decimal(),
            currency: Some(product.price.currency),
            quantity_available: product.quantity_available,
            category: product.category,
            sizes: product.sizes,
            size_hint: product.size_hint,
            description: product.description,
            feature: product.feature,
        }
    }
}

impl Product {
    /// Create a sizeless product with one unit in stock.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        category: impl Into<CategoryId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity_available: 1,
            category: category.into(),
            sizes: Vec::new(),
            size_hint: String::new(),
            description: None,
            feature: None,
        }
    }

    pub fn with_sizes(mut self, sizes: impl IntoIterator<Item = u32>) -> Self {
        self.sizes = sizes.into_iter().map(Size::new).collect();
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity_available = quantity;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_available(&self) -> bool {
        self.quantity_available > 0
    }

    pub fn has_sizes(&self) -> bool {
        !self.sizes.is_empty()
    }

    /// Whether `size` may be put in the cart: sizeless, or one of the offered sizes.
    pub fn offers_size(&self, size: Size) -> bool {
        size.is_none() || self.sizes.contains(&size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoe() -> Product {
        Product::new(1, "Кеди", Money::from_units(1200, Currency::UAH), 2).with_sizes([38, 39, 40])
    }

    #[test]
    fn test_offers_size() {
        let product = shoe();
        assert!(product.offers_size(Size::NONE));
        assert!(product.offers_size(Size::new(39)));
        assert!(!product.offers_size(Size::new(44)));
    }

    #[test]
    fn test_availability() {
        assert!(shoe().is_available());
        assert!(!shoe().with_quantity(0).is_available());
    }

    #[test]
    fn test_deserialize_catalog_entry() {
        let json = r#"{
            "id": 3,
            "name": "Футболка",
            "price": 450,
            "quantityAvailable": 4,
            "category": 1,
            "sizes": [44, 46],
            "sizeHint": "Маломірить",
            "feature": "Sale"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price, Money::from_units(450, Currency::UAH));
        assert_eq!(product.sizes, vec![Size::new(44), Size::new(46)]);
        assert_eq!(product.feature.as_deref(), Some("Sale"));
        assert!(product.description.is_none());
    }

    #[test]
    fn test_fractional_price_and_currency() {
        let json = r#"{"id": 7, "name": "Cap", "price": 19.99, "currency": "USD", "category": 2}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Money::new(1999, Currency::USD));
        assert_eq!(product.quantity_available, 0);

        let written = serde_json::to_value(&product).unwrap();
        assert_eq!(written["price"], 19.99);
        assert_eq!(written["currency"], "USD");
        assert_eq!(written["quantityAvailable"], 0);
    }
}
