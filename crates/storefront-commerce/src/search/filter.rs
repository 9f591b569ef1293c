//! Search filter types.

use crate::catalog::Product;
use crate::ids::{CategoryId, Size};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A predicate over catalog products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Every whitespace-separated term appears in the name, ignoring case.
    Text(String),
    Category(CategoryId),
    /// Inclusive price bounds.
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    /// Only products with stock.
    InStock,
    /// Only products offered in this size.
    Size(Size),
}

impl Filter {
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    pub fn category(id: impl Into<CategoryId>) -> Self {
        Filter::Category(id.into())
    }

    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    pub fn in_stock() -> Self {
        Filter::InStock
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Text(query) => name_matches(&product.name, query),
            Filter::Category(id) => product.category == *id,
            Filter::PriceRange { min, max } => {
                let price = product.price.amount_minor;
                min.map_or(true, |m| price >= m.amount_minor)
                    && max.map_or(true, |m| price <= m.amount_minor)
            }
            Filter::InStock => product.is_available(),
            Filter::Size(size) => product.sizes.contains(size),
        }
    }
}

/// Case-insensitive match of every query term against the name.
///
/// A blank query matches nothing.
pub(crate) fn name_matches(name: &str, query: &str) -> bool {
    let name = name.to_lowercase();
    let mut terms = query.split_whitespace().peekable();
    if terms.peek().is_none() {
        return false;
    }
    terms.all(|term| name.contains(&term.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn product() -> Product {
        Product::new(1, "Зимова Куртка", Money::from_units(3000, Currency::UAH), 4)
            .with_sizes([46, 48])
    }

    #[test]
    fn test_text_is_case_insensitive() {
        assert!(Filter::text("куртка").matches(&product()));
        assert!(Filter::text("ЗИМОВА кур").matches(&product()));
        assert!(!Filter::text("шапка").matches(&product()));
    }

    #[test]
    fn test_blank_text_matches_nothing() {
        assert!(!Filter::text("   ").matches(&product()));
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let exact = Money::from_units(3000, Currency::UAH);
        assert!(Filter::price_range(Some(exact), Some(exact)).matches(&product()));
        assert!(!Filter::price_range(None, Some(Money::from_units(2999, Currency::UAH)))
            .matches(&product()));
    }

    #[test]
    fn test_size_and_stock() {
        assert!(Filter::Size(Size::new(48)).matches(&product()));
        assert!(!Filter::Size(Size::new(50)).matches(&product()));
        assert!(!Filter::in_stock().matches(&product().with_quantity(0)));
    }
}
