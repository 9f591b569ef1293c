//! Product search.
//!
//! The search box matches product names; filters and sorting serve the
//! category listings.

mod filter;
mod query;

pub use filter::Filter;
pub use query::{SearchQuery, SortOption};

use crate::catalog::Product;

/// Number of suggestions shown under the search box.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Products whose name matches `query`, in catalog order.
///
/// Deterministic and side-effect free. A blank query yields no products.
pub fn filter_products_by_query<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| filter::name_matches(&p.name, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    #[test]
    fn test_filter_products_by_query() {
        let products = vec![
            Product::new(1, "Сукня", Money::from_units(1500, Currency::UAH), 1),
            Product::new(2, "Сукня літня", Money::from_units(1100, Currency::UAH), 1),
            Product::new(3, "Спідниця", Money::from_units(800, Currency::UAH), 1),
        ];

        let found: Vec<i64> = filter_products_by_query(&products, "сукня")
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(found, vec![1, 2]);
        assert!(filter_products_by_query(&products, "").is_empty());
    }
}
