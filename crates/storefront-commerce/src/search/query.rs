//! Search query builder.

use crate::catalog::Product;
use crate::search::Filter;
use serde::{Deserialize, Serialize};

/// Sort options for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Names starting with the query first, then catalog order.
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl SortOption {
    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Relevance => "Relevance",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
            SortOption::NameDesc => "Name: Z-A",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "relevance" => Some(SortOption::Relevance),
            "price-asc" => Some(SortOption::PriceAsc),
            "price-desc" => Some(SortOption::PriceDesc),
            "name-asc" => Some(SortOption::NameAsc),
            "name-desc" => Some(SortOption::NameDesc),
            _ => None,
        }
    }
}

/// A search over the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchQuery {
    /// Text typed into the search box.
    pub query: Option<String>,
    pub filters: Vec<Filter>,
    pub sort: SortOption,
    /// Maximum number of results; `None` for all.
    pub limit: Option<usize>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query. Blank text is ignored.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        if !q.trim().is_empty() {
            self.filters.push(Filter::Text(q.clone()));
            self.query = Some(q);
        }
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Products matching every filter, sorted and truncated.
    pub fn run<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut results: Vec<&Product> = products
            .iter()
            .filter(|p| self.filters.iter().all(|f| f.matches(p)))
            .collect();

        match self.sort {
            SortOption::Relevance => {
                if let Some(q) = &self.query {
                    let q = q.trim().to_lowercase();
                    // stable: ties keep catalog order
                    results.sort_by_key(|p| !p.name.to_lowercase().starts_with(&q));
                }
            }
            SortOption::PriceAsc => results.sort_by_key(|p| p.price.amount_minor),
            SortOption::PriceDesc => {
                results.sort_by_key(|p| std::cmp::Reverse(p.price.amount_minor))
            }
            SortOption::NameAsc => results.sort_by_key(|p| p.name.to_lowercase()),
            SortOption::NameDesc => {
                results.sort_by_key(|p| std::cmp::Reverse(p.name.to_lowercase()))
            }
        }

        if let Some(limit) = self.limit {
            results.truncate(limit);
        }
        results
    }
}
