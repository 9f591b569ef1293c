//! Search the catalog.

use anyhow::{anyhow, Result};
use storefront_commerce::catalog::Product;
use storefront_commerce::search::{Filter, SearchQuery, SortOption};

use super::SearchArgs;
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let limit = args.limit.unwrap_or(ctx.config.search.suggestion_limit);

    let results: Vec<&Product> = if args.category.is_none() && !args.in_stock && args.sort.is_none() {
        // Plain search-box suggestions
        session.search(&args.query, limit)
    } else {
        let sort = match args.sort.as_deref() {
            Some(s) => SortOption::from_str(s).ok_or_else(|| anyhow!("Unknown sort order: {}", s))?,
            None => SortOption::default(),
        };

        let mut query = SearchQuery::new()
            .with_query(args.query.as_str())
            .with_sort(sort)
            .with_limit(limit);
        if let Some(category) = args.category {
            query = query.with_filter(Filter::category(category));
        }
        if args.in_stock {
            query = query.with_filter(Filter::in_stock());
        }
        ctx.output.debug(&format!("Sort: {}", sort.display_name()));
        query.run(session.catalog().list())
    };

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    if results.is_empty() {
        ctx.output.info(&format!("Nothing found for \"{}\"", args.query));
        return Ok(());
    }

    ctx.output.header(&format!("Results for \"{}\"", args.query));
    ctx.output.product_table(&results);

    Ok(())
}
