//! Show a product.

use anyhow::Result;
use serde_json::json;
use storefront_commerce::ProductId;

use super::ViewArgs;
use crate::context::Context;
use crate::output::{format_size, stock_badge};

/// Run the view command.
pub async fn run(args: ViewArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let id = ProductId::new(args.id);
    let product = session.view_product(id)?;

    let in_cart: Vec<_> = session
        .cart()
        .lines()
        .iter()
        .filter(|line| line.product_id == id)
        .collect();
    let liked = session.is_liked(id);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product,
            "liked": liked,
            "inCart": in_cart,
        }));
        return Ok(());
    }

    ctx.output.header(&product.name);
    if let Some(feature) = &product.feature {
        ctx.output.kv("Badge", feature);
    }
    ctx.output.kv("Price", &product.price.display());
    ctx.output.kv("Stock", &stock_badge(product.quantity_available));
    ctx.output.kv("Category", &product.category.to_string());
    if product.has_sizes() {
        let sizes: Vec<String> = product.sizes.iter().map(ToString::to_string).collect();
        ctx.output.kv("Sizes", &sizes.join(", "));
        if !product.size_hint.is_empty() {
            ctx.output.kv("Size hint", &product.size_hint);
        }
    }
    if let Some(description) = &product.description {
        ctx.output.info("");
        println!("{}", description);
    }

    ctx.output.info("");
    ctx.output.kv("Liked", if liked { "yes" } else { "no" });
    for line in in_cart {
        ctx.output.kv(
            "In cart",
            &format!("{} x {}", format_size(line.selected_size), line.quantity),
        );
    }

    Ok(())
}
