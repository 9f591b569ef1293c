//! Show or change the wish list.

use anyhow::Result;
use storefront_commerce::ProductId;

use super::{WishlistArgs, WishlistCommand};
use crate::context::Context;

/// Run the wishlist command.
pub async fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;

    match args.command.unwrap_or(WishlistCommand::Show) {
        WishlistCommand::Show => {}
        WishlistCommand::Add { id } => {
            let id = ProductId::new(id);
            if session.like(id)? {
                ctx.output.success(&format!("Liked product {}", id));
            } else {
                ctx.output.info(&format!("Product {} is already liked", id));
            }
        }
        WishlistCommand::Remove { id } => {
            let id = ProductId::new(id);
            if session.unlike(id) {
                ctx.output.success(&format!("Unliked product {}", id));
            } else {
                ctx.output.warn(&format!("Product {} is not in the wish list", id));
            }
        }
        WishlistCommand::Toggle { id } => {
            let id = ProductId::new(id);
            let verb = if session.toggle_like(id)? { "Liked" } else { "Unliked" };
            ctx.output.success(&format!("{} product {}", verb, id));
        }
    }

    let products = session.wishlist_products();
    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Обране");
    if products.is_empty() {
        ctx.output.info("Nothing liked yet");
        return Ok(());
    }
    ctx.output.product_table(&products);

    Ok(())
}
