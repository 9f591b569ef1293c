//! Show or change the cart.

use anyhow::Result;
use serde_json::json;
use storefront_commerce::session::ShopSession;
use storefront_commerce::{ProductId, Size};

use super::{CartArgs, CartCommand, LineArgs};
use crate::context::Context;
use crate::output::format_size;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    session.on_cart_change(|summary| {
        tracing::debug!(total = %summary.total, items = summary.item_count, "cart changed");
    });

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add(line) => {
            let (id, size) = key(&line);
            let quantity = session.add_to_cart(id, size)?;
            ctx.output
                .success(&format!("Added product {} ({}), now {} in cart", id, format_size(size), quantity));
        }
        CartCommand::Remove(line) => {
            let (id, size) = key(&line);
            report(ctx, session.remove_from_cart(id, size), "Removed", id, size);
        }
        CartCommand::Inc(line) => {
            let (id, size) = key(&line);
            report(ctx, session.increment(id, size), "Incremented", id, size);
        }
        CartCommand::Dec(line) => {
            let (id, size) = key(&line);
            report(ctx, session.decrement(id, size), "Decremented", id, size);
        }
        CartCommand::Clear => {
            session.clear_cart();
            ctx.output.success("Cart cleared");
        }
    }

    show(&session, ctx);
    Ok(())
}

fn key(line: &LineArgs) -> (ProductId, Size) {
    (ProductId::new(line.id), Size::new(line.size))
}

fn report(ctx: &Context, changed: bool, verb: &str, id: ProductId, size: Size) {
    if changed {
        ctx.output
            .success(&format!("{} product {} ({})", verb, id, format_size(size)));
    } else {
        ctx.output
            .warn(&format!("Product {} ({}) is not in the cart", id, format_size(size)));
    }
}

/// Print the cart contents and total.
pub fn show(session: &ShopSession, ctx: &Context) {
    let cart = session.cart();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "lines": cart.lines(),
            "total": cart.total(),
            "itemCount": cart.item_count(),
        }));
        return;
    }

    ctx.output.header("Кошик");
    if cart.is_empty() {
        ctx.output.info("The cart is empty");
        return;
    }

    const WIDTHS: [usize; 5] = [6, 28, 10, 6, 14];
    ctx.output
        .table_row(&["ID", "NAME", "SIZE", "QTY", "SUBTOTAL"], &WIDTHS);
    for line in cart.lines() {
        let id = line.product_id.to_string();
        let size = format_size(line.selected_size);
        let quantity = line.quantity.to_string();
        let subtotal = line.line_total().display();
        ctx.output
            .table_row(&[&id, &line.product_name, &size, &quantity, &subtotal], &WIDTHS);
    }
    ctx.output.info("");
    ctx.output.kv("Items", &cart.item_count().to_string());
    ctx.output.kv("Total", &cart.total().display());
}
