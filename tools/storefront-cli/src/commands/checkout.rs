//! Place an order for the cart.

use anyhow::{bail, Context as _, Result};
use chrono::{DateTime, Local};
use dialoguer::Confirm;
use serde_json::json;
use storefront_commerce::purchase::{LocalOrderSubmitter, OrderDetails, PurchaseFlow};

use super::CheckoutArgs;
use crate::context::Context;

const TOTAL_STEPS: usize = 3;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    let submitter = LocalOrderSubmitter::new(ctx.open_cache()?);
    let mut flow = session.open_purchase();

    print_step(&flow, ctx);
    super::cart::show(&session, ctx);

    session.advance_purchase(&mut flow, &submitter).await?;
    print_step(&flow, ctx);

    let details = order_details(&args);
    let missing = details.missing_fields();
    if !missing.is_empty() {
        bail!("Order details incomplete: missing {}", missing.join(", "));
    }
    ctx.output.kv("Recipient", &details.customer_name);
    ctx.output.kv("Phone", &details.phone);
    ctx.output
        .kv("Delivery", &format!("{}, {}", details.city, details.delivery_office));
    if let Some(email) = &details.email {
        ctx.output.kv("Email", email);
    }
    if let Some(comment) = &details.comment {
        ctx.output.kv("Comment", comment);
    }
    ctx.output.kv("Total", &session.cart().total().display());
    flow.set_order_details(details);

    if !args.yes && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt("Place the order?")
            .default(true)
            .interact()?;

        if !confirmed {
            flow.dismiss();
            ctx.output.warn("Checkout cancelled, the cart is unchanged");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Submitting order...");
    let submitted = session.advance_purchase(&mut flow, &submitter).await;
    spinner.finish_and_clear();
    submitted.context("Order was not placed, the cart is unchanged")?;

    let order_id = flow
        .order_id()
        .cloned()
        .context("Confirmed order has no id")?;
    let receipt = submitter.receipt(&order_id);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "step": flow.step(),
            "label": flow.current_step_label(),
            "orderId": order_id,
            "notice": flow.confirmation_notice(),
            "receipt": receipt,
        }));
        return Ok(());
    }

    print_step(&flow, ctx);
    if let Some(receipt) = receipt {
        ctx.output.kv("Total", &receipt.total.display());
        if let Some(placed_at) = DateTime::from_timestamp(receipt.placed_at, 0) {
            ctx.output.kv(
                "Placed",
                &placed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
            );
        }
    }
    if let Some(notice) = flow.confirmation_notice() {
        ctx.output.success(notice);
    }

    Ok(())
}

fn order_details(args: &CheckoutArgs) -> OrderDetails {
    let mut details = OrderDetails::new(&args.name, &args.phone, &args.city, &args.office);
    if let Some(email) = &args.email {
        details = details.with_email(email);
    }
    if let Some(comment) = &args.comment {
        details = details.with_comment(comment);
    }
    details
}

fn print_step(flow: &PurchaseFlow, ctx: &Context) {
    ctx.output.step(
        usize::from(flow.step_number()),
        TOTAL_STEPS,
        &flow.current_step_label(),
    );
}
