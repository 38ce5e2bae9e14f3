//! Fill a cart from a negocio's catalog and place the order.

use anyhow::{bail, Context as _, Result};
use dialoguer::{Confirm, Input};
use reparto_app::CartSnapshot;
use reparto_commerce::ids::{NegocioId, ProductId};

use super::OrderArgs;
use crate::context::Context;
use crate::output::{truncate, Output};

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    let negocio = NegocioId::new(args.negocio);
    let session = ctx.session()?;

    let mut catalog = session.catalog(negocio);
    let spinner = ctx.output.spinner("Loading catalog...");
    let loaded = catalog.load().await.map(|_| ());
    spinner.finish_and_clear();
    loaded.with_context(|| format!("Failed to load negocio {}", negocio))?;

    for id in &args.add {
        catalog
            .add_to_cart(ProductId::new(*id))
            .with_context(|| format!("Cannot add product {}", id))?;
    }

    let cart = session.cart_view();
    for id in &args.remove {
        if !cart.remove(ProductId::new(*id)) {
            ctx.output.warn(&format!("Product {} is not in the cart", id));
        }
    }

    let snapshot = cart.render();
    if snapshot.lines.is_empty() {
        bail!("The cart is empty");
    }

    let address = match args.address {
        Some(address) => address,
        None => Input::new().with_prompt("Delivery address").interact_text()?,
    };

    let checkout = session.checkout();
    let order = checkout.preview(&address, Some(negocio))?;

    if ctx.output.is_json() && args.dry_run {
        ctx.output.json(&order);
        return Ok(());
    }

    print_cart(&ctx.output, &snapshot);
    ctx.output.kv("Deliver to", &address);

    if args.dry_run {
        ctx.output.info("Dry run, order not placed");
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", snapshot.totals.total.display()))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Order cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let result = checkout.submit(&address, Some(negocio)).await;
    spinner.finish_and_clear();
    let receipt = result.context("Order was not placed")?;

    if ctx.output.is_json() {
        ctx.output.json(&receipt);
    } else {
        ctx.output.success(&format!(
            "Order {} placed ({})",
            receipt.id,
            receipt.status.display_name()
        ));
        if let Some(message) = &receipt.message {
            ctx.output.info(message);
        }
    }
    Ok(())
}

fn print_cart(output: &Output, snapshot: &CartSnapshot) {
    output.header("Cart");
    let widths = [6, 28, 5, 12, 12];
    output.table_row(&["ID", "NAME", "QTY", "UNIT", "SUBTOTAL"], &widths);
    for line in &snapshot.lines {
        let id = line.product_id.to_string();
        let name = truncate(&line.name, widths[1]);
        let qty = line.quantity.to_string();
        let unit = line.unit_price.display();
        let subtotal = line.subtotal().display();
        output.table_row(&[&id, &name, &qty, &unit, &subtotal], &widths);
    }
    output.kv("Items", &snapshot.item_count.to_string());
    output.kv("Total", &snapshot.totals.total.display());
}
