//! Orders assigned to the logged-in repartidor.

use anyhow::{bail, Context as _, Result};
use reparto_app::{DeliveriesView, Snapshot};
use reparto_commerce::checkout::{AssignedOrder, OrderStatus};
use reparto_commerce::ids::OrderId;
use reparto_commerce::money::Money;

use super::pending::{latest, report, stale_note};
use super::{DeliveriesArgs, DeliveriesCommand};
use crate::context::Context;
use crate::output::{status_badge, truncate};

/// Run the deliveries command.
pub async fn run(args: DeliveriesArgs, ctx: &Context) -> Result<()> {
    let session = ctx.session()?;
    let mut view = session.deliveries();
    let mut orders = view.handle().subscribe();

    let spinner = ctx.output.spinner("Loading assigned orders...");
    let first = orders.wait_for(|s| s.is_loaded()).await.map(|s| (*s).clone());
    spinner.finish_and_clear();
    let Ok(first) = first else {
        bail!("Polling stopped before the first response");
    };

    match args.command {
        Some(DeliveriesCommand::Advance { id }) => {
            let order = OrderId::new(id);
            let status = view
                .advance(order)
                .await
                .with_context(|| format!("Cannot advance order {}", order))?;
            announce(ctx, order, status);
            return Ok(());
        }
        Some(DeliveriesCommand::Status { id, status }) => {
            let order = OrderId::new(id);
            let to: OrderStatus = status.parse()?;
            view.set_status(order, to)
                .await
                .with_context(|| format!("Cannot update order {}", order))?;
            announce(ctx, order, to);
            return Ok(());
        }
        None => {}
    }

    render(ctx, &view, &first, args.all)?;

    if !args.watch {
        return Ok(());
    }

    ctx.output.info(&format!(
        "Watching every {}s, Ctrl-C to stop",
        ctx.config.poll.interval().as_secs()
    ));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = orders.changed() => {
                if changed.is_err() {
                    break;
                }
                let snap = latest(&mut orders);
                report(ctx, render(ctx, &view, &snap, args.all));
            }
        }
    }
    Ok(())
}

fn announce(ctx: &Context, order: OrderId, status: OrderStatus) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "id": order, "estado": status }));
    } else {
        ctx.output.success(&format!("Order {} is now {}", order, status_badge(status)));
    }
}

fn render(
    ctx: &Context,
    view: &DeliveriesView,
    snap: &Snapshot<AssignedOrder>,
    all: bool,
) -> Result<()> {
    let orders: Vec<AssignedOrder> = if all { snap.items.clone() } else { view.active() };

    if ctx.output.is_json() {
        ctx.output.json(&orders);
    } else {
        ctx.output.header(&format!("Assigned orders ({})", orders.len()));
        stale_note(&ctx.output, snap);
        let currency = ctx.config.currency()?;
        let widths = [6, 20, 30, 12, 12];
        ctx.output.table_row(&["ID", "NEGOCIO", "ADDRESS", "TOTAL", "STATUS"], &widths);
        for order in &orders {
            let id = order.id.to_string();
            let negocio = truncate(&order.negocio, widths[1]);
            let address = truncate(&order.direccion_entrega, widths[2]);
            let total = Money::from_decimal(order.total, currency).display();
            let status = status_badge(order.status);
            ctx.output.table_row(&[&id, &negocio, &address, &total, &status], &widths);
        }
    }

    match &snap.last_error {
        Some(error) => bail!("Failed to load assigned orders: {}", error),
        None => Ok(()),
    }
}
