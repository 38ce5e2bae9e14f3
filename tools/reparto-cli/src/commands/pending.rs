//! Registrations awaiting admin approval.

use anyhow::{bail, Result};
use reparto_app::Snapshot;
use reparto_commerce::approval::{ApprovalKind, PendingNegocio, PendingRepartidor};
use tokio::sync::watch;

use super::PendingArgs;
use crate::context::Context;
use crate::output::{truncate, Output};

/// Run the pending command.
pub async fn run(args: PendingArgs, ctx: &Context) -> Result<()> {
    let session = ctx.session()?;
    let mut view = session.approvals();
    let kind: Option<ApprovalKind> = args.kind.map(Into::into);
    let show_negocios = kind != Some(ApprovalKind::Repartidor);
    let show_repartidores = kind != Some(ApprovalKind::Negocio);

    let mut negocios = view.negocios_handle().subscribe();
    let mut repartidores = view.repartidores_handle().subscribe();

    let spinner = ctx.output.spinner("Loading pending registrations...");
    let loaded = tokio::try_join!(
        negocios.wait_for(|s| s.is_loaded()),
        repartidores.wait_for(|s| s.is_loaded()),
    )
    .map(|(n, r)| ((*n).clone(), (*r).clone()));
    spinner.finish_and_clear();
    let Ok((first_negocios, first_repartidores)) = loaded else {
        bail!("Polling stopped before the first response");
    };

    render(
        ctx,
        show_negocios.then_some(&first_negocios),
        show_repartidores.then_some(&first_repartidores),
    )?;

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
            changed = negocios.changed(), if show_negocios => {
                if changed.is_err() {
                    break;
                }
                let snap = latest(&mut negocios);
                report(ctx, render(ctx, Some(&snap), None));
            }
            changed = repartidores.changed(), if show_repartidores => {
                if changed.is_err() {
                    break;
                }
                let snap = latest(&mut repartidores);
                report(ctx, render(ctx, None, Some(&snap)));
            }
        }
    }
    Ok(())
}

/// In watch mode a failed refresh is reported and watching continues.
pub(crate) fn report(ctx: &Context, result: Result<()>) {
    if let Err(e) = result {
        ctx.output.warn(&format!("{:#}", e));
    }
}

pub(crate) fn latest<T: Clone>(rx: &mut watch::Receiver<Snapshot<T>>) -> Snapshot<T> {
    rx.borrow_and_update().clone()
}

fn render(
    ctx: &Context,
    negocios: Option<&Snapshot<PendingNegocio>>,
    repartidores: Option<&Snapshot<PendingRepartidor>>,
) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "negocios": negocios.map(|s| &s.items),
            "repartidores": repartidores.map(|s| &s.items),
        }));
    } else {
        if let Some(snap) = negocios {
            print_negocios(&ctx.output, snap);
        }
        if let Some(snap) = repartidores {
            print_repartidores(&ctx.output, snap);
        }
    }

    let failed = [
        negocios.and_then(|s| s.last_error.as_deref()),
        repartidores.and_then(|s| s.last_error.as_deref()),
    ];
    match failed.iter().flatten().next() {
        Some(error) => bail!("Failed to load pending registrations: {}", error),
        None => Ok(()),
    }
}

fn print_negocios(output: &Output, snap: &Snapshot<PendingNegocio>) {
    output.header(&format!("Pending negocios ({})", snap.items.len()));
    stale_note(output, snap);
    let widths = [6, 24, 28, 16];
    output.table_row(&["ID", "NAME", "EMAIL", "CATEGORY"], &widths);
    for negocio in &snap.items {
        let id = negocio.id.to_string();
        let name = truncate(&negocio.name, widths[1]);
        let email = truncate(negocio.email.as_deref().unwrap_or("-"), widths[2]);
        let category = truncate(negocio.category.as_deref().unwrap_or("-"), widths[3]);
        output.table_row(&[&id, &name, &email, &category], &widths);
    }
}

fn print_repartidores(output: &Output, snap: &Snapshot<PendingRepartidor>) {
    output.header(&format!("Pending repartidores ({})", snap.items.len()));
    stale_note(output, snap);
    let widths = [6, 24, 28, 12];
    output.table_row(&["ID", "NAME", "EMAIL", "VEHICLE"], &widths);
    for repartidor in &snap.items {
        let id = repartidor.id.to_string();
        let name = truncate(&repartidor.name, widths[1]);
        let email = truncate(repartidor.email.as_deref().unwrap_or("-"), widths[2]);
        let vehicle = truncate(repartidor.vehicle.as_deref().unwrap_or("-"), widths[3]);
        output.table_row(&[&id, &name, &email, &vehicle], &widths);
    }
}

/// Mention when the list shown is older than the latest failed fetch.
pub(crate) fn stale_note<T>(output: &Output, snap: &Snapshot<T>) {
    if let (Some(error), Some(at)) = (&snap.last_error, snap.fetched_at) {
        output.warn(&format!(
            "Refresh failed ({}); showing data from {}",
            error,
            at.with_timezone(&chrono::Local).format("%H:%M:%S")
        ));
    }
}
