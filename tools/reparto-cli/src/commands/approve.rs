//! Approve or reject a pending registration.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use reparto_commerce::approval::{ApprovalDecision, ApprovalKind};

use super::ApprovalArgs;
use crate::context::Context;

/// Run the approve or reject command.
pub async fn run(args: ApprovalArgs, decision: ApprovalDecision, ctx: &Context) -> Result<()> {
    let kind: ApprovalKind = args.kind.into();
    let verb = match decision {
        ApprovalDecision::Approve => "Approve",
        ApprovalDecision::Reject => "Reject",
    };

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("{} {} {}?", verb, kind, args.id))
            .default(decision == ApprovalDecision::Approve)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    let session = ctx.session()?;
    let view = session.approvals();

    let spinner = ctx.output.spinner("Sending decision...");
    let result = view.decide(kind, args.id, decision).await;
    spinner.finish_and_clear();
    result.with_context(|| format!("Failed to {} {} {}", verb.to_lowercase(), kind, args.id))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "kind": kind,
            "id": args.id,
            "decision": decision,
        }));
    } else {
        let done = match decision {
            ApprovalDecision::Approve => "approved",
            ApprovalDecision::Reject => "rejected",
        };
        ctx.output.success(&format!("{} {} {}", kind, args.id, done));
    }
    Ok(())
}
