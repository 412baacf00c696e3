// Rust guideline compliant 2026-08-04

//! Implementation of the `cairn status` command.

use crate::context::Context;
use anyhow::Result;

/// Moves an issue to a new workflow state.
///
/// Both the current and target status are normalized first; the target
/// must be in the workflow's allowed set for the current state (which
/// always includes staying put).
///
/// # Errors
///
/// Returns an error when the issue cannot be resolved, the transition
/// is not allowed, or the rewrite fails.
pub fn execute(id: String, state: String, json: bool) -> Result<()> {
    let ctx = Context::load()?;
    let (dir, mut issue) = ctx.find_issue(&id)?;

    let current = ctx.workflow.normalize_status(&issue.status);
    let target = ctx.workflow.normalize_status(&state);

    let allowed = ctx.workflow.allowed_next(&current);
    if !allowed.contains(&target) {
        anyhow::bail!(
            "Cannot move {} from '{}' to '{}'. Allowed: {}",
            issue.id,
            current,
            target,
            allowed.join(", ")
        );
    }

    issue.status = target.clone();
    ctx.store.update_issue(&dir, &issue)?;
    ctx.vcs.stage(&dir);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "status": "ok",
                "action": "status",
                "id": issue.id,
                "from": current,
                "to": target,
                "label": ctx.workflow.transition_label(&current, &target),
            }))?
        );
    } else {
        match ctx.workflow.transition_label(&current, &target) {
            Some(label) => println!("✓ {} {} → {} ({})", issue.id, current, target, label),
            None => println!("✓ {} {} → {}", issue.id, current, target),
        }
    }

    Ok(())
}
