// Rust guideline compliant 2026-08-04

//! Implementation of the `cairn create` command.

use crate::context::{default_author, Context};
use anyhow::Result;
use cairn_core::{IdAllocator, Issue};

/// Creates a new issue and stages its directory with the VCS client.
///
/// The id is allocated by scanning the issues root, the initial status
/// comes from the active workflow, and the severity falls back to the
/// configured default.
///
/// # Errors
///
/// Returns an error on invalid severity, validation failure, or a
/// storage collision.
pub fn execute(
    title: String,
    body: Option<String>,
    severity: Option<String>,
    assignee: Option<String>,
    labels: Vec<String>,
    author: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = Context::load()?;

    let allocator = IdAllocator::new(ctx.store.root());
    let id = allocator.generate();

    let mut issue = Issue::new(
        id,
        title,
        author.unwrap_or_else(default_author),
        ctx.workflow.initial().to_string(),
    );
    issue.severity = match severity {
        Some(raw) => raw.parse()?,
        None => ctx.config.default_severity,
    };
    issue.assignee = assignee.unwrap_or_default();
    issue.labels = labels;
    issue.body = body.unwrap_or_default();

    let dir = ctx.store.save_issue(&issue, Some(&ctx.vcs))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "status": "ok",
                "action": "create",
                "id": issue.id,
                "path": dir.display().to_string(),
            }))?
        );
    } else {
        println!("✓ Created issue {} at {}", issue.id, dir.display());
    }

    Ok(())
}
