// Rust guideline compliant 2026-08-04

//! Implementation of the `cairn history` command.
//!
//! Revision log and diffs for an issue's metadata file, courtesy of the
//! VCS layer. Outside a repository both degrade to empty output.

use crate::context::Context;
use anyhow::Result;
use cairn_core::ISSUE_FILE;

/// Shows the revision history of an issue's metadata file, or the diff
/// against one revision when `--diff` is given.
///
/// # Errors
///
/// Returns an error when the issue cannot be resolved.
pub fn execute(id: String, diff: Option<String>, json: bool) -> Result<()> {
    let ctx = Context::load()?;
    let (dir, issue) = ctx.find_issue(&id)?;
    let file = dir.join(ISSUE_FILE);

    if let Some(revision) = diff {
        let text = ctx.vcs.diff(&file, &revision, None);
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "id": issue.id,
                    "revision": revision,
                    "diff": text,
                }))?
            );
        } else if text.is_empty() {
            println!("No differences against {}.", revision);
        } else {
            print!("{}", text);
        }
        return Ok(());
    }

    let revisions = ctx.vcs.history(&file);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "id": issue.id,
                "revisions": revisions,
                "total": revisions.len(),
            }))?
        );
        return Ok(());
    }

    if revisions.is_empty() {
        println!("No recorded history for {}.", issue.id);
        return Ok(());
    }

    println!("History for {} ({})", issue.id, issue.title);
    for revision in &revisions {
        let short = revision.id.get(..10).unwrap_or(&revision.id);
        println!(
            "  {} {} {} {}",
            short,
            revision.date.format("%Y-%m-%d"),
            revision.author,
            revision.message
        );
    }

    Ok(())
}
