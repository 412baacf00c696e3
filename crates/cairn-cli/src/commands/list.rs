// Rust guideline compliant 2026-08-04

//! Implementation of the `cairn list` command.

use crate::context::Context;
use anyhow::Result;
use cairn_core::{is_dirty, Issue};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

/// Lists issues, filtered to open statuses by default.
///
/// Corrupt records are skipped with a warning so one bad file cannot
/// abort the listing. Entities with uncommitted changes are marked
/// dirty.
///
/// # Errors
///
/// Returns an error only when output serialization fails.
pub fn execute(status: Option<String>, all: bool, json: bool) -> Result<()> {
    let ctx = Context::load()?;

    let mut issues: Vec<(PathBuf, Issue)> = Vec::new();
    for dir in ctx.store.all_issue_dirs() {
        match ctx.store.load_issue(&dir) {
            Ok(issue) => issues.push((dir, issue)),
            Err(e) => eprintln!("Warning: Skipping unreadable issue at {}: {}", dir.display(), e),
        }
    }

    let status_filter = status.map(|raw| ctx.workflow.normalize_status(&raw));
    issues.retain(|(_, issue)| {
        let normalized = ctx.workflow.normalize_status(&issue.status);
        match &status_filter {
            Some(wanted) => normalized == *wanted,
            None => all || !ctx.workflow.is_closed(&normalized),
        }
    });
    issues.sort_by(|a, b| b.1.created.cmp(&a.1.created));

    let dirty = ctx.vcs.dirty_paths(ctx.store.root());

    if json {
        let payload: Vec<_> = issues
            .iter()
            .map(|(dir, issue)| {
                serde_json::json!({
                    "id": issue.id,
                    "title": issue.title,
                    "status": ctx.workflow.normalize_status(&issue.status),
                    "severity": issue.severity.to_string(),
                    "assignee": issue.assignee,
                    "created": issue.created,
                    "labels": issue.labels,
                    "dirty": is_dirty(dir, &dirty),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "issues": payload,
                "total": issues.len(),
            }))?
        );
        return Ok(());
    }

    if issues.is_empty() {
        println!("No issues found.");
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "STATUS", "SEVERITY", "TITLE", "ASSIGNEE", ""]);
    for (dir, issue) in &issues {
        let marker = if is_dirty(dir, &dirty) { "*" } else { "" };
        let status = ctx.workflow.normalize_status(&issue.status);
        let severity = issue.severity.to_string();
        builder.push_record([
            issue.id.as_str(),
            status.as_str(),
            severity.as_str(),
            issue.title.as_str(),
            issue.assignee.as_str(),
            marker,
        ]);
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    println!("{}", table);
    println!("{} issue(s); * = uncommitted changes", issues.len());

    Ok(())
}
