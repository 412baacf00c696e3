// Rust guideline compliant 2026-08-04

//! Implementation of the `cairn show` command.
//!
//! Prints an issue's fields and its threaded comment feed, indented by
//! reply depth.

use crate::context::Context;
use crate::output::print_status;
use anyhow::Result;
use cairn_core::thread_comments;

/// Shows one issue with its comment thread.
///
/// # Errors
///
/// Returns an error when the issue cannot be resolved or read.
pub fn execute(id: String, json: bool) -> Result<()> {
    let ctx = Context::load()?;
    let (dir, issue) = ctx.find_issue(&id)?;
    let comments = ctx.store.load_comments(&dir)?;
    let threaded = thread_comments(&comments);

    let status = ctx.workflow.normalize_status(&issue.status);

    if json {
        let thread: Vec<_> = threaded
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "id": entry.comment.id,
                    "author": entry.comment.author,
                    "date": entry.comment.date,
                    "body": entry.comment.body,
                    "reply_to": entry.comment.reply_to,
                    "depth": entry.depth,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "id": issue.id,
                "title": issue.title,
                "created": issue.created,
                "status": status,
                "severity": issue.severity.to_string(),
                "assignee": issue.assignee,
                "author": issue.author,
                "labels": issue.labels,
                "body": issue.body,
                "path": dir.display().to_string(),
                "comments": thread,
            }))?
        );
        return Ok(());
    }

    println!("{} {}", issue.id, issue.title);
    print!("Status:   ");
    print_status(&status, ctx.workflow.status_color(&status));
    println!();
    println!("Severity: {}", issue.severity);
    println!("Author:   {}", issue.author);
    if !issue.assignee.is_empty() {
        println!("Assignee: {}", issue.assignee);
    }
    if !issue.labels.is_empty() {
        println!("Labels:   {}", issue.labels.join(", "));
    }
    println!("Created:  {}", issue.created.to_rfc3339());

    if !issue.body.is_empty() {
        println!();
        println!("{}", issue.body.trim_end());
    }

    if !threaded.is_empty() {
        println!();
        println!("Comments ({}):", threaded.len());
        for entry in &threaded {
            let indent = "  ".repeat(entry.depth + 1);
            println!(
                "{}{} [{}] {}",
                indent,
                entry.comment.id,
                entry.comment.author,
                entry.comment.date.format("%Y-%m-%d %H:%M"),
            );
            for line in entry.comment.body.trim_end().lines() {
                println!("{}  {}", indent, line);
            }
        }
    }

    Ok(())
}
