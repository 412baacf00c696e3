// Rust guideline compliant 2026-08-04

//! Implementation of the `cairn comment` command.

use crate::context::{default_author, Context};
use anyhow::Result;
use cairn_core::{Comment, IdAllocator};
use chrono::Utc;

/// Appends a comment to an issue.
///
/// The comment id comes from the shared allocator namespace, so issue
/// and comment ids never collide. A `--reply-to` target must name an
/// existing comment on the same issue.
///
/// # Errors
///
/// Returns an error when the issue or reply target cannot be resolved,
/// or the write fails.
pub fn execute(
    id: String,
    body: String,
    reply_to: Option<String>,
    author: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = Context::load()?;
    let (dir, issue) = ctx.find_issue(&id)?;

    if let Some(parent) = &reply_to {
        let comments = ctx.store.load_comments(&dir)?;
        if !comments.iter().any(|c| &c.id == parent) {
            anyhow::bail!("Comment '{}' not found on issue {}", parent, issue.id);
        }
    }

    let allocator = IdAllocator::new(ctx.store.root());
    let comment = Comment {
        id: allocator.generate(),
        author: author.unwrap_or_else(default_author),
        date: Utc::now(),
        body,
        reply_to,
        external_id: None,
    };

    let path = ctx.store.save_comment(&dir, &comment)?;
    ctx.vcs.stage(&path);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "status": "ok",
                "action": "comment",
                "id": issue.id,
                "comment_id": comment.id,
                "path": path.display().to_string(),
            }))?
        );
    } else {
        println!("✓ Added comment {} to {}", comment.id, issue.id);
    }

    Ok(())
}
