// Rust guideline compliant 2026-07-30

//! Comment threading: reply-tree reconstruction from flat records.

use crate::models::Comment;
use std::collections::{HashMap, HashSet};

/// A comment annotated with its depth in the reply tree. Roots have
/// depth 0; a reply sits at its parent's depth plus one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadedComment {
    pub comment: Comment,
    pub depth: usize,
}

/// Flattens a set of comments into a depth-annotated pre-order sequence
/// suitable for linear rendering with indentation.
///
/// Comments group by parent id; a missing `reply_to`, or one naming an id
/// not present in the input, makes a root, as does a comment replying to
/// itself. Every group, the roots included, orders by date ascending
/// (ties broken by id), and each node's children follow the node itself.
/// Members of a longer `reply_to` cycle are unreachable from any root and
/// are dropped.
pub fn thread_comments(comments: &[Comment]) -> Vec<ThreadedComment> {
    let known: HashSet<&str> = comments.iter().map(|c| c.id.as_str()).collect();

    let mut roots: Vec<&Comment> = Vec::new();
    let mut children: HashMap<&str, Vec<&Comment>> = HashMap::new();

    for comment in comments {
        match comment
            .reply_to
            .as_deref()
            .filter(|parent| *parent != comment.id && known.contains(parent))
        {
            Some(parent) => children.entry(parent).or_default().push(comment),
            None => roots.push(comment),
        }
    }

    sort_group(&mut roots);
    for group in children.values_mut() {
        sort_group(group);
    }

    let mut out = Vec::with_capacity(comments.len());
    for root in roots {
        visit(root, 0, &children, &mut out);
    }
    out
}

fn sort_group(group: &mut [&Comment]) {
    group.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
}

fn visit<'a>(
    comment: &'a Comment,
    depth: usize,
    children: &HashMap<&str, Vec<&'a Comment>>,
    out: &mut Vec<ThreadedComment>,
) {
    out.push(ThreadedComment {
        comment: comment.clone(),
        depth,
    });

    if let Some(replies) = children.get(comment.id.as_str()) {
        for reply in replies {
            visit(reply, depth + 1, children, out);
        }
    }
}
