// Rust guideline compliant 2026-08-02

//! Property-based tests for comment threading.

use cairn_core::{thread_comments, Comment};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

/// Generates a flat comment set with random parent links. Parents always
/// point at earlier indices (or at a bogus id), so the input is a forest
/// plus orphans; ids are distinct by construction.
fn arb_comments() -> impl Strategy<Value = Vec<Comment>> {
    prop::collection::vec((0u8..4, 0i64..1_000_000), 0..24).prop_map(|specs| {
        specs
            .iter()
            .enumerate()
            .map(|(i, &(parent_kind, seconds))| {
                let reply_to = match parent_kind {
                    0 => None,
                    1 => Some("missing".to_string()),
                    _ if i > 0 => Some(format!("c{:06}", (seconds as usize) % i)),
                    _ => None,
                };
                Comment {
                    id: format!("c{:06}", i),
                    author: "prop".to_string(),
                    date: Utc.timestamp_opt(seconds, 0).unwrap(),
                    body: String::new(),
                    reply_to,
                    external_id: None,
                }
            })
            .collect()
    })
}

proptest! {
    /// Every comment reachable from a root appears exactly once, and for
    /// every output entry at depth d > 0 some earlier entry at depth
    /// d - 1 is its parent.
    #[test]
    fn prop_pre_order_parents_precede_children(comments in arb_comments()) {
        let threaded = thread_comments(&comments);

        // Parents point backwards here, so nothing is cyclic and every
        // comment survives threading.
        prop_assert_eq!(threaded.len(), comments.len());

        for (pos, entry) in threaded.iter().enumerate() {
            if entry.depth == 0 {
                continue;
            }
            let parent = entry
                .comment
                .reply_to
                .as_deref()
                .expect("Non-root entries carry reply_to");
            let found = threaded[..pos].iter().any(|earlier| {
                earlier.depth == entry.depth - 1 && earlier.comment.id == parent
            });
            prop_assert!(found, "Parent of {} must precede it at depth - 1", entry.comment.id);
        }
    }

    /// Root ordering is date-ascending.
    #[test]
    fn prop_roots_sorted_by_date(comments in arb_comments()) {
        let threaded = thread_comments(&comments);
        let roots: Vec<_> = threaded
            .iter()
            .filter(|entry| entry.depth == 0)
            .map(|entry| entry.comment.date)
            .collect();
        prop_assert!(roots.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
