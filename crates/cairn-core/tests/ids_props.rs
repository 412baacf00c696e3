// Rust guideline compliant 2026-08-01

//! Property-based tests for identifier allocation.

use cairn_core::{IdAllocator, ID_LEN};
use proptest::prelude::*;
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

/// Generates small sets of well-formed ids to pre-seed a scan root.
fn arb_ids() -> impl Strategy<Value = HashSet<String>> {
    prop::collection::hash_set("[a-z0-9]{7}", 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every id the allocator returns is exactly [`ID_LEN`] characters
    /// from `[a-z0-9]` and absent from the exclusion set computed by
    /// scanning its root.
    #[test]
    fn prop_generated_ids_are_well_formed_and_fresh(seeded in arb_ids()) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        for id in &seeded {
            let dir = temp_dir.path().join(format!("seeded-{}", id));
            fs::create_dir_all(&dir).expect("Failed to create issue dir");
            fs::write(
                dir.join("issue.yaml"),
                format!("id: {}\ntitle: Seeded\ncreated: 2025-01-01T00:00:00Z\nstatus: open\nauthor: a\n", id),
            )
            .expect("Failed to write issue.yaml");
        }

        let allocator = IdAllocator::new(temp_dir.path());
        prop_assert_eq!(allocator.used_ids(), seeded.clone());

        let id = allocator.generate();
        prop_assert_eq!(id.len(), ID_LEN);
        prop_assert!(id.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        prop_assert!(!seeded.contains(&id));
    }
}
