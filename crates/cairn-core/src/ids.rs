// Rust guideline compliant 2026-07-29

//! Collision-free identifier allocation.
//!
//! Ids are short random base36 strings. Uniqueness is enforced by scanning
//! the issues root for every id already spent on an issue or a comment and
//! regenerating until a free candidate is found. There is no uniqueness
//! guarantee across concurrent processes sharing one working tree.

use crate::store::{COMMENTS_DIR, ISSUE_FILE};
use crate::{Error, Result};
use rand::Rng;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Length of every issue and comment identifier.
pub const ID_LEN: usize = 7;

const ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Validates that an id is exactly [`ID_LEN`] characters from `[a-z0-9]`.
///
/// # Errors
///
/// Returns a parse error describing the expected format otherwise.
pub fn validate_id_format(id: &str) -> Result<()> {
    let well_formed = id.len() == ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit());

    if well_formed {
        Ok(())
    } else {
        Err(Error::Parse(format!(
            "Invalid id '{}': expected {} characters from [a-z0-9]",
            id, ID_LEN
        )))
    }
}

/// Allocator for issue and comment identifiers.
///
/// Holds its scan root explicitly; there is no shared or module-level
/// randomness state.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    root: PathBuf,
}

impl IdAllocator {
    /// Creates an allocator scanning the given issues root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Generates an id absent from the exclusion set of the scan root.
    ///
    /// Candidates are drawn uniformly from `[a-z0-9]^7` and regenerated on
    /// collision. Issue and comment ids share one namespace, so a returned
    /// id is free for either record type.
    pub fn generate(&self) -> String {
        let used = self.used_ids();
        let mut rng = rand::thread_rng();

        loop {
            let candidate = random_id(&mut rng);
            if !used.contains(&candidate) {
                return candidate;
            }
        }
    }

    /// Collects every id currently spent beneath the scan root.
    ///
    /// Walks all shard levels, reading the `id` field of each issue
    /// metadata file, of each comment file directly inside an issue
    /// directory, and of each comment file under a nested `comments/`
    /// subtree. Unreadable entries and malformed YAML are skipped so one
    /// corrupt record cannot abort allocation.
    pub fn used_ids(&self) -> HashSet<String> {
        let mut used = HashSet::new();
        collect_ids(&self.root, &mut used);
        used
    }
}

fn random_id(rng: &mut impl Rng) -> String {
    (0..ID_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..ID_CHARSET.len());
            ID_CHARSET[idx] as char
        })
        .collect()
}

fn collect_ids(dir: &Path, used: &mut HashSet<String>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() || is_hidden(&path) {
            continue;
        }

        if path.join(ISSUE_FILE).is_file() {
            if let Some(id) = read_id_field(&path.join(ISSUE_FILE)) {
                used.insert(id);
            }
            collect_comment_ids(&path, false, used);
        } else {
            // Shard directory; descend.
            collect_ids(&path, used);
        }
    }
}

fn collect_comment_ids(dir: &Path, recurse: bool, used: &mut HashSet<String>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() && crate::store::is_comment_file(&path) {
            if let Some(id) = read_id_field(&path) {
                used.insert(id);
            }
        } else if path.is_dir() && !is_hidden(&path) {
            let descend = recurse || path.file_name().is_some_and(|n| n == COMMENTS_DIR);
            if descend {
                collect_comment_ids(&path, true, used);
            }
        }
    }
}

fn read_id_field(path: &Path) -> Option<String> {
    let text = fs::read_to_string(path).ok()?;
    let value: serde_yaml::Value = serde_yaml::from_str(&text).ok()?;
    value.get("id")?.as_str().map(str::to_string)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
