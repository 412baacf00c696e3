// Rust guideline compliant 2026-07-31

//! Version-control interop: dirty-state detection and historical
//! content/diff retrieval over libgit2.
//!
//! The client is deliberately narrow — status, log, show, diff, stage —
//! and every query degrades to an empty or neutral result when repository
//! discovery fails, the path was never committed, or the underlying
//! library errors. Storage writes are never routed through this layer, so
//! a missing repository can never mask a write failure.

use chrono::{DateTime, Utc};
use git2::{DiffFormat, DiffOptions, Repository, Sort, StatusOptions};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One entry of a file's revision log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Revision {
    /// Full revision id (commit hash).
    pub id: String,
    pub author: String,
    pub date: DateTime<Utc>,
    /// Commit summary line.
    pub message: String,
}

/// Returns whether an entity (issue directory, comment file) is dirty:
/// some dirty path is the entity itself or lies beneath it.
pub fn is_dirty(entity: &Path, dirty: &HashSet<PathBuf>) -> bool {
    let entity = absolutize(entity);
    dirty.iter().any(|path| path.starts_with(&entity))
}

/// Narrow git client bound to a working directory.
///
/// The repository is discovered fresh per query; no handle is cached, so
/// a repository appearing or vanishing between calls is simply reflected
/// in the next answer.
#[derive(Debug, Clone)]
pub struct GitVcs {
    workdir: PathBuf,
}

impl GitVcs {
    /// Creates a client that discovers the repository from `workdir`.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn repo(&self) -> Option<Repository> {
        Repository::discover(&self.workdir).ok()
    }

    /// Absolute paths with uncommitted changes restricted to `root`:
    /// the union of working-tree-vs-HEAD differences and
    /// untracked-but-not-ignored files.
    ///
    /// Outside a repository, or when `root` does not exist, the set is
    /// empty ("not dirty").
    pub fn dirty_paths(&self, root: &Path) -> HashSet<PathBuf> {
        self.try_dirty_paths(root).unwrap_or_default()
    }

    fn try_dirty_paths(&self, root: &Path) -> Option<HashSet<PathBuf>> {
        let repo = self.repo()?;
        let workdir = repo.workdir()?.canonicalize().ok()?;
        let root = root.canonicalize().ok()?;

        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);
        let statuses = repo.statuses(Some(&mut options)).ok()?;

        let mut dirty = HashSet::new();
        for entry in statuses.iter() {
            let Some(rel) = entry.path() else { continue };
            let abs = workdir.join(rel);
            if abs.starts_with(&root) {
                dirty.insert(abs);
            }
        }
        Some(dirty)
    }

    /// Revision log for one file, newest first.
    ///
    /// A commit is included when the file's blob differs from the first
    /// parent's (or when the root commit introduces it). Files with no
    /// history, and queries outside a repository, yield an empty list.
    pub fn history(&self, file: &Path) -> Vec<Revision> {
        self.try_history(file).unwrap_or_default()
    }

    fn try_history(&self, file: &Path) -> Option<Vec<Revision>> {
        let repo = self.repo()?;
        let rel = rel_path(&repo, file)?;

        let mut walk = repo.revwalk().ok()?;
        walk.push_head().ok()?;
        walk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME).ok()?;

        let mut revisions = Vec::new();
        for oid in walk.flatten() {
            let Ok(commit) = repo.find_commit(oid) else {
                continue;
            };
            let current = blob_id(&commit, &rel);
            let changed = match commit.parent(0) {
                Ok(parent) => blob_id(&parent, &rel) != current,
                Err(_) => current.is_some(),
            };

            if changed {
                revisions.push(Revision {
                    id: oid.to_string(),
                    author: commit
                        .author()
                        .name()
                        .unwrap_or("unknown")
                        .to_string(),
                    date: DateTime::from_timestamp(commit.time().seconds(), 0)
                        .unwrap_or(DateTime::UNIX_EPOCH),
                    message: commit.summary().unwrap_or("").to_string(),
                });
            }
        }
        Some(revisions)
    }

    /// Byte content of `file` as it existed at `revision`, or `None` when
    /// the revision or path cannot be resolved.
    pub fn content_at(&self, file: &Path, revision: &str) -> Option<Vec<u8>> {
        let repo = self.repo()?;
        let rel = rel_path(&repo, file)?;

        let commit = repo
            .revparse_single(revision)
            .ok()?
            .peel_to_commit()
            .ok()?;
        let entry = commit.tree().ok()?.get_path(&rel).ok()?;
        let blob = repo.find_blob(entry.id()).ok()?;
        Some(blob.content().to_vec())
    }

    /// Unified diff of `file` between `rev_a` and `rev_b`, or between
    /// `rev_a` and the working tree when `rev_b` is `None`. Empty when
    /// unavailable.
    pub fn diff(&self, file: &Path, rev_a: &str, rev_b: Option<&str>) -> String {
        self.try_diff(file, rev_a, rev_b).unwrap_or_default()
    }

    fn try_diff(&self, file: &Path, rev_a: &str, rev_b: Option<&str>) -> Option<String> {
        let repo = self.repo()?;
        let rel = rel_path(&repo, file)?;

        let mut options = DiffOptions::new();
        options.pathspec(rel.as_path());

        let tree_a = repo
            .revparse_single(rev_a)
            .ok()?
            .peel_to_commit()
            .ok()?
            .tree()
            .ok()?;

        let diff = match rev_b {
            Some(rev) => {
                let tree_b = repo
                    .revparse_single(rev)
                    .ok()?
                    .peel_to_commit()
                    .ok()?
                    .tree()
                    .ok()?;
                repo.diff_tree_to_tree(Some(&tree_a), Some(&tree_b), Some(&mut options))
                    .ok()?
            }
            None => repo
                .diff_tree_to_workdir_with_index(Some(&tree_a), Some(&mut options))
                .ok()?,
        };

        let mut text = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            match line.origin() {
                '+' | '-' | ' ' => text.push(line.origin()),
                _ => {}
            }
            text.push_str(&String::from_utf8_lossy(line.content()));
            true
        })
        .ok()?;
        Some(text)
    }

    /// Adds a path (recursively) to the index. Best-effort: failures are
    /// swallowed so an absent repository never fails a save.
    pub fn stage(&self, path: &Path) {
        let _ = self.try_stage(path);
    }

    fn try_stage(&self, path: &Path) -> Option<()> {
        let repo = self.repo()?;
        let rel = rel_path(&repo, path)?;
        let mut index = repo.index().ok()?;
        index
            .add_all([rel.as_path()], git2::IndexAddOption::DEFAULT, None)
            .ok()?;
        index.write().ok()?;
        Some(())
    }
}

fn blob_id(commit: &git2::Commit<'_>, rel: &Path) -> Option<git2::Oid> {
    commit
        .tree()
        .ok()?
        .get_path(rel)
        .ok()
        .map(|entry| entry.id())
}

/// Resolves `path` relative to the repository working directory.
fn rel_path(repo: &Repository, path: &Path) -> Option<PathBuf> {
    let workdir = repo.workdir()?.canonicalize().ok()?;
    absolutize(path)
        .strip_prefix(&workdir)
        .ok()
        .map(Path::to_path_buf)
}

/// Best-effort canonical absolute form of a path that may not exist,
/// e.g. a file queried only in history.
fn absolutize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => match parent.canonicalize() {
            Ok(parent) => parent.join(name),
            Err(_) => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}
