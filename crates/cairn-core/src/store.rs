// Rust guideline compliant 2026-07-29

//! Sharded document store for issue and comment records.
//!
//! One directory per issue, named `<slug-of-title>-<id>`, holding an
//! `issue.yaml` metadata file and sibling comment files. Directories bucket
//! by calendar year then month once a fan-out threshold is exceeded; the
//! sharding is lazy and append-only, so readers always scan recursively and
//! never need to know the layout in force when a record was written.
//!
//! Lookup by id is a linear scan over directory entries. There is no index;
//! this is acceptable at the target scale of thousands of issues.

use crate::models::{slugify, Comment, Issue};
use crate::vcs::GitVcs;
use crate::{Error, Result};
use chrono::{DateTime, Datelike, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Metadata file name inside every issue directory.
pub const ISSUE_FILE: &str = "issue.yaml";

/// Name of the nested comment subtree inside an issue directory.
pub const COMMENTS_DIR: &str = "comments";

/// Maximum direct entries in a bucket before writes spill into the next
/// shard level. The same threshold governs per-issue comment sharding.
pub const SHARD_THRESHOLD: usize = 128;

/// Comment file names embed a slug of at most this many characters of the
/// first body line.
const COMMENT_SLUG_LEN: usize = 20;

/// Returns whether a path looks like a comment record file.
pub fn is_comment_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("comment-") && n.ends_with(".yaml"))
}

/// Document store rooted at an issues directory.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Creates a store over the given issues root. The root itself is
    /// created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the issues root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the bucket a record created at the given instant would be
    /// written into.
    ///
    /// While the root holds fewer than [`SHARD_THRESHOLD`] direct entries
    /// new issues land in the root; afterwards in `root/<year>`, and once
    /// that saturates too, in `root/<year>/<month>` (zero-padded). Existing
    /// issues are never re-balanced.
    pub fn target_dir(&self, created: DateTime<Utc>) -> PathBuf {
        shard_target(&self.root, created)
    }

    /// Saves a new issue, staging the created path with `vcs` when given.
    ///
    /// The issue directory is fully populated under a hidden staging name
    /// and atomically renamed into its sharded location, so a crash never
    /// leaves a half-written issue visible to scans.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Collision`] when the target directory already
    /// exists — the existing record is left untouched — and propagates
    /// validation and write failures.
    pub fn save_issue(&self, issue: &Issue, vcs: Option<&GitVcs>) -> Result<PathBuf> {
        issue.validate()?;
        fs::create_dir_all(&self.root)?;

        let target = self.target_dir(issue.created);
        let final_dir = target.join(issue.dir_name());
        if final_dir.exists() {
            return Err(Error::Collision(final_dir.display().to_string()));
        }

        let staging = self.root.join(format!(".stage-{}", issue.id));
        fs::create_dir_all(&staging)?;
        if let Err(err) = write_issue_file(&staging, issue) {
            let _ = fs::remove_dir_all(&staging);
            return Err(err);
        }

        fs::create_dir_all(&target)?;
        if let Err(err) = fs::rename(&staging, &final_dir) {
            let _ = fs::remove_dir_all(&staging);
            // A losing race surfaces as a rename failure onto an existing
            // path.
            if final_dir.exists() {
                return Err(Error::Collision(final_dir.display().to_string()));
            }
            return Err(Error::Io(err));
        }

        if let Some(vcs) = vcs {
            vcs.stage(&final_dir);
        }

        Ok(final_dir)
    }

    /// Reads the metadata file of an issue directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the directory holds no metadata
    /// file, and propagates read and parse failures.
    pub fn load_issue(&self, dir: &Path) -> Result<Issue> {
        let path = dir.join(ISSUE_FILE);
        if !path.is_file() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        let text = fs::read_to_string(&path)?;
        let issue: Issue = serde_yaml::from_str(&text)?;
        Ok(issue)
    }

    /// Rewrites an existing issue's metadata file in place.
    ///
    /// The directory keeps its name: the id never changes and the slug is
    /// fixed at creation, so title edits do not move the record.
    ///
    /// # Errors
    ///
    /// Propagates validation and write failures.
    pub fn update_issue(&self, dir: &Path, issue: &Issue) -> Result<()> {
        issue.validate()?;
        write_issue_file(dir, issue)
    }

    /// Finds the first directory named `*-<id>` that contains a metadata
    /// file, at any shard depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no directory matches.
    pub fn find_dir_by_id(&self, id: &str) -> Result<PathBuf> {
        let suffix = format!("-{}", id);
        find_dir(&self.root, &suffix).ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Collects every issue directory regardless of nesting depth, sorted
    /// by path for stable enumeration.
    ///
    /// A missing root yields an empty list; unreadable subtrees are
    /// skipped so one bad entry cannot abort a listing.
    pub fn all_issue_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        collect_issue_dirs(&self.root, &mut dirs);
        dirs.sort();
        dirs
    }

    /// Appends a comment file to an issue directory.
    ///
    /// The file is named `comment-<slug>-<id>.yaml`, where the slug covers
    /// at most the first [`COMMENT_SLUG_LEN`] characters of the first body
    /// line. While the issue directory holds fewer than
    /// [`SHARD_THRESHOLD`] direct comment files the record is written
    /// flat; afterwards it nests under `comments/` with the same
    /// year/month threshold rule as issue sharding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Collision`] if the file already exists, and
    /// propagates write failures.
    pub fn save_comment(&self, issue_dir: &Path, comment: &Comment) -> Result<PathBuf> {
        crate::ids::validate_id_format(&comment.id)?;

        let first_line = comment.body.lines().next().unwrap_or("");
        let head: String = first_line.chars().take(COMMENT_SLUG_LEN).collect();
        let file_name = format!("comment-{}-{}.yaml", slugify(&head), comment.id);

        let target = comment_target_dir(issue_dir, comment.date);
        fs::create_dir_all(&target)?;

        let path = target.join(file_name);
        if path.exists() {
            return Err(Error::Collision(path.display().to_string()));
        }

        let yaml = serde_yaml::to_string(comment)?;
        fs::write(&path, yaml)?;
        Ok(path)
    }

    /// Loads every comment of an issue, flat and nested layouts alike,
    /// sorted by date then id.
    ///
    /// Corrupt individual comment files are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only when the issue directory itself cannot be
    /// read.
    pub fn load_comments(&self, issue_dir: &Path) -> Result<Vec<Comment>> {
        // Surface an unreadable issue directory; everything below degrades
        // per entry.
        fs::read_dir(issue_dir)?;

        let mut comments = Vec::new();
        collect_comments(issue_dir, false, &mut comments);
        comments.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(comments)
    }
}

/// Serializes the issue into `dir/issue.yaml`, with the body trimmed to
/// end with exactly one trailing newline (empty bodies stay empty).
fn write_issue_file(dir: &Path, issue: &Issue) -> Result<()> {
    let mut record = issue.clone();
    record.body = normalized_body(&issue.body);
    let yaml = serde_yaml::to_string(&record)?;
    fs::write(dir.join(ISSUE_FILE), yaml)?;
    Ok(())
}

fn normalized_body(body: &str) -> String {
    let trimmed = body.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}\n", trimmed)
    }
}

fn shard_target(root: &Path, created: DateTime<Utc>) -> PathBuf {
    if count_entries(root) < SHARD_THRESHOLD {
        return root.to_path_buf();
    }

    let year_dir = root.join(created.year().to_string());
    if count_entries(&year_dir) < SHARD_THRESHOLD {
        return year_dir;
    }

    year_dir.join(format!("{:02}", created.month()))
}

/// Counts direct, non-hidden entries; a missing directory counts zero.
fn count_entries(dir: &Path) -> usize {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .flatten()
            .filter(|entry| !is_hidden(&entry.path()))
            .count(),
        Err(_) => 0,
    }
}

fn comment_target_dir(issue_dir: &Path, date: DateTime<Utc>) -> PathBuf {
    let direct_comments = match fs::read_dir(issue_dir) {
        Ok(entries) => entries
            .flatten()
            .filter(|entry| is_comment_file(&entry.path()))
            .count(),
        Err(_) => 0,
    };

    if direct_comments < SHARD_THRESHOLD {
        issue_dir.to_path_buf()
    } else {
        shard_target(&issue_dir.join(COMMENTS_DIR), date)
    }
}

fn find_dir(dir: &Path, suffix: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() || is_hidden(&path) {
            continue;
        }

        if path.join(ISSUE_FILE).is_file() {
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(suffix));
            if matches {
                return Some(path);
            }
        } else if let Some(found) = find_dir(&path, suffix) {
            return Some(found);
        }
    }

    None
}

fn collect_issue_dirs(dir: &Path, out: &mut Vec<PathBuf>) {
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
            out.push(path);
        } else {
            collect_issue_dirs(&path, out);
        }
    }
}

fn collect_comments(dir: &Path, recurse: bool, out: &mut Vec<Comment>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() && is_comment_file(&path) {
            if let Ok(text) = fs::read_to_string(&path) {
                if let Ok(comment) = Comment::from_yaml(&text) {
                    out.push(comment);
                }
            }
        } else if path.is_dir() && !is_hidden(&path) {
            let descend = recurse || path.file_name().is_some_and(|n| n == COMMENTS_DIR);
            if descend {
                collect_comments(&path, true, out);
            }
        }
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
