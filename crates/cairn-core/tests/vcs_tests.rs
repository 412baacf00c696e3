// Rust guideline compliant 2026-08-03

//! Unit tests for the VCS interop layer.
//!
//! These tests run against throwaway git repositories initialized in
//! temporary directories, plus the neutral no-repository path.

use cairn_core::{is_dirty, GitVcs};
use git2::{IndexAddOption, Repository};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn init_repo(path: &Path) {
    let repo = Repository::init(path).expect("Failed to init repository");
    let mut config = repo.config().expect("Failed to open config");
    config
        .set_str("user.name", "Test User")
        .expect("Failed to set user.name");
    config
        .set_str("user.email", "test@example.com")
        .expect("Failed to set user.email");
}

fn commit_all(path: &Path, message: &str) -> String {
    let repo = Repository::open(path).expect("Failed to open repository");
    let mut index = repo.index().expect("Failed to open index");
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .expect("Failed to add files");
    index.write().expect("Failed to write index");

    let tree_id = index.write_tree().expect("Failed to write tree");
    let tree = repo.find_tree(tree_id).expect("Failed to find tree");
    let sig = repo.signature().expect("Failed to build signature");

    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Failed to commit")
        .to_string()
}

fn issues_root(repo: &Path) -> PathBuf {
    let root = repo.join("issues");
    fs::create_dir_all(&root).expect("Failed to create issues root");
    root
}

#[test]
fn test_dirty_paths_sees_untracked_then_clean_after_commit() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    init_repo(temp_dir.path());
    let root = issues_root(temp_dir.path());

    let issue_dir = root.join("fix-it-abc1234");
    fs::create_dir_all(&issue_dir).expect("Failed to create issue dir");
    let file = issue_dir.join("issue.yaml");
    fs::write(&file, "id: abc1234\n").expect("Failed to write");

    let vcs = GitVcs::new(temp_dir.path());
    let dirty = vcs.dirty_paths(&root);
    assert!(!dirty.is_empty(), "Untracked issue file must be dirty");
    assert!(is_dirty(&issue_dir, &dirty), "Issue dir prefix-matches");
    assert!(is_dirty(&file, &dirty), "The file itself matches");

    commit_all(temp_dir.path(), "add issue");
    assert!(vcs.dirty_paths(&root).is_empty(), "Clean after commit");
}

#[test]
fn test_dirty_paths_sees_modifications_and_respects_root() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    init_repo(temp_dir.path());
    let root = issues_root(temp_dir.path());

    let file = root.join("a-abc1234").join("issue.yaml");
    fs::create_dir_all(file.parent().unwrap()).expect("Failed to create dir");
    fs::write(&file, "id: abc1234\nstatus: open\n").expect("Failed to write");
    let outside = temp_dir.path().join("README.md");
    fs::write(&outside, "hello\n").expect("Failed to write");
    commit_all(temp_dir.path(), "baseline");

    fs::write(&file, "id: abc1234\nstatus: active\n").expect("Failed to modify");
    fs::write(&outside, "changed\n").expect("Failed to modify");

    let vcs = GitVcs::new(temp_dir.path());
    let dirty = vcs.dirty_paths(&root);
    assert!(is_dirty(&file, &dirty), "Modified tracked file is dirty");
    assert!(
        dirty.iter().all(|p| !p.ends_with("README.md")),
        "Paths outside the root are excluded"
    );
}

#[test]
fn test_history_is_newest_first_and_scoped_to_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    init_repo(temp_dir.path());
    let root = issues_root(temp_dir.path());

    let file = root.join("issue.yaml");
    fs::write(&file, "status: open\n").expect("Failed to write");
    commit_all(temp_dir.path(), "create issue");

    fs::write(root.join("other.yaml"), "unrelated\n").expect("Failed to write");
    commit_all(temp_dir.path(), "unrelated change");

    fs::write(&file, "status: closed\n").expect("Failed to write");
    commit_all(temp_dir.path(), "close issue");

    let vcs = GitVcs::new(temp_dir.path());
    let history = vcs.history(&file);

    assert_eq!(history.len(), 2, "Only commits touching the file count");
    assert_eq!(history[0].message, "close issue");
    assert_eq!(history[1].message, "create issue");
    assert_eq!(history[0].author, "Test User");
}

#[test]
fn test_content_at_returns_historical_bytes() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    init_repo(temp_dir.path());
    let root = issues_root(temp_dir.path());

    let file = root.join("issue.yaml");
    fs::write(&file, "status: open\n").expect("Failed to write");
    commit_all(temp_dir.path(), "v1");
    fs::write(&file, "status: closed\n").expect("Failed to write");
    commit_all(temp_dir.path(), "v2");

    let vcs = GitVcs::new(temp_dir.path());
    let history = vcs.history(&file);
    assert_eq!(history.len(), 2);

    let old = vcs.content_at(&file, &history[1].id);
    assert_eq!(old.as_deref(), Some(b"status: open\n".as_slice()));

    let new = vcs.content_at(&file, "HEAD");
    assert_eq!(new.as_deref(), Some(b"status: closed\n".as_slice()));

    assert_eq!(vcs.content_at(&file, "0000000"), None);
}

#[test]
fn test_diff_between_revisions_and_against_worktree() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    init_repo(temp_dir.path());
    let root = issues_root(temp_dir.path());

    let file = root.join("issue.yaml");
    fs::write(&file, "status: open\n").expect("Failed to write");
    commit_all(temp_dir.path(), "v1");
    fs::write(&file, "status: closed\n").expect("Failed to write");
    commit_all(temp_dir.path(), "v2");

    let vcs = GitVcs::new(temp_dir.path());
    let between = vcs.diff(&file, "HEAD~1", Some("HEAD"));
    assert!(between.contains("-status: open"));
    assert!(between.contains("+status: closed"));

    fs::write(&file, "status: reopened\n").expect("Failed to write");
    let against_worktree = vcs.diff(&file, "HEAD", None);
    assert!(against_worktree.contains("+status: reopened"));
}

#[test]
fn test_all_queries_neutral_outside_repository() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file = temp_dir.path().join("issue.yaml");
    fs::write(&file, "id: abc1234\n").expect("Failed to write");

    let vcs = GitVcs::new(temp_dir.path());
    assert!(vcs.dirty_paths(temp_dir.path()).is_empty());
    assert!(vcs.history(&file).is_empty());
    assert_eq!(vcs.content_at(&file, "HEAD"), None);
    assert_eq!(vcs.diff(&file, "HEAD", None), "");
    vcs.stage(&file);
}

#[test]
fn test_history_of_uncommitted_file_is_empty() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    init_repo(temp_dir.path());
    let root = issues_root(temp_dir.path());

    let file = root.join("issue.yaml");
    fs::write(&file, "id: abc1234\n").expect("Failed to write");
    commit_all(temp_dir.path(), "unrelated baseline");

    let fresh = root.join("fresh.yaml");
    fs::write(&fresh, "id: ddd5678\n").expect("Failed to write");
    assert!(GitVcs::new(temp_dir.path()).history(&fresh).is_empty());
}

#[test]
fn test_is_dirty_prefix_semantics() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dir = temp_dir.path().join("issue-dir");
    fs::create_dir_all(&dir).expect("Failed to create dir");

    let mut dirty = HashSet::new();
    dirty.insert(dir.join("issue.yaml"));

    assert!(is_dirty(&dir, &dirty));
    assert!(is_dirty(&dir.join("issue.yaml"), &dirty));
    assert!(!is_dirty(&temp_dir.path().join("elsewhere"), &dirty));
}
