// Rust guideline compliant 2026-08-03

//! Shared command context: configuration, store, workflow, and VCS
//! client resolved from the current directory.

use anyhow::Result;
use cairn_core::{Config, GitVcs, Issue, Store, Workflow};
use std::path::{Path, PathBuf};

/// Name of the Cairn data directory at the repository root.
pub const CAIRN_DIR: &str = ".cairn";

/// Everything a command needs to operate on the current repository.
pub struct Context {
    pub config: Config,
    pub store: Store,
    pub workflow: Workflow,
    pub vcs: GitVcs,
}

impl Context {
    /// Loads the context from the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error when no `.cairn` directory exists or the
    /// configuration is invalid. The workflow never fails to load; a
    /// missing or unparsable file yields the built-in fallback.
    pub fn load() -> Result<Self> {
        let cairn_dir = Path::new(CAIRN_DIR);
        if !cairn_dir.exists() {
            anyhow::bail!("Cairn repository not initialized. Run 'cairn init' first.");
        }

        let config = Config::load(cairn_dir)?;
        let store = Store::new(&config.issues_dir);
        let workflow = Workflow::load(Path::new(&config.workflow_file));
        let vcs = GitVcs::new(".");

        Ok(Self {
            config,
            store,
            workflow,
            vcs,
        })
    }

    /// Resolves an issue id to its directory and loaded record.
    ///
    /// # Errors
    ///
    /// Returns an error when no issue directory matches the id or the
    /// metadata file cannot be parsed.
    pub fn find_issue(&self, id: &str) -> Result<(PathBuf, Issue)> {
        let dir = self.store.find_dir_by_id(id)?;
        let issue = self.store.load_issue(&dir)?;
        Ok((dir, issue))
    }
}

/// Default author: `git config user.name`, then `$USER`/`$USERNAME`,
/// then `unknown`.
pub fn default_author() -> String {
    if let Ok(output) = std::process::Command::new("git")
        .args(["config", "user.name"])
        .output()
    {
        if output.status.success() {
            let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !name.is_empty() {
                return name;
            }
        }
    }

    std::env::var("USER")
        .ok()
        .or_else(|| std::env::var("USERNAME").ok())
        .unwrap_or_else(|| "unknown".to_string())
}
