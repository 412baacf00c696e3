// Rust guideline compliant 2026-08-03

//! Implementation of the `cairn init` command.
//!
//! Initializes a Cairn repository by creating the `.cairn` directory,
//! the issues root, a default workflow file, and the configuration.

use crate::context::CAIRN_DIR;
use anyhow::Result;
use cairn_core::{Config, Workflow};
use std::fs;
use std::path::Path;

/// Initializes a Cairn repository in the current directory.
///
/// Existing files are left alone, so re-running `init` is safe.
///
/// # Errors
///
/// Returns an error if a directory or file cannot be created.
pub fn execute(json: bool) -> Result<()> {
    let cairn_dir = Path::new(CAIRN_DIR);
    if !cairn_dir.exists() {
        fs::create_dir(cairn_dir)?;
    }

    let config_path = cairn_dir.join("config.toml");
    if !config_path.exists() {
        Config::default().save(cairn_dir)?;
    }
    let config = Config::load(cairn_dir)?;

    fs::create_dir_all(&config.issues_dir)?;

    let workflow_path = Path::new(&config.workflow_file);
    if !workflow_path.exists() {
        if let Some(parent) = workflow_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(workflow_path, Workflow::fallback_dsl())?;
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "status": "ok",
                "action": "init",
                "issues_dir": config.issues_dir,
                "workflow_file": config.workflow_file,
            }))?
        );
    } else {
        println!("✓ Cairn repository initialized at {}/", CAIRN_DIR);
        println!("  - Created {}", config.issues_dir);
        println!("  - Created {}", config.workflow_file);
        println!("  - Created {}/config.toml", CAIRN_DIR);
    }

    Ok(())
}
