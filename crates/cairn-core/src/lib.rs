// Rust guideline compliant 2026-07-28

//! Cairn Core Library
//!
//! This crate provides the storage and indexing layer for the Cairn issue
//! tracking system:
//! - Data models (Issue, Comment, Severity)
//! - Collision-free identifier allocation
//! - Sharded document store (file-per-record YAML, year/month fan-out)
//! - Workflow engine (diagram DSL parsing, transition queries)
//! - Comment threading (reply-tree reconstruction)
//! - VCS interop (dirty state, history, content-at, diff)
//! - Error types and result handling

pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod store;
pub mod thread;
pub mod vcs;
pub mod workflow;

pub use config::{Config, OutputFormat};
pub use error::{Error, Result};
pub use ids::{validate_id_format, IdAllocator, ID_LEN};
pub use models::{slugify, Comment, Issue, Severity};
pub use store::{Store, ISSUE_FILE, SHARD_THRESHOLD};
pub use thread::{thread_comments, ThreadedComment};
pub use vcs::{is_dirty, GitVcs, Revision};
pub use workflow::{ClassStyle, StatusColor, Workflow};
