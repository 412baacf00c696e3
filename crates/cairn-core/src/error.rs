// Rust guideline compliant 2026-07-28

//! Error types for the Cairn core library.

use thiserror::Error;

/// Result type alias for Cairn operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Cairn operations.
///
/// Storage-integrity failures (`Collision`, write-side `Io`) are always
/// propagated. Read-side failures (`Parse`, `Yaml`) are recovered locally
/// by scan code, and VCS failures degrade to neutral results before they
/// ever reach a caller.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// No directory or file matches the requested id.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Target storage path already exists. Never overwritten.
    #[error("Storage collision: {0}")]
    Collision(String),

    /// Malformed record or workflow text.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Version-control client missing or failing.
    #[error("VCS error: {0}")]
    Vcs(String),
}
