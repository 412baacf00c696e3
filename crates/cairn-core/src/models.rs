// Rust guideline compliant 2026-07-28

//! Core data models for Cairn.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Cosmetic or minor annoyance.
    Low,
    /// Default severity for new issues.
    #[default]
    Medium,
    /// Significant loss of functionality.
    High,
    /// Data loss, security, or total breakage.
    Critical,
}

impl std::str::FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(Error::Parse(format!(
                "Unknown severity '{}': expected low, medium, high, or critical",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// An issue record, persisted as one `issue.yaml` per issue directory.
///
/// The metadata file holds the inline `body` field; there is no separate
/// body file. `status` is a free-form string validated against the active
/// workflow where a transition is requested, and preserved verbatim when
/// unrecognized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique 7-character lowercase base36 identifier. Never changes.
    pub id: String,
    /// One-line summary; its slug names the issue directory.
    pub title: String,
    /// Creation timestamp; also selects the storage shard.
    pub created: DateTime<Utc>,
    /// Current workflow state name.
    pub status: String,
    #[serde(default)]
    pub severity: Severity,
    /// Assigned username, or empty when unassigned.
    #[serde(default)]
    pub assignee: String,
    pub author: String,
    /// Ordered set of labels; duplicates are rejected by validation.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Markdown body, inline in the metadata file.
    #[serde(default)]
    pub body: String,
}

impl Issue {
    /// Creates a new issue with the given identity fields and defaults.
    pub fn new(id: String, title: String, author: String, status: String) -> Self {
        Self {
            id,
            title,
            created: Utc::now(),
            status,
            severity: Severity::default(),
            assignee: String::new(),
            author,
            labels: Vec::new(),
            body: String::new(),
        }
    }

    /// Validates the issue data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Title is empty
    /// - ID format is invalid
    /// - Labels contain duplicates
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Parse("Issue title cannot be empty".to_string()));
        }

        crate::ids::validate_id_format(&self.id)?;

        for (pos, label) in self.labels.iter().enumerate() {
            if self.labels[..pos].contains(label) {
                return Err(Error::Parse(format!("Duplicate label '{}'", label)));
            }
        }

        Ok(())
    }

    /// Returns the directory name for this issue: `<slug-of-title>-<id>`.
    pub fn dir_name(&self) -> String {
        format!("{}-{}", slugify(&self.title), self.id)
    }
}

/// A comment record, persisted as one `comment-<slug>-<id>.yaml` file
/// inside (or nested below) its issue's directory. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Identifier drawn from the same namespace as issue ids.
    pub id: String,
    pub author: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub body: String,
    /// Parent comment id; absent for a root comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// Idempotency key for importers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Raw on-disk comment shape. Older records wrote the timestamp under
/// `created`; the single normalization pass below folds it into `date`.
#[derive(Debug, Deserialize)]
struct CommentRecord {
    id: String,
    author: String,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
    #[serde(default)]
    created: Option<DateTime<Utc>>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    reply_to: Option<String>,
    #[serde(default)]
    external_id: Option<String>,
}

impl Comment {
    /// Parses a comment file, normalizing the legacy `created` field into
    /// `date`. When both are present `date` wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML or carries neither
    /// `date` nor `created`.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let raw: CommentRecord = serde_yaml::from_str(text)?;
        let date = raw.date.or(raw.created).ok_or_else(|| {
            Error::Parse(format!("Comment '{}' has neither date nor created", raw.id))
        })?;

        Ok(Self {
            id: raw.id,
            author: raw.author,
            date,
            body: raw.body,
            reply_to: raw.reply_to,
            external_id: raw.external_id,
        })
    }
}

/// Derives a filesystem-safe slug from a title or a comment's first line.
///
/// Lowercases, collapses every non-alphanumeric run into a single hyphen,
/// and strips leading/trailing hyphens. Empty input slugs to `untitled`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}
