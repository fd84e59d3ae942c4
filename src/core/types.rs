//! core::types
//!
//! Domain types shared by the registry, the probes, and the report.
//!
//! # Types
//!
//! - [`RepositoryEntry`] - A registered repository path
//! - [`RepoKind`] - Version-control system managing a path (derived, never stored)
//! - [`RepoState`] - Normalized clean/dirty/error state
//! - [`StatusResult`] - Outcome of probing a single repository
//!
//! # Examples
//!
//! ```
//! use statrepos::core::types::{RepoKind, RepoState, StatusResult};
//!
//! let result = StatusResult::error("/tmp/nowhere", RepoKind::Unknown, "not a recognized repository");
//! assert_eq!(result.state, RepoState::Error);
//! assert_eq!(result.detail.as_deref(), Some("not a recognized repository"));
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A repository registered for monitoring.
///
/// Identity is the path string exactly as registered. Entries are created by
/// `add`, removed by `remove`, and never mutated in between.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryEntry {
    path: String,
}

impl RepositoryEntry {
    /// Create an entry for the given path string.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The registered path string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The registered path as a filesystem path.
    pub fn as_path(&self) -> &Path {
        Path::new(&self.path)
    }
}

impl fmt::Display for RepositoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Version-control system managing a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoKind {
    Git,
    Fossil,
    Unknown,
}

impl RepoKind {
    /// Lowercase display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoKind::Git => "git",
            RepoKind::Fossil => "fossil",
            RepoKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RepoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized working-copy state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RepoState {
    /// No uncommitted changes.
    Clean,
    /// Uncommitted changes of some kind.
    Dirty,
    /// The status could not be determined.
    Error,
}

impl RepoState {
    /// Uppercase display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoState::Clean => "CLEAN",
            RepoState::Dirty => "DIRTY",
            RepoState::Error => "ERROR",
        }
    }
}

impl fmt::Display for RepoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of probing one repository.
///
/// Built fresh for every probe and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResult {
    /// Registered path that was probed.
    pub path: String,
    /// Detected repository kind.
    pub kind: RepoKind,
    /// Normalized state.
    pub state: RepoState,
    /// Raw VCS output for dirty repositories (detailed runs only), or the
    /// failure reason for errors.
    pub detail: Option<String>,
}

impl StatusResult {
    /// A clean result.
    pub fn clean(path: impl Into<String>, kind: RepoKind) -> Self {
        Self {
            path: path.into(),
            kind,
            state: RepoState::Clean,
            detail: None,
        }
    }

    /// A dirty result, optionally carrying the raw VCS output.
    pub fn dirty(path: impl Into<String>, kind: RepoKind, detail: Option<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            state: RepoState::Dirty,
            detail,
        }
    }

    /// An error result with its reason.
    pub fn error(path: impl Into<String>, kind: RepoKind, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            state: RepoState::Error,
            detail: Some(reason.into()),
        }
    }
}
