//! core::registry
//!
//! The persisted, ordered set of monitored repository paths.
//!
//! # File Format
//!
//! ```json
//! {"repos":["/home/me/src/app","/home/me/src/site"]}
//! ```
//!
//! # Invariants
//!
//! - Paths are unique (compared as strings, exactly as registered)
//! - The in-memory list always matches the file on disk: a failed write
//!   rolls back the mutation that caused it
//! - Writes are atomic (write to temp file, then rename)
//!
//! # Example
//!
//! ```no_run
//! use statrepos::core::registry::RepoRegistry;
//! use std::path::Path;
//!
//! let mut registry = RepoRegistry::open(Path::new("/tmp/statrepos.json")).unwrap();
//! registry.add("/home/me/src/app").unwrap();
//! for entry in registry.list() {
//!     println!("{}", entry);
//! }
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::RepositoryEntry;

/// Errors from registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The directory to add does not exist.
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    /// The path is already registered.
    #[error("{0} is already being monitored")]
    DuplicateEntry(String),

    /// The path to remove is not registered.
    #[error("{0} is not a registered repository")]
    NotRegistered(String),

    #[error("failed to read registry '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse registry '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    /// Writing the registry back to disk failed.
    #[error("failed to write registry '{path}': {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// On-disk representation.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    repos: Vec<RepositoryEntry>,
}

/// Registry of monitored repositories backed by a JSON file.
#[derive(Debug)]
pub struct RepoRegistry {
    path: PathBuf,
    repos: Vec<RepositoryEntry>,
    created: bool,
}

impl RepoRegistry {
    /// Open the registry at `path`, creating an empty one if the file does
    /// not exist yet.
    ///
    /// # Errors
    ///
    /// Fails if an existing file cannot be read or parsed, or if a new
    /// empty file cannot be written.
    pub fn open(path: &Path) -> Result<Self, RegistryError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "registry missing, creating empty one");
            let registry = Self {
                path: path.to_path_buf(),
                repos: Vec::new(),
                created: true,
            };
            registry.persist()?;
            return Ok(registry);
        }

        let contents = fs::read_to_string(path).map_err(|e| RegistryError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: RegistryFile = if contents.trim().is_empty() {
            RegistryFile::default()
        } else {
            serde_json::from_str(&contents).map_err(|e| RegistryError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        Ok(Self {
            path: path.to_path_buf(),
            repos: file.repos,
            created: false,
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `open` had to create the backing file.
    pub fn was_created(&self) -> bool {
        self.created
    }

    /// Registered entries in registration order.
    pub fn list(&self) -> &[RepositoryEntry] {
        &self.repos
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Whether `path` is registered.
    pub fn contains(&self, path: &str) -> bool {
        self.position(path).is_some()
    }

    fn position(&self, path: &str) -> Option<usize> {
        self.repos.iter().position(|entry| entry.path() == path)
    }

    /// Register `path` and persist.
    ///
    /// # Errors
    ///
    /// - `DuplicateEntry` if `path` is already registered
    /// - `PathNotFound` if `path` does not exist on disk
    /// - `Persist` if the registry could not be written; the entry is not
    ///   added in that case
    pub fn add(&mut self, path: &str) -> Result<(), RegistryError> {
        if self.contains(path) {
            return Err(RegistryError::DuplicateEntry(path.to_string()));
        }
        if !Path::new(path).exists() {
            return Err(RegistryError::PathNotFound(path.to_string()));
        }

        self.repos.push(RepositoryEntry::new(path));
        if let Err(e) = self.persist() {
            self.repos.pop();
            return Err(e);
        }

        tracing::debug!(path, "registered repository");
        Ok(())
    }

    /// Unregister `path` and persist.
    ///
    /// # Errors
    ///
    /// - `NotRegistered` if `path` is not registered
    /// - `Persist` if the registry could not be written; the entry is
    ///   restored in that case
    pub fn remove(&mut self, path: &str) -> Result<RepositoryEntry, RegistryError> {
        let index = self
            .position(path)
            .ok_or_else(|| RegistryError::NotRegistered(path.to_string()))?;

        let removed = self.repos.remove(index);
        if let Err(e) = self.persist() {
            self.repos.insert(index, removed);
            return Err(e);
        }

        tracing::debug!(path, "unregistered repository");
        Ok(removed)
    }

    /// Write the registry atomically.
    fn persist(&self) -> Result<(), RegistryError> {
        let persist_err = |path: &Path, source: std::io::Error| RegistryError::Persist {
            path: path.to_path_buf(),
            source,
        };

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| persist_err(&self.path, e))?;
        }

        let file = RegistryFile {
            repos: self.repos.clone(),
        };
        let contents = serde_json::to_string(&file)
            .map_err(|e| persist_err(&self.path, std::io::Error::other(e)))?;

        // Write to temp file in same directory (for atomic rename)
        let temp_path = self.path.with_extension("json.tmp");
        let written = Self::write_temp(&temp_path, contents.as_bytes())
            .map_err(|e| persist_err(&temp_path, e))
            .and_then(|()| {
                fs::rename(&temp_path, &self.path).map_err(|e| persist_err(&self.path, e))
            });

        if written.is_err() {
            // Best effort; the original error is what gets reported.
            if fs::remove_file(&temp_path).is_ok() {
                tracing::debug!(path = %temp_path.display(), "removed stale temp file");
            }
        }
        written
    }

    fn write_temp(temp_path: &Path, contents: &[u8]) -> std::io::Result<()> {
        let mut temp = fs::File::create(temp_path)?;
        temp.write_all(contents)?;
        temp.sync_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn registry_in(temp: &TempDir) -> RepoRegistry {
        RepoRegistry::open(&temp.path().join("statrepos.json")).unwrap()
    }

    fn make_dir(temp: &TempDir, name: &str) -> String {
        let dir = temp.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        dir.to_string_lossy().into_owned()
    }

    #[test]
    fn open_creates_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/statrepos.json");

        let registry = RepoRegistry::open(&path).unwrap();

        assert!(registry.was_created());
        assert!(registry.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"repos":[]}"#);
    }

    #[test]
    fn open_reads_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("statrepos.json");
        fs::write(&path, r#"{"repos":["/a","/b"]}"#).unwrap();

        let registry = RepoRegistry::open(&path).unwrap();

        assert!(!registry.was_created());
        let paths: Vec<&str> = registry.list().iter().map(|e| e.path()).collect();
        assert_eq!(paths, vec!["/a", "/b"]);
    }

    #[test]
    fn open_tolerates_missing_repos_key() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("statrepos.json");
        fs::write(&path, "{}").unwrap();

        assert!(RepoRegistry::open(&path).unwrap().is_empty());
    }

    #[test]
    fn open_rejects_garbage() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("statrepos.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            RepoRegistry::open(&path),
            Err(RegistryError::ParseError { .. })
        ));
    }

    #[test]
    fn add_then_list_contains_once() {
        let temp = TempDir::new().unwrap();
        let repo = make_dir(&temp, "repoA");
        let mut registry = registry_in(&temp);

        registry.add(&repo).unwrap();

        assert_eq!(registry.list().iter().filter(|e| e.path() == repo).count(), 1);

        // Persisted
        let reopened = registry_in(&temp);
        assert_eq!(reopened.list(), registry.list());
    }

    #[test]
    fn add_twice_is_duplicate() {
        let temp = TempDir::new().unwrap();
        let repo = make_dir(&temp, "repoA");
        let mut registry = registry_in(&temp);

        registry.add(&repo).unwrap();
        let err = registry.add(&repo).unwrap_err();

        assert!(matches!(err, RegistryError::DuplicateEntry(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn add_missing_path_fails() {
        let temp = TempDir::new().unwrap();
        let mut registry = registry_in(&temp);
        let missing = temp.path().join("missing").to_string_lossy().into_owned();

        let err = registry.add(&missing).unwrap_err();

        assert!(matches!(err, RegistryError::PathNotFound(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn add_preserves_order() {
        let temp = TempDir::new().unwrap();
        let a = make_dir(&temp, "a");
        let b = make_dir(&temp, "b");
        let c = make_dir(&temp, "c");
        let mut registry = registry_in(&temp);

        for repo in [&b, &a, &c] {
            registry.add(repo).unwrap();
        }

        let paths: Vec<&str> = registry.list().iter().map(|e| e.path()).collect();
        assert_eq!(paths, vec![b.as_str(), a.as_str(), c.as_str()]);
    }

    #[test]
    fn remove_registered() {
        let temp = TempDir::new().unwrap();
        let a = make_dir(&temp, "a");
        let b = make_dir(&temp, "b");
        let mut registry = registry_in(&temp);
        registry.add(&a).unwrap();
        registry.add(&b).unwrap();

        let removed = registry.remove(&a).unwrap();

        assert_eq!(removed.path(), a);
        assert!(!registry.contains(&a));
        assert!(!registry_in(&temp).contains(&a));
        assert!(registry_in(&temp).contains(&b));
    }

    #[test]
    fn remove_unregistered_fails_without_change() {
        let temp = TempDir::new().unwrap();
        let a = make_dir(&temp, "a");
        let mut registry = registry_in(&temp);
        registry.add(&a).unwrap();

        let err = registry.remove("/not/here").unwrap_err();

        assert!(matches!(err, RegistryError::NotRegistered(_)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry_in(&temp).len(), 1);
    }

    /// Block the temp file by putting a directory where it would be created.
    fn block_temp_file(registry: &RepoRegistry) {
        fs::create_dir_all(registry.path().with_extension("json.tmp")).unwrap();
    }

    fn stored(temp: &TempDir) -> Vec<String> {
        registry_in(temp)
            .list()
            .iter()
            .map(|e| e.path().to_string())
            .collect()
    }

    #[test]
    fn failed_add_rolls_back() {
        let temp = TempDir::new().unwrap();
        let repo = make_dir(&temp, "repoA");
        let mut registry = registry_in(&temp);
        block_temp_file(&registry);

        let err = registry.add(&repo).unwrap_err();

        assert!(matches!(err, RegistryError::Persist { .. }));
        assert!(registry.is_empty());
        assert!(stored(&temp).is_empty());
    }

    #[test]
    fn failed_remove_restores_entry_in_place() {
        let temp = TempDir::new().unwrap();
        let a = make_dir(&temp, "a");
        let b = make_dir(&temp, "b");
        let c = make_dir(&temp, "c");
        let mut registry = registry_in(&temp);
        for repo in [&a, &b, &c] {
            registry.add(repo).unwrap();
        }
        block_temp_file(&registry);

        let err = registry.remove(&b).unwrap_err();

        assert!(matches!(err, RegistryError::Persist { .. }));
        let paths: Vec<&str> = registry.list().iter().map(|e| e.path()).collect();
        assert_eq!(paths, vec![a.as_str(), b.as_str(), c.as_str()]);
        assert_eq!(stored(&temp), vec![a, b, c]);
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let temp = TempDir::new().unwrap();
        let repo = make_dir(&temp, "repoA");
        let mut registry = registry_in(&temp);

        // A directory at the registry path makes the final rename fail.
        fs::remove_file(registry.path()).unwrap();
        fs::create_dir(registry.path()).unwrap();

        let err = registry.add(&repo).unwrap_err();

        assert!(matches!(err, RegistryError::Persist { .. }));
        assert!(registry.is_empty());
        assert!(!registry.path().with_extension("json.tmp").exists());
    }
}
