//! vcs::detect
//!
//! Classify a directory by the version-control marker it contains.
//!
//! Detection is purely structural: the marker only has to exist. Whether
//! the directory is a usable repository is discovered later, when the
//! status command runs.

use std::path::Path;

use crate::core::paths::{marker_path, FOSSIL_MARKER, GIT_MARKER};
use crate::core::types::RepoKind;

/// Classify `path` as Git, Fossil, or unknown.
///
/// Git is checked first, so a directory carrying both markers is Git.
/// Never fails: a nonexistent path, or one whose metadata cannot be read,
/// is reported as [`RepoKind::Unknown`].
///
/// # Example
///
/// ```
/// use statrepos::core::types::RepoKind;
/// use statrepos::vcs::classify;
/// use std::path::Path;
///
/// assert_eq!(classify(Path::new("/definitely/not/here")), RepoKind::Unknown);
/// ```
pub fn classify(path: &Path) -> RepoKind {
    if marker_exists(path, GIT_MARKER) {
        RepoKind::Git
    } else if marker_exists(path, FOSSIL_MARKER) {
        RepoKind::Fossil
    } else {
        RepoKind::Unknown
    }
}

fn marker_exists(path: &Path, marker: &str) -> bool {
    marker_path(path, marker).try_exists().unwrap_or(false)
}
