//! vcs::matcher
//!
//! Turn raw status output into a verdict.
//!
//! # Design
//!
//! Status output is treated as opaque text: the only thing extracted is the
//! presence or absence of known phrases. Matching is literal substring
//! matching and therefore sensitive to VCS version and locale, so it lives
//! behind [`StatusMatcher`] and can be swapped without touching the probe.

use std::fmt;

/// What a matcher concluded from a block of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No uncommitted changes.
    Clean,
    /// Known change markers were found.
    Dirty,
    /// Output is present but carries no known marker.
    Unrecognized,
}

/// Classifies the stdout of a status command.
pub trait StatusMatcher: Send + Sync + fmt::Debug {
    fn classify(&self, output: &str) -> Verdict;
}

/// `git status` phrases meaning the working tree is clean.
///
/// Older Git releases used the parenthesised form.
pub const GIT_CLEAN_MARKERS: &[&str] = &[
    "nothing to commit, working tree clean",
    "nothing to commit (working directory clean)",
    "nothing to commit, working directory clean",
];

/// `fossil changes` markers meaning files were changed.
pub const FOSSIL_DIRTY_MARKERS: &[&str] = &["EDITED", "DELETED", "MISSING"];

/// Matches `git status` output.
///
/// Clean when a clean marker is present, dirty otherwise.
#[derive(Debug, Clone)]
pub struct GitMatcher {
    clean_markers: Vec<String>,
}

impl GitMatcher {
    pub fn new<I, S>(clean_markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            clean_markers: clean_markers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for GitMatcher {
    fn default() -> Self {
        Self::new(GIT_CLEAN_MARKERS.iter().copied())
    }
}

impl StatusMatcher for GitMatcher {
    fn classify(&self, output: &str) -> Verdict {
        if self
            .clean_markers
            .iter()
            .any(|marker| output.contains(marker.as_str()))
        {
            Verdict::Clean
        } else {
            Verdict::Dirty
        }
    }
}

/// Matches `fossil changes` output.
///
/// Fossil prints nothing for a clean checkout and one line per changed file
/// otherwise.
#[derive(Debug, Clone)]
pub struct FossilMatcher {
    dirty_markers: Vec<String>,
}

impl FossilMatcher {
    pub fn new<I, S>(dirty_markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dirty_markers: dirty_markers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for FossilMatcher {
    fn default() -> Self {
        Self::new(FOSSIL_DIRTY_MARKERS.iter().copied())
    }
}

impl StatusMatcher for FossilMatcher {
    fn classify(&self, output: &str) -> Verdict {
        if output.trim().is_empty() {
            Verdict::Clean
        } else if self
            .dirty_markers
            .iter()
            .any(|marker| output.contains(marker.as_str()))
        {
            Verdict::Dirty
        } else {
            Verdict::Unrecognized
        }
    }
}
