//! vcs
//!
//! Everything that touches a version-control system.
//!
//! # Architecture
//!
//! This module is the only doorway to Git and Fossil. Nothing else starts
//! VCS processes or looks for marker files.
//!
//! - [`detect`] - Marker-file classification (Git / Fossil / unknown)
//! - [`runner`] - External process execution behind [`CommandRunner`]
//! - [`matcher`] - Output classification behind [`StatusMatcher`]
//! - [`probe`] - One repository in, one [`StatusResult`](crate::core::types::StatusResult) out
//! - [`mock`] - Scripted runner for tests
//!
//! # Invariants
//!
//! - Detection never fails; unreadable or missing paths are unknown
//! - A probe always yields a result, never an error
//! - Unknown repositories never start a process

pub mod detect;
pub mod matcher;
pub mod mock;
pub mod probe;
pub mod runner;

pub use detect::classify;
pub use matcher::{FossilMatcher, GitMatcher, StatusMatcher, Verdict};
pub use probe::{Backend, ProbeError, StatusProbe};
pub use runner::{CommandRunner, Invocation, ProcessOutput, ProcessRunner};
