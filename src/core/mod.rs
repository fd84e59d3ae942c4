//! core
//!
//! Core domain types, the registry, and configuration.
//!
//! # Modules
//!
//! - [`types`] - RepositoryEntry, RepoKind, RepoState, StatusResult
//! - [`registry`] - The persisted list of monitored repositories
//! - [`config`] - Settings schema and loading
//! - [`paths`] - Centralized path routing and marker names
//!
//! # Design Principles
//!
//! - Repository kind is derived from the filesystem, never stored
//! - Registry mutations either fully persist or leave no trace

pub mod config;
pub mod paths;
pub mod registry;
pub mod types;
