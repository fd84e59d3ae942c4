//! statrepos - Check the working-copy status of many repositories at once
//!
//! statrepos keeps a registry of local Git and Fossil checkouts and reports,
//! on demand, whether each one is clean, dirty, or could not be checked.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, dispatches handlers)
//! - [`engine`] - Concurrent status runs over the whole registry
//! - [`core`] - Domain types, the persisted registry, settings, paths
//! - [`vcs`] - Marker detection, process execution, output matching, probes
//! - [`ui`] - Output and table rendering
//!
//! # Correctness Invariants
//!
//! 1. A status run yields exactly one result per registered repository,
//!    in registration order
//! 2. One repository failing never prevents the others from being checked
//! 3. The registry on disk is only ever replaced atomically, and a failed
//!    write leaves the in-memory registry unchanged

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
pub mod vcs;
