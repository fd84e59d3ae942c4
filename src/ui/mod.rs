//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware printing and status label styling
//! - [`table`] - Box-drawn report tables
//!
//! # Design
//!
//! The UI layer only presents results it is handed. It makes no decisions
//! about repository state.

pub mod output;
pub mod table;
