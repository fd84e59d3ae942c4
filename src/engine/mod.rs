//! engine
//!
//! Runs status checks across the registry.
//!
//! # Architecture
//!
//! Command handlers build a [`StatusAggregator`] from the loaded
//! configuration and hand it the registry entries. The aggregator owns the
//! results for the duration of the run and returns them as a
//! [`StatusReport`] for the presentation layer.
//!
//! ```text
//! RepoRegistry -> StatusAggregator -> StatusProbe x N -> StatusReport -> table
//! ```

pub mod aggregator;

pub use aggregator::{StatusAggregator, StatusReport};

use std::path::PathBuf;

use crate::core::config::Config;
use crate::ui::output::Verbosity;
use crate::vcs::{ProcessRunner, StatusProbe};

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Registry file override (`--registry`).
    pub registry: Option<PathBuf>,
    /// More verbose output.
    pub verbose: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Debug logging enabled.
    pub debug: bool,
    /// Colors disabled (`--no-color`).
    pub no_color: bool,
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose, self.debug)
    }
}

/// Build the aggregator used by the `status` command.
pub fn aggregator_from_config(config: &Config) -> StatusAggregator<ProcessRunner> {
    StatusAggregator::new(StatusProbe::from_config(config))
        .with_max_concurrency(config.max_concurrency())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_from_context() {
        let ctx = Context {
            quiet: true,
            verbose: true,
            ..Default::default()
        };
        assert_eq!(ctx.verbosity(), Verbosity::Quiet);

        let ctx = Context {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(ctx.verbosity(), Verbosity::Verbose);

        assert_eq!(Context::default().verbosity(), Verbosity::Normal);
    }
}
