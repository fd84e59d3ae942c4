//! cli
//!
//! Command-line interface layer for statrepos.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialise logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! [`commands`], which open the registry and hand it to the
//! [`crate::engine`] for status runs.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::engine;
use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.debug);

    let ctx = engine::Context {
        registry: cli.registry.clone(),
        verbose: cli.verbose,
        quiet: cli.quiet,
        debug: cli.debug,
        no_color: cli.no_color,
    };

    // Dispatch to command handler
    commands::dispatch(cli.command, &ctx)
}

/// Install the global tracing subscriber.
///
/// Respects `RUST_LOG`; `--debug` forces debug output for this crate.
/// Defaults to warnings only. Events go to stderr so they never mix with
/// the report on stdout.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("statrepos=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A second initialisation (e.g. in tests) is harmless; ignore it.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
