//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads settings and opens the registry it operates on
//! 2. Performs the operation (registry mutation or engine run)
//! 3. Formats and displays output
//!
//! The registry is an explicit value opened per invocation; nothing is
//! held in process-wide state.
//!
//! # Async Commands
//!
//! `status` runs its probes on a tokio runtime created for the duration of
//! the command. Everything else is synchronous.

mod add;
mod completion;
mod config_cmd;
mod list;
mod remove;
mod status;

// Re-export command functions for testing and direct invocation
pub use add::add;
pub use completion::completion;
pub use config_cmd::show as config_show;
pub use list::list;
pub use remove::remove;
pub use status::status;

use crate::cli::args::Command;
use crate::core::config::Config;
use crate::core::registry::RepoRegistry;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Status { detailed, json } => status::status(ctx, detailed, json),
        Command::List => list::list(ctx),
        Command::Add { dir } => add::add(ctx, &dir),
        Command::Remove { dir } => remove::remove(ctx, &dir),
        Command::Config => config_cmd::show(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Load settings from the default locations, reporting any warnings.
pub(crate) fn load_config(ctx: &Context) -> Result<Config> {
    let result = Config::load().context("Failed to load settings")?;
    for warning in &result.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            ctx.verbosity(),
        );
    }
    Ok(result.config)
}

/// Open the registry selected by `ctx` and `config`.
///
/// A registry that did not exist yet is created empty, with a notice.
pub(crate) fn open_registry(ctx: &Context, config: &Config) -> Result<RepoRegistry> {
    let path = config
        .registry_path(ctx.registry.as_deref())
        .context("Failed to locate registry")?;
    let registry = RepoRegistry::open(&path)?;

    if registry.was_created() {
        let verbosity = ctx.verbosity();
        output::warn(
            format!(
                "configuration did not exist; created empty registry at {}",
                path.display()
            ),
            verbosity,
        );
        output::verbose("Successfully wrote configuration.", verbosity);
    }

    Ok(registry)
}
