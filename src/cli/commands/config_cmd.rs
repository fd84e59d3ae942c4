//! config command - Show the effective configuration

use crate::engine::Context;
use anyhow::{Context as _, Result};

use super::load_config;

/// Print every effective setting and where the settings came from.
pub fn show(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;
    let registry = config
        .registry_path(ctx.registry.as_deref())
        .context("Failed to locate registry")?;

    println!("# statrepos configuration");
    match config.loaded_from() {
        Some(path) => println!("settings = {}", path.display()),
        None => println!("settings = (defaults)"),
    }
    println!("registry = {}", registry.display());
    println!("git_binary = {}", config.git_binary());
    println!("fossil_binary = {}", config.fossil_binary());
    match config.probe_timeout() {
        Some(timeout) => println!("probe_timeout_secs = {}", timeout.as_secs()),
        None => println!("probe_timeout_secs = (none)"),
    }
    match config.max_concurrency() {
        Some(max) => println!("max_concurrency = {}", max),
        None => println!("max_concurrency = (unbounded)"),
    }
    match config.color() {
        Some(color) => println!("color = {}", color),
        None => println!("color = (auto)"),
    }

    Ok(())
}
