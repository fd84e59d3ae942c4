//! remove command - Stop monitoring a directory

use std::path::Path;

use crate::core::paths::absolutize;
use crate::core::registry::RegistryError;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

use super::{load_config, open_registry};

/// Unregister `dir`.
///
/// The path is matched exactly as given first, then in its absolute form,
/// so both `statrepos remove ~/src/app` and `statrepos remove .` work.
pub fn remove(ctx: &Context, dir: &Path) -> Result<()> {
    let verbosity = ctx.verbosity();
    let config = load_config(ctx)?;
    let mut registry = open_registry(ctx, &config)?;

    let given = dir.to_string_lossy().into_owned();
    let candidate = if registry.contains(&given) {
        given
    } else {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let absolute = absolutize(dir, &cwd).to_string_lossy().into_owned();
        if registry.contains(&absolute) {
            absolute
        } else {
            return Err(RegistryError::NotRegistered(given).into());
        }
    };

    output::print(format!("[REMOVE] {}", candidate), verbosity);
    registry.remove(&candidate)?;
    output::verbose(format!("[REMOVE:SUCCESS] {}", candidate), verbosity);

    Ok(())
}
