//! add command - Register a directory for monitoring

use std::path::Path;

use crate::core::paths::absolutize;
use crate::core::types::RepoKind;
use crate::engine::Context;
use crate::ui::output;
use crate::vcs::classify;
use anyhow::{anyhow, Context as _, Result};

use super::{load_config, open_registry};

/// Register `dir`.
///
/// Relative paths are resolved against the current directory so the
/// registry only ever holds absolute paths.
///
/// # Errors
///
/// Fails if the directory does not exist, is already registered, or the
/// registry cannot be written.
pub fn add(ctx: &Context, dir: &Path) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let path = absolutize(dir, &cwd);
    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow!("path is not valid UTF-8: {}", path.display()))?;
    let verbosity = ctx.verbosity();

    let config = load_config(ctx)?;
    let mut registry = open_registry(ctx, &config)?;

    output::print(format!("[ADD] {}", path_str), verbosity);
    registry.add(path_str)?;

    let kind = classify(&path);
    output::verbose(format!("[ADD:SUCCESS] {} ({})", path_str, kind), verbosity);
    if kind == RepoKind::Unknown {
        output::warn(
            format!(
                "{} has no .git or .fslckout marker; it will report ERROR until it does",
                path_str
            ),
            verbosity,
        );
    }

    Ok(())
}
