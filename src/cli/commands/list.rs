//! list command - Show registered repositories

use crate::engine::Context;
use crate::ui::output;
use crate::ui::table::list_table;
use anyhow::Result;

use super::{load_config, open_registry};

/// List registered repositories with their display IDs.
pub fn list(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;
    let registry = open_registry(ctx, &config)?;
    let verbosity = ctx.verbosity();
    let color = output::color_enabled(ctx.no_color, config.color());

    if registry.is_empty() {
        output::print(
            "No repositories registered. Add one with `statrepos add <DIR>`.",
            verbosity,
        );
        return Ok(());
    }

    output::print(output::format_heading("Registered Repositories", color), verbosity);
    println!("{}", list_table(registry.list()).render(color));
    output::verbose(format!("registry: {}", registry.path().display()), verbosity);

    Ok(())
}
