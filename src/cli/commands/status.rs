//! status command - Check every registered repository
//!
//! # Output
//!
//! ```text
//! Fetching status of each registered repository
//!
//! ┌────┬────────┬─────────┬─────────────────┐
//! │ ID │ Status │ Kind    │ Path            │
//! ├────┼────────┼─────────┼─────────────────┤
//! │ 0  │ CLEAN  │ git     │ /home/me/app    │
//! │ 1  │ DIRTY  │ fossil  │ /home/me/site   │
//! │ 2  │ ERROR  │ unknown │ /home/me/notes  │
//! └────┴────────┴─────────┴─────────────────┘
//! 3 repositories: 1 clean, 1 dirty, 1 error
//! ```
//!
//! With `--detailed`, the raw VCS output of each dirty or failing
//! repository follows the table. With `--verbose`, failure reasons are
//! shown even without `--detailed`.

use crate::core::types::RepoState;
use crate::engine::{self, Context, StatusReport};
use crate::ui::output::{self, Verbosity};
use crate::ui::table::status_table;
use anyhow::{Context as _, Result};

use super::{load_config, open_registry};

/// Run the status command.
///
/// Row states never affect the exit code; only failing to load the
/// settings or registry does.
pub fn status(ctx: &Context, detailed: bool, json: bool) -> Result<()> {
    let config = load_config(ctx)?;
    let registry = open_registry(ctx, &config)?;
    let verbosity = ctx.verbosity();
    let color = output::color_enabled(ctx.no_color, config.color());

    if registry.is_empty() && !json {
        output::print(
            "No repositories registered. Add one with `statrepos add <DIR>`.",
            verbosity,
        );
        return Ok(());
    }

    if !json {
        output::print("", verbosity);
        output::print(
            output::format_heading("Fetching status of each registered repository", color),
            verbosity,
        );
        output::print("", verbosity);
    }

    let aggregator = engine::aggregator_from_config(&config);
    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let report = rt.block_on(aggregator.run_all(registry.list(), detailed));

    if json {
        println!("{}", serde_json::to_string_pretty(&report.results)?);
        return Ok(());
    }

    println!("{}", status_table(&report).render(color));
    output::print(report.summary(), verbosity);
    print_details(&report, detailed, verbosity, color);

    Ok(())
}

/// Print the retained output of dirty and failing repositories.
fn print_details(report: &StatusReport, detailed: bool, verbosity: Verbosity, color: bool) {
    for (id, result) in report.results.iter().enumerate() {
        let show = match result.state {
            RepoState::Clean => false,
            RepoState::Dirty => detailed,
            RepoState::Error => detailed || verbosity.is_verbose(),
        };
        let Some(detail) = result.detail.as_deref().filter(|_| show) else {
            continue;
        };

        println!();
        println!(
            "[{}] {} {}",
            id,
            output::format_state(result.state, color),
            result.path
        );
        println!("{}", output::indent(detail.trim_end(), "    "));
    }
}
