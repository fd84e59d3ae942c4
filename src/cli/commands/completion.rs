//! completion command - Print a shell completion script

use std::io::Write;

use crate::cli::args::{Cli, Shell};
use anyhow::{Context as _, Result};
use clap::CommandFactory;

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
        }
    }
}

/// Print the completion script for `shell` to stdout.
pub fn completion(shell: Shell) -> Result<()> {
    let stdout = std::io::stdout();
    write_completion(shell, &mut stdout.lock())
}

/// Write the completion script for `shell` to `out`.
fn write_completion(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(clap_complete::Shell::from(shell), &mut cmd, bin_name, out);
    out.flush().context("Failed to write completion script")
}
