//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--registry <FILE>`: Use this registry file
//! - `--verbose` / `-v`: More verbose output
//! - `--quiet` / `-q`: Minimal output
//! - `--debug`: Enable debug logging
//! - `--no-color`: Never color status labels

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// statrepos - Check the status of many Git and Fossil repositories at once
#[derive(Parser, Debug)]
#[command(name = "statrepos")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Registry file to use instead of ~/statrepos.json
    #[arg(long, global = true, value_name = "FILE")]
    pub registry: Option<PathBuf>,

    /// More verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check the status of every registered repository
    #[command(
        name = "status",
        visible_alias = "st",
        long_about = "Check the status of every registered repository.\n\n\
            Runs `git status` or `fossil changes` in each registered directory \
            concurrently and reports CLEAN, DIRTY, or ERROR for each one, in \
            registration order. A repository that cannot be checked is shown \
            as ERROR; it never stops the others from being checked.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Quick overview
    statrepos status

    # Show what is uncommitted in each dirty repository
    statrepos status --detailed

    # Show why a repository reported ERROR
    statrepos -v status

    # Machine-readable output
    statrepos status --json"
    )]
    Status {
        /// Print the VCS output for dirty and failing repositories
        #[arg(short, long)]
        detailed: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List registered repositories
    #[command(name = "list", visible_alias = "ls")]
    List,

    /// Register a directory to be monitored
    #[command(
        name = "add",
        visible_alias = "a",
        after_help = "\
WORKFLOW EXAMPLES:
    # Register the current directory
    statrepos add .

    # Register another checkout
    statrepos add ~/src/website"
    )]
    Add {
        /// Directory to register (relative paths are resolved against the current directory)
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Stop monitoring a directory
    #[command(name = "remove", visible_alias = "rm")]
    Remove {
        /// Directory to unregister, as shown by `statrepos list`
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Show the effective configuration
    #[command(name = "config")]
    Config,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for statrepos commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    statrepos completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    statrepos completion zsh >> ~/.zshrc

    # Fish
    statrepos completion fish > ~/.config/fish/completions/statrepos.fish

    # PowerShell
    statrepos completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
