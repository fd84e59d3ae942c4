//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag. Status
//! labels are colored only when stdout is a terminal, unless overridden.

use std::fmt::Display;
use std::io::IsTerminal;

use owo_colors::{OwoColorize, Style};

use crate::core::types::RepoState;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Verbose mode - success confirmations and error reasons
    Verbose,
    /// Debug mode - verbose output plus diagnostics
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags. Quiet wins over everything else.
    pub fn from_flags(quiet: bool, verbose: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    pub fn is_verbose(self) -> bool {
        self >= Verbosity::Verbose
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a message only in verbose or debug mode.
pub fn verbose(message: impl Display, verbosity: Verbosity) {
    if verbosity.is_verbose() {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Decide whether to emit ANSI colors.
///
/// `--no-color` and a non-empty `NO_COLOR` always disable colors; otherwise
/// an explicit setting wins, and finally stdout must be a terminal.
pub fn color_enabled(no_color_flag: bool, setting: Option<bool>) -> bool {
    let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    if no_color_flag || no_color_env {
        return false;
    }
    setting.unwrap_or_else(|| std::io::stdout().is_terminal())
}

/// Style for a status label.
pub fn state_style(state: RepoState) -> Style {
    match state {
        RepoState::Clean => Style::new().magenta().bold(),
        RepoState::Dirty => Style::new().red().bold(),
        RepoState::Error => Style::new().yellow().bold(),
    }
}

/// Status label, colored when `color` is set.
pub fn format_state(state: RepoState, color: bool) -> String {
    if color {
        state.as_str().style(state_style(state)).to_string()
    } else {
        state.as_str().to_string()
    }
}

/// Section heading, colored when `color` is set.
pub fn format_heading(text: &str, color: bool) -> String {
    if color {
        text.cyan().bold().to_string()
    } else {
        text.to_string()
    }
}

/// Indent every line of `text` by `prefix`.
pub fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}
