//! statrepos binary entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match statrepos::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            statrepos::ui::output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
