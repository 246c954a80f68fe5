use std::process::ExitCode;

use attendance_core::cli::{output, run_cli};

fn main() -> ExitCode {
    attendance_core::init();
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "attendance shell aborted");
            output::error(format!("Fatal: {err}"));
            ExitCode::FAILURE
        }
    }
}
