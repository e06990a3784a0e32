//! CLI entry point for sybilcut.
//!
//! Parses command-line arguments with clap, partitions both graphs, renders
//! the summary to stdout and maps failures to a non-zero exit code. Logging is
//! initialised eagerly so subsequent operations can emit structured
//! diagnostics via `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use sybilcut_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Parse CLI arguments, run both graphs, render the summary, and flush the
/// output stream. Returns whether every graph run succeeded.
fn try_main() -> Result<bool> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(summary.all_succeeded())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match try_main() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            error!("one or more graph runs failed");
            ExitCode::FAILURE
        }
        Err(err) => {
            let code = err
                .downcast_ref::<CliError>()
                .and_then(CliError::code)
                .map(field::display);
            error!(error = %err, code, "command execution failed");
            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
