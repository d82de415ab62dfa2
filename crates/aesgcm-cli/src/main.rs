//! `aesgcm` — command-line entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`config::Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Run the requested subcommand over stdin, writing the result to stdout.

mod command;
mod config;
mod telemetry;

use std::io::{Read, Write};
use std::process::ExitCode;

use aesgcm::AeadError;
use anyhow::{Context, Result};
use tracing::error;

use command::{Command, USAGE};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "aesgcm failed");
            eprintln!("ERROR: {e:#}");
            let code = e.downcast_ref::<AeadError>().map_or(1, AeadError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: aesgcm configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 3. Command
    // -----------------------------------------------------------------------
    let cmd: Command = std::env::args()
        .nth(1)
        .context(USAGE)?
        .parse()?;

    let mut input = Vec::new();
    if cmd.reads_input() {
        std::io::stdin()
            .read_to_end(&mut input)
            .context("failed to read stdin")?;
    }

    let output = cmd.execute(&cfg, &input)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&output).context("failed to write stdout")?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(())
}
