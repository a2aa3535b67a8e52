//! dsub-e2e: environment bootstrap for dsub end-to-end tests.
//!
//! This is the main entry point for the `dsub-e2e` CLI. It parses arguments,
//! sets up logging, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

mod cli;
pub mod cloud;
mod commands;
pub mod config;
pub mod dsub;
pub mod environment;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
pub mod preflight;
pub mod taskfile;
pub mod template;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    match commands::dispatch(cli) {
        Ok(code) => ExitCode::from(clamp_exit_code(code)),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Log to stderr so `env` output stays eval-able.
///
/// `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Exit codes outside `0..=255` cannot be passed through unchanged.
fn clamp_exit_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(exit_codes::SUBMISSION_FAILURE as u8)
}
