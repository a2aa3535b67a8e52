//! Submission command executor.
//!
//! Runs the configured submission command with inherited stdio and reports
//! its exit status. No timeout: the command's own semantics decide when it
//! returns.

use crate::error::{Result, SetupError};
use std::process::Command;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of running the submission command.
#[derive(Debug, Clone)]
pub struct SubmissionResult {
    /// Exit code of the process (None if terminated by a signal).
    pub exit_code: Option<i32>,
    /// The full command line that was executed (for logging).
    pub command: String,
    pub duration: Duration,
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Split `command` with shell-words and append `args`.
///
/// # Errors
///
/// `SetupError::SubmissionError` when the command cannot be parsed or is empty.
pub fn parse_command(command: &str, args: &[String]) -> Result<Vec<String>> {
    let mut argv = shell_words::split(command).map_err(|e| {
        SetupError::SubmissionError(format!(
            "failed to parse submission command '{}': {}\n\
             Fix: check for unmatched quotes or invalid escape sequences.",
            command, e
        ))
    })?;

    if argv.is_empty() {
        return Err(SetupError::SubmissionError(format!(
            "submission command is empty after parsing: '{}'",
            command
        )));
    }

    argv.extend(args.iter().cloned());
    Ok(argv)
}

/// Run `command` (shell-words parsed) with `args` appended.
///
/// A non-zero exit is reported in the result, not as an error.
pub fn submit(command: &str, args: &[String]) -> Result<SubmissionResult> {
    let argv = parse_command(command, args)?;
    let command_line = shell_words::join(&argv);
    let program = &argv[0];

    debug!(command = %command_line, "launching submission");

    let start_time = Instant::now();
    let status = Command::new(program)
        .args(&argv[1..])
        .status()
        .map_err(|e| {
            SetupError::SubmissionError(format!(
                "failed to execute '{}': {}\n\
                 Fix: ensure the command is installed and in PATH.",
                program, e
            ))
        })?;
    let duration = start_time.elapsed();

    info!(
        exit_code = ?status.code(),
        elapsed_ms = duration.as_millis() as u64,
        "submission finished"
    );

    Ok(SubmissionResult {
        exit_code: status.code(),
        command: command_line,
        duration,
    })
}
