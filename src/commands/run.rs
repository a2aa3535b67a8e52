//! Implementation of the `dsub-e2e run` command.
//!
//! Derives the test environment (without remote checks; those belong to
//! `setup`) and submits a job with the provider's required arguments.

use super::{record_event, resolve_environment};
use crate::cli::RunArgs;
use crate::cloud::GcloudCli;
use crate::config::Config;
use crate::dsub::{run_dsub, submission_argv};
use crate::environment::EnvSnapshot;
use crate::error::Result;
use crate::events::{Event, EventAction};
use crate::exit_codes;
use serde_json::json;

/// Execute the `dsub-e2e run` command.
///
/// Returns the submission command's exit code.
pub fn cmd_run(config: &Config, args: RunArgs) -> Result<i32> {
    let snapshot = EnvSnapshot::from_process();
    let env = resolve_environment(&args.test, &snapshot, config, &GcloudCli::default())?;

    if args.dry_run {
        let argv = submission_argv(&env, config, &args.dsub_args)?;
        println!("{}", shell_words::join(&argv));
        return Ok(exit_codes::SUCCESS);
    }

    let result = run_dsub(&env, config, &args.dsub_args)?;

    record_event(
        config,
        &env,
        Event::new(EventAction::Submit).with_details(json!({
            "command": result.command,
            "exit_code": result.exit_code,
            "duration_ms": result.duration.as_millis() as u64,
        })),
    );

    if !result.is_success() {
        eprintln!(
            "Submission exited with {}",
            result
                .exit_code
                .map(|c| format!("code {}", c))
                .unwrap_or_else(|| "a signal".to_string())
        );
    }

    // Terminated by a signal: no exit code to pass through.
    Ok(result.exit_code.unwrap_or(exit_codes::SUBMISSION_FAILURE))
}
