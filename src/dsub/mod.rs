//! Job submission.
//!
//! Each [`Provider`] maps to a handler that builds the provider's required
//! arguments; the task-specific arguments follow. The assembled command is
//! run by [`submit`].

mod executor;
mod provider;

pub use executor::{SubmissionResult, parse_command, submit};
pub use provider::{Provider, ProviderHandler};

use crate::config::Config;
use crate::environment::TestEnvironment;
use crate::error::Result;

/// The full argv that [`run_dsub`] would execute.
pub fn submission_argv(
    env: &TestEnvironment,
    config: &Config,
    task_args: &[String],
) -> Result<Vec<String>> {
    let args = env.provider.submission_args(env, config, task_args);
    parse_command(&config.dsub_command, &args)
}

/// Submit a job for the test described by `env`.
pub fn run_dsub(
    env: &TestEnvironment,
    config: &Config,
    task_args: &[String],
) -> Result<SubmissionResult> {
    let args = env.provider.submission_args(env, config, task_args);
    submit(&config.dsub_command, &args)
}
