//! Implementation of the `dsub-e2e env` command.
//!
//! Prints the derived test variables either as shell-quoted `KEY=VALUE`
//! lines (suitable for `eval`) or as a JSON object.

use super::resolve_environment;
use crate::cli::EnvArgs;
use crate::cloud::{CloudTools, GcloudCli};
use crate::config::Config;
use crate::environment::EnvSnapshot;
use crate::error::{Result, SetupError};

/// Execute the `dsub-e2e env` command.
pub fn cmd_env(config: &Config, args: EnvArgs) -> Result<()> {
    let snapshot = EnvSnapshot::from_process();
    let output = render_env(config, &snapshot, &GcloudCli::default(), &args)?;
    print!("{}", output);
    Ok(())
}

pub(super) fn render_env(
    config: &Config,
    snapshot: &EnvSnapshot,
    cloud: &dyn CloudTools,
    args: &EnvArgs,
) -> Result<String> {
    let env = resolve_environment(&args.test, snapshot, config, cloud)?;
    let vars = env.derived_variables();

    if args.json {
        let mut json = serde_json::to_string_pretty(&vars).map_err(|e| {
            SetupError::IoError(format!("failed to serialize environment to JSON: {}", e))
        })?;
        json.push('\n');
        return Ok(json);
    }

    Ok(vars
        .iter()
        .map(|(key, value)| format!("{}={}\n", key, shell_words::quote(value)))
        .collect())
}
