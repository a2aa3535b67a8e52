//! Implementation of the `dsub-e2e setup` command.
//!
//! The setup sequence is:
//! 1. Resolve the project and derive the test environment
//! 2. Check remote preconditions (bucket exists, no leftover test files)
//! 3. For task-file tests, generate the task file from its template
//! 4. Record the setup in the test's event log

use super::{record_event, resolve_environment};
use crate::cli::TestArgs;
use crate::cloud::{CloudTools, GcloudCli};
use crate::config::Config;
use crate::environment::{EnvSnapshot, TestEnvironment};
use crate::error::Result;
use crate::events::{Event, EventAction};
use crate::preflight::run_preflight;
use crate::taskfile;
use serde_json::json;
use tracing::info;

/// Execute the `dsub-e2e setup` command.
pub fn cmd_setup(config: &Config, args: TestArgs) -> Result<()> {
    let snapshot = EnvSnapshot::from_process();
    let env = run_setup(config, &snapshot, &GcloudCli::default(), &args)?;

    println!("Project ID:   {}", env.project_id);
    println!("Bucket:       {}", env.bucket);
    println!("Logging path: {}", env.paths.logging);
    println!("Input path:   {}", env.paths.inputs);
    println!("Output path:  {}", env.paths.outputs);
    if let Some(tasks_file) = &env.layout.tasks_file {
        println!("Task file:    {}", tasks_file.display());
    }

    Ok(())
}

pub(super) fn run_setup(
    config: &Config,
    snapshot: &EnvSnapshot,
    cloud: &dyn CloudTools,
    args: &TestArgs,
) -> Result<TestEnvironment> {
    info!("checking that required environment values are set");
    let env = resolve_environment(args, snapshot, config, cloud)?;
    info!(project = %env.project_id, bucket = %env.bucket, provider = %env.provider, "environment resolved");

    run_preflight(&env, cloud)?;

    if let (Some(template), Some(tasks_file)) =
        (&env.layout.tasks_template, &env.layout.tasks_file)
    {
        info!(tasks_file = %tasks_file.display(), "setting up task file");
        let summary = taskfile::expand(&env.mapping(snapshot), template, tasks_file)?;

        record_event(
            config,
            &env,
            Event::new(EventAction::Expand).with_details(json!({
                "template": template.display().to_string(),
                "output": tasks_file.display().to_string(),
                "rows": summary.rows,
            })),
        );
    }

    record_event(
        config,
        &env,
        Event::new(EventAction::Setup).with_details(json!({
            "provider": env.provider,
            "project": env.project_id,
            "bucket": env.bucket,
            "logging": env.paths.logging,
            "inputs": env.paths.inputs,
            "outputs": env.paths.outputs,
            "check_results_only": env.check_results_only,
        })),
    );

    Ok(env)
}
