//! Command implementations for dsub-e2e.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the environment resolution shared by every
//! test-bound command.

mod env;
mod expand;
mod log;
mod run;
mod setup;


use crate::cli::{Cli, Command, TestArgs};
use crate::cloud::CloudTools;
use crate::config::Config;
use crate::environment::{EnvSnapshot, TestEnvironment, TestLayout, derive, resolve_project};
use crate::error::Result;
use crate::events::{Event, append_event};
use crate::exit_codes;
use std::path::PathBuf;
use tracing::{trace, warn};

/// Dispatch a command to its implementation.
///
/// Returns the process exit code on success. Only `run` can return a
/// non-zero code without an error: the submission command's own status.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let config = Config::resolve(cli.config.as_deref())?;
    if let Ok(yaml) = config.to_yaml() {
        trace!("effective config:\n{}", yaml);
    }

    match cli.command {
        Command::Env(args) => env::cmd_env(&config, args).map(|()| exit_codes::SUCCESS),
        Command::Setup(args) => setup::cmd_setup(&config, args).map(|()| exit_codes::SUCCESS),
        Command::Expand(args) => expand::cmd_expand(args).map(|()| exit_codes::SUCCESS),
        Command::Run(args) => run::cmd_run(&config, args),
        Command::Log(args) => log::cmd_log(args).map(|()| exit_codes::SUCCESS),
    }
}

/// Build the test layout from the command-line test arguments.
fn resolve_layout(args: &TestArgs, snapshot: &EnvSnapshot) -> Result<TestLayout> {
    let layout = match &args.test_name {
        Some(name) => {
            let dir = match args.test.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            TestLayout::new(name, dir, snapshot)?
        }
        None => TestLayout::from_script(&args.test, snapshot)?,
    };

    Ok(match &args.tasks_template {
        Some(template) => layout.with_tasks_template(template.clone()),
        None => layout,
    })
}

/// Resolve the project and derive the full test environment.
fn resolve_environment(
    args: &TestArgs,
    snapshot: &EnvSnapshot,
    config: &Config,
    cloud: &dyn CloudTools,
) -> Result<TestEnvironment> {
    let layout = resolve_layout(args, snapshot)?;
    let project = resolve_project(snapshot, cloud)?;
    derive(snapshot, layout, project, config)
}

/// Append an event to the test's log, if enabled.
///
/// The log is a record, not part of the setup contract, so a failure to
/// write it is reported and otherwise ignored.
fn record_event(config: &Config, env: &TestEnvironment, event: Event) {
    if !config.events_log {
        return;
    }

    let event = event.with_test(env.layout.name.clone());
    let events_file = env.layout.events_file();
    if let Err(e) = append_event(&events_file, &event) {
        warn!(path = %events_file.display(), error = %e, "failed to record setup event");
    }
}
