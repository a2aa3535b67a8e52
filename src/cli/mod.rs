//! CLI argument parsing for dsub-e2e.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// dsub-e2e: environment bootstrap for dsub end-to-end tests.
///
/// Determines the cloud project and bucket, derives logging/input/output
/// paths for a test, checks remote preconditions, generates task files
/// from templates, and submits jobs with provider-specific arguments.
#[derive(Parser, Debug)]
#[command(name = "dsub-e2e")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a YAML config file (default: ./dsub-e2e.yaml when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for dsub-e2e.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the derived test environment.
    ///
    /// Resolves the project (YOUR_PROJECT or the gcloud configuration) but
    /// performs no remote checks.
    Env(EnvArgs),

    /// Prepare a test: check remote preconditions and generate the task file.
    ///
    /// Fails if the bucket does not exist or earlier test files remain
    /// (unless CHECK_RESULTS_ONLY is set).
    Setup(TestArgs),

    /// Expand a tab-separated template into an output file.
    ///
    /// Placeholders use `${NAME}` syntax and are resolved from the process
    /// environment plus any `--var` values.
    Expand(ExpandArgs),

    /// Submit a job for a test with provider-specific arguments.
    ///
    /// Arguments after `--` are passed to the submission command after the
    /// provider arguments. Exits with the submission command's exit code.
    Run(RunArgs),

    /// Show the setup event log for a test.
    Log(TestArgs),
}

/// Identifies the test being set up.
#[derive(Args, Debug, Clone)]
pub struct TestArgs {
    /// Path of the test script; its file stem is the test name.
    #[arg(long, value_name = "PATH")]
    pub test: PathBuf,

    /// Override the test name derived from the script path.
    #[arg(long)]
    pub test_name: Option<String>,

    /// Use this task-file template (makes the test a task-file test).
    #[arg(long, value_name = "PATH")]
    pub tasks_template: Option<PathBuf>,
}

/// Arguments for the `env` command.
#[derive(Args, Debug)]
pub struct EnvArgs {
    #[command(flatten)]
    pub test: TestArgs,

    /// Emit a JSON object instead of KEY=VALUE lines.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `expand` command.
#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Template file to read.
    #[arg(long, value_name = "PATH")]
    pub template: PathBuf,

    /// Output file to write (parent directories are created).
    #[arg(long, value_name = "PATH")]
    pub output: PathBuf,

    /// Additional variable, overriding the process environment.
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Resolve placeholders from `--var` values only.
    #[arg(long)]
    pub no_process_env: bool,
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub test: TestArgs,

    /// Print the submission command without running it.
    #[arg(long)]
    pub dry_run: bool,

    /// Task-specific arguments for the submission command.
    #[arg(last = true, value_name = "DSUB_ARGS")]
    pub dsub_args: Vec<String>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
