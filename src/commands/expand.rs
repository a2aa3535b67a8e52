//! Implementation of the `dsub-e2e expand` command.

use crate::cli::ExpandArgs;
use crate::environment::EnvSnapshot;
use crate::error::{Result, SetupError};
use crate::taskfile;
use crate::template::Variables;
use regex::Regex;
use std::sync::LazyLock;

/// Regex for `--var KEY=VALUE` arguments.
static VAR_ARG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([A-Za-z_][A-Za-z0-9_]*)=(.*)$").expect("Invalid --var regex")
});

/// Execute the `dsub-e2e expand` command.
pub fn cmd_expand(args: ExpandArgs) -> Result<()> {
    let snapshot = EnvSnapshot::from_process();
    let variables = build_variables(&snapshot, &args)?;

    let summary = taskfile::expand(&variables, &args.template, &args.output)?;

    println!(
        "Wrote {} row(s) to {}",
        summary.rows,
        args.output.display()
    );
    Ok(())
}

/// Process environment (unless disabled) overlaid with `--var` values.
pub(super) fn build_variables(snapshot: &EnvSnapshot, args: &ExpandArgs) -> Result<Variables> {
    let mut variables = if args.no_process_env {
        Variables::new()
    } else {
        snapshot.vars().clone()
    };

    for raw in &args.vars {
        let (key, value) = parse_var(raw)?;
        variables.insert(key, value);
    }

    Ok(variables)
}

fn parse_var(raw: &str) -> Result<(String, String)> {
    let captures = VAR_ARG_REGEX.captures(raw).ok_or_else(|| {
        SetupError::ConfigError(format!(
            "invalid --var '{}': expected KEY=VALUE with KEY matching [A-Za-z_][A-Za-z0-9_]*",
            raw
        ))
    })?;

    Ok((captures[1].to_string(), captures[2].to_string()))
}
