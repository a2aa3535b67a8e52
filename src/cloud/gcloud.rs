//! [`CloudTools`] backed by the `gcloud` and `gsutil` command-line tools.

use super::CloudTools;
use crate::error::{Result, SetupError};
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// `gsutil ls` messages that mean the listing is empty.
const NOT_FOUND_MARKERS: [&str; 2] = ["matched no objects", "BucketNotFoundException"];

#[derive(Debug, Clone)]
pub struct GcloudCli {
    gcloud: String,
    gsutil: String,
}

impl Default for GcloudCli {
    fn default() -> Self {
        Self::new("gcloud", "gsutil")
    }
}

impl GcloudCli {
    /// Use specific `gcloud` and `gsutil` executables.
    pub fn new(gcloud: impl Into<String>, gsutil: impl Into<String>) -> Self {
        Self {
            gcloud: gcloud.into(),
            gsutil: gsutil.into(),
        }
    }
}

impl CloudTools for GcloudCli {
    fn configured_project(&self) -> Result<Option<String>> {
        let args = [
            "config",
            "list",
            "core/project",
            "--format=value(core.project)",
        ];
        let output = run(&self.gcloud, &args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SetupError::ConfigError(format!(
                "{} {} failed (exit code {:?}): {}\n\
                 Fix: set the environment variable YOUR_PROJECT or run \"gcloud init\".",
                self.gcloud,
                args.join(" "),
                output.status.code(),
                stderr.trim()
            )));
        }

        let project = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!project.is_empty()).then_some(project))
    }

    fn exists(&self, uri_pattern: &str) -> Result<bool> {
        let output = run(&self.gsutil, &["ls", uri_pattern])?;
        if output.status.success() {
            return Ok(true);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if NOT_FOUND_MARKERS.iter().any(|marker| stderr.contains(marker)) {
            return Ok(false);
        }

        // Any other failure (auth, network) is not an empty listing.
        Err(SetupError::ConfigError(format!(
            "{} ls {} failed (exit code {:?}): {}\n\
             Fix: check your credentials with \"gcloud auth list\".",
            self.gsutil,
            uri_pattern,
            output.status.code(),
            stderr.trim()
        )))
    }
}

fn run(program: &str, args: &[&str]) -> Result<Output> {
    debug!(program, args = %args.join(" "), "running cloud tool");

    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            SetupError::ConfigError(format!(
                "failed to run '{}': {}\n\
                 Fix: install the Google Cloud SDK and make sure '{}' is in PATH.",
                program, e, program
            ))
        })
}
