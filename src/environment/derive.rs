//! Derivation and validation of the test environment.

use super::{EnvSnapshot, RemotePaths, TestEnvironment, TestLayout};
use crate::cloud::CloudTools;
use crate::config::Config;
use crate::dsub::Provider;
use crate::error::{Result, SetupError};
use tracing::debug;

/// Optional disk size overrides for the google provider, in GB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskOverrides {
    pub boot_disk_size: Option<u32>,
    pub disk_size: Option<u32>,
}

/// Determine the project id.
///
/// `YOUR_PROJECT` wins when present in the environment, even if empty (the
/// empty value is then rejected by [`derive`]). Otherwise the configured
/// gcloud project is used.
pub fn resolve_project(env: &EnvSnapshot, cloud: &dyn CloudTools) -> Result<Option<String>> {
    if let Some(project) = env.get("YOUR_PROJECT") {
        debug!("project taken from YOUR_PROJECT");
        return Ok(Some(project.to_string()));
    }

    debug!("checking configured gcloud project");
    cloud.configured_project()
}

/// Derive the full test environment.
///
/// Performs no I/O. Fails with `SetupError::ConfigError` when a required
/// value is absent or invalid.
pub fn derive(
    env: &EnvSnapshot,
    layout: TestLayout,
    project: Option<String>,
    config: &Config,
) -> Result<TestEnvironment> {
    // Unset means google; set but empty is an unknown provider.
    let provider: Provider = env.get("DSUB_PROVIDER").unwrap_or("google").parse()?;

    let project_id = project
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            SetupError::ConfigError(
                "Your project ID could not be determined.\n\
                 Fix: set the environment variable YOUR_PROJECT or run \"gcloud init\"."
                    .to_string(),
            )
        })?;

    let bucket = resolve_bucket(env)?;

    let disks = DiskOverrides {
        boot_disk_size: size_override(env, "BOOT_DISK_SIZE")?.or(config.boot_disk_size),
        disk_size: size_override(env, "DISK_SIZE")?.or(config.disk_size),
    };

    let paths = RemotePaths::new(&bucket, &config.remote_prefix, provider, &layout);

    Ok(TestEnvironment {
        provider,
        project_id,
        bucket,
        layout,
        paths,
        check_results_only: env.get_non_empty("CHECK_RESULTS_ONLY").is_some(),
        disks,
    })
}

/// `YOUR_BUCKET`, else `{USER}-dsub-test`.
fn resolve_bucket(env: &EnvSnapshot) -> Result<String> {
    if let Some(bucket) = env.get("YOUR_BUCKET") {
        let bucket = bucket.trim().trim_start_matches("gs://").trim_end_matches('/');
        if bucket.is_empty() || bucket.contains('/') {
            return Err(SetupError::ConfigError(format!(
                "invalid bucket name in YOUR_BUCKET: '{}'",
                bucket
            )));
        }
        return Ok(bucket.to_string());
    }

    match env.get_non_empty("USER") {
        Some(user) => Ok(format!("{}-dsub-test", user)),
        None => Err(SetupError::ConfigError(
            "test bucket could not be determined.\n\
             Fix: set the environment variable YOUR_BUCKET."
                .to_string(),
        )),
    }
}

/// Parse a positive integer size from the environment, if set.
fn size_override(env: &EnvSnapshot, key: &str) -> Result<Option<u32>> {
    let Some(raw) = env.get_non_empty(key) else {
        return Ok(None);
    };

    match raw.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(Some(size)),
        _ => Err(SetupError::ConfigError(format!(
            "{} must be a positive integer (GB), found '{}'",
            key, raw
        ))),
    }
}
