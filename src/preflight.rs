//! Remote precondition checks run before a test starts.

use crate::cloud::CloudTools;
use crate::environment::TestEnvironment;
use crate::error::{Result, SetupError};
use tracing::info;

/// Check that the bucket exists and that no earlier run left files behind.
///
/// The leftover-files check is skipped when only checking results of an
/// earlier run (`CHECK_RESULTS_ONLY`).
pub fn run_preflight(env: &TestEnvironment, cloud: &dyn CloudTools) -> Result<()> {
    check_bucket(env, cloud)?;

    if env.check_results_only {
        info!("CHECK_RESULTS_ONLY set; skipping remote leftover check");
        return Ok(());
    }

    check_remote_root_empty(env, cloud)
}

fn check_bucket(env: &TestEnvironment, cloud: &dyn CloudTools) -> Result<()> {
    info!(bucket = %env.bucket, "checking if bucket exists");

    if !cloud.exists(&format!("gs://{}", env.bucket))? {
        return Err(SetupError::PreconditionError(format!(
            "Bucket does not exist: {}\n\
             Fix: create the bucket with \"gsutil mb gs://{}\".",
            env.bucket, env.bucket
        )));
    }

    Ok(())
}

fn check_remote_root_empty(env: &TestEnvironment, cloud: &dyn CloudTools) -> Result<()> {
    info!(root = %env.paths.root, "checking if remote test files already exist");

    if cloud.exists(&format!("{}/**", env.paths.root))? {
        return Err(SetupError::PreconditionError(format!(
            "Test files exist: {}\n\
             Fix: remove contents:\n  gsutil -m rm {}/**",
            env.paths.root,
            env.paths.cleanup_root()
        )));
    }

    Ok(())
}
