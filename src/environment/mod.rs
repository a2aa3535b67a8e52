//! Test environment resolution.
//!
//! Setup is split into three phases:
//!
//! 1. Pure derivation ([`derive`]) of a [`TestEnvironment`] from an
//!    environment snapshot, the test layout, the project id and the config.
//!    Validation happens here and returns `SetupError::ConfigError`.
//! 2. I/O lookups that feed derivation ([`resolve_project`]).
//! 3. Side effects driven by the derived environment (preflight, task-file
//!    expansion, submission), which live in other modules.
//!
//! The derived environment is built once per process and passed by
//! reference to every consumer.

mod derive;
mod layout;


pub use derive::{DiskOverrides, derive, resolve_project};
pub use layout::TestLayout;

use crate::dsub::Provider;
use crate::template::{Variables, vars};
use std::path::Path;

/// Immutable copy of environment variables.
///
/// Derivation reads from a snapshot rather than the live process
/// environment, so it can be tested with fixed inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: Variables,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { vars: vars(pairs) }
    }

    /// Value of `key`, if present (possibly empty).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Value of `key`, if present and non-empty.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn vars(&self) -> &Variables {
        &self.vars
    }
}

/// Remote (and docker-mount) locations for one test run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePaths {
    /// `gs://{bucket}/{prefix}/{provider}/{test}`
    pub root: String,
    /// `gs/{bucket}/{prefix}/{provider}/{test}`, as seen inside the container.
    pub docker_root: String,
    pub logging: String,
    pub inputs: String,
    pub outputs: String,
    pub docker_inputs: String,
    pub docker_outputs: String,
    /// Only set for tests that log to a named file.
    pub stdout_log: Option<String>,
    pub stderr_log: Option<String>,
}

impl RemotePaths {
    pub fn new(bucket: &str, prefix: &str, provider: Provider, layout: &TestLayout) -> Self {
        let name = &layout.name;
        let root = format!("gs://{}/{}/{}/{}", bucket, prefix, provider, name);
        let docker_root = format!("gs/{}/{}/{}/{}", bucket, prefix, provider, name);

        let (logging, stdout_log, stderr_log) = if layout.is_task_file_test() {
            // A task-file test logs each task under one logging directory.
            (format!("{}/logging", root), None, None)
        } else {
            let logging = format!("{}/{}/logging/{}.log", root, name, name);
            let log_dir = uri_dirname(&logging);
            let stdout = format!("{}/{}-stdout.log", log_dir, name);
            let stderr = format!("{}/{}-stderr.log", log_dir, name);
            (logging, Some(stdout), Some(stderr))
        };

        Self {
            inputs: format!("{}/input", root),
            outputs: format!("{}/output", root),
            docker_inputs: format!("{}/input", docker_root),
            docker_outputs: format!("{}/output", docker_root),
            root,
            docker_root,
            logging,
            stdout_log,
            stderr_log,
        }
    }

    /// Parent of the test root; the prefix an operator removes to clean up.
    pub fn cleanup_root(&self) -> &str {
        uri_dirname(&self.root)
    }
}

/// Everything a test needs to know about where it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestEnvironment {
    pub provider: Provider,
    pub project_id: String,
    pub bucket: String,
    pub layout: TestLayout,
    pub paths: RemotePaths,
    /// Skip the "remote test files already exist" precondition.
    pub check_results_only: bool,
    pub disks: DiskOverrides,
}

impl TestEnvironment {
    /// The derived test variables, keyed by their environment names.
    pub fn derived_variables(&self) -> Variables {
        let mut vars = Variables::new();
        let mut set = |key: &str, value: String| {
            vars.insert(key.to_string(), value);
        };

        set("TEST_NAME", self.layout.name.clone());
        set("TEST_DIR", path_string(&self.layout.dir));
        set("TEST_TMP", path_string(&self.layout.tmp));
        if let Some(tasks_file) = &self.layout.tasks_file {
            set("TASKS_FILE", path_string(tasks_file));
        }
        if let Some(template) = &self.layout.tasks_template {
            set("TASKS_FILE_TMPL", path_string(template));
        }

        set("PROJECT_ID", self.project_id.clone());
        set("DSUB_BUCKET", self.bucket.clone());
        set("DSUB_PROVIDER", self.provider.to_string());
        set("LOGGING", self.paths.logging.clone());
        set("INPUTS", self.paths.inputs.clone());
        set("OUTPUTS", self.paths.outputs.clone());
        set("DOCKER_INPUTS", self.paths.docker_inputs.clone());
        set("DOCKER_OUTPUTS", self.paths.docker_outputs.clone());
        if let Some(stdout_log) = &self.paths.stdout_log {
            set("STDOUT_LOG", stdout_log.clone());
        }
        if let Some(stderr_log) = &self.paths.stderr_log {
            set("STDERR_LOG", stderr_log.clone());
        }

        vars
    }

    /// Process environment merged with the derived variables.
    ///
    /// Derived values win over process values of the same name.
    pub fn mapping(&self, base: &EnvSnapshot) -> Variables {
        let mut vars = base.vars().clone();
        vars.extend(self.derived_variables());
        vars
    }
}

/// Everything before the last `/` of a URI.
fn uri_dirname(uri: &str) -> &str {
    uri.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
