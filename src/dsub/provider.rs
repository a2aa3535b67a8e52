//! Supported job providers and their argument handlers.

use crate::config::Config;
use crate::environment::TestEnvironment;
use crate::error::SetupError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend that executes submitted jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Google cloud batch service.
    Google,
    /// Local process runner.
    Local,
}

/// Builds the provider-specific leading arguments for a submission.
pub type ProviderHandler = fn(&TestEnvironment, &Config) -> Vec<String>;

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Google, Provider::Local];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Local => "local",
        }
    }

    pub fn handler(self) -> ProviderHandler {
        match self {
            Provider::Google => google_args,
            Provider::Local => local_args,
        }
    }

    /// Full argument list: provider arguments followed by `task_args`.
    pub fn submission_args(
        self,
        env: &TestEnvironment,
        config: &Config,
        task_args: &[String],
    ) -> Vec<String> {
        let mut args = (self.handler())(env, config);
        args.extend(task_args.iter().cloned());
        args
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                let supported: Vec<_> = Provider::ALL.iter().map(Provider::as_str).collect();
                SetupError::ConfigError(format!(
                    "unsupported DSUB_PROVIDER '{}' (supported: {})",
                    s,
                    supported.join(", ")
                ))
            })
    }
}

fn google_args(env: &TestEnvironment, config: &Config) -> Vec<String> {
    let mut args = vec![
        "--provider".to_string(),
        "google".to_string(),
        "--project".to_string(),
        env.project_id.clone(),
        "--logging".to_string(),
        env.paths.logging.clone(),
        "--zones".to_string(),
        config.zones.clone(),
    ];

    if let Some(size) = env.disks.boot_disk_size {
        args.push("--boot-disk-size".to_string());
        args.push(size.to_string());
    }
    if let Some(size) = env.disks.disk_size {
        args.push("--disk-size".to_string());
        args.push(size.to_string());
    }

    args
}

fn local_args(env: &TestEnvironment, _config: &Config) -> Vec<String> {
    vec![
        "--provider".to_string(),
        "local".to_string(),
        "--logging".to_string(),
        env.paths.logging.clone(),
    ]
}
