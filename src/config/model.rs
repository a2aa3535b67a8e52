//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for end-to-end test setup.
///
/// Every field is optional in the YAML; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Submission
    // =========================================================================
    /// Command used to submit jobs (shell-words parsed; no shell).
    #[serde(default = "default_dsub_command")]
    pub dsub_command: String,

    /// Zone pattern passed to the google provider.
    #[serde(default = "default_zones")]
    pub zones: String,

    /// Boot disk size in GB for the google provider.
    /// Overridden by the `BOOT_DISK_SIZE` environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot_disk_size: Option<u32>,

    /// Data disk size in GB for the google provider.
    /// Overridden by the `DISK_SIZE` environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_size: Option<u32>,

    // =========================================================================
    // Layout
    // =========================================================================
    /// Object prefix under the bucket for all test data.
    #[serde(default = "default_remote_prefix")]
    pub remote_prefix: String,

    /// Whether to append setup events to `{TEST_TMP}/events/events.ndjson`.
    #[serde(default = "default_true")]
    pub events_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dsub_command: default_dsub_command(),
            zones: default_zones(),
            boot_disk_size: None,
            disk_size: None,
            remote_prefix: default_remote_prefix(),
            events_log: default_true(),
        }
    }
}
