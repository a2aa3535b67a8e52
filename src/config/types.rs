//! Configuration constants and default values.

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "dsub-e2e.yaml";

// Default value functions for serde
pub(crate) fn default_dsub_command() -> String {
    "dsub".to_string()
}
pub(crate) fn default_zones() -> String {
    "us-central1-*".to_string()
}
pub(crate) fn default_remote_prefix() -> String {
    "dsub/py".to_string()
}
pub(crate) fn default_true() -> bool {
    true
}
