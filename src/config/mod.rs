//! Configuration model for dsub-e2e.
//!
//! This module defines the Config struct that represents the optional
//! `dsub-e2e.yaml` file. It supports forward-compatible YAML parsing (unknown
//! fields are ignored), sensible defaults for every field, and validation of
//! config values.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

pub use model::Config;
pub use types::DEFAULT_CONFIG_FILE;
