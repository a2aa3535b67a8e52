//! Error types for the dsub-e2e CLI.
//!
//! Uses thiserror for derive macros. Every variant is terminal: setup
//! failures need an operator to fix the environment or clean remote state,
//! so nothing here is retried.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for test setup operations.
#[derive(Error, Debug)]
pub enum SetupError {
    /// A required environment or config value is absent or invalid.
    #[error("{0}")]
    ConfigError(String),

    /// Remote state does not satisfy the test's preconditions.
    #[error("{0}")]
    PreconditionError(String),

    /// The task-file template could not be expanded.
    #[error("Template expansion failed: {0}")]
    TemplateError(String),

    /// Filesystem operation failed.
    #[error("{0}")]
    IoError(String),

    /// The submission command could not be parsed or launched.
    #[error("Submission failed: {0}")]
    SubmissionError(String),
}

impl SetupError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SetupError::ConfigError(_) => exit_codes::CONFIG_ERROR,
            SetupError::PreconditionError(_) => exit_codes::PRECONDITION_FAILURE,
            SetupError::TemplateError(_) => exit_codes::TEMPLATE_FAILURE,
            SetupError::IoError(_) => exit_codes::IO_FAILURE,
            SetupError::SubmissionError(_) => exit_codes::SUBMISSION_FAILURE,
        }
    }
}

/// Result type alias for setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;
