//! Exit code constants for the dsub-e2e CLI.
//!
//! - 0: Success
//! - 1: Configuration error (missing or invalid environment/config values)
//! - 2: Precondition error (bucket missing, remote test files present)
//! - 3: Template error (unresolved or malformed placeholder)
//! - 4: I/O error (directory creation, template read, output write)
//! - 5: Submission error (submission command could not be launched)
//!
//! A submission command that runs and exits non-zero passes its own exit
//! code through unchanged.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Configuration error: a required value is absent or invalid.
pub const CONFIG_ERROR: i32 = 1;

/// Precondition error: remote state is not ready for the test.
pub const PRECONDITION_FAILURE: i32 = 2;

/// Template error: the task-file template could not be expanded.
pub const TEMPLATE_FAILURE: i32 = 3;

/// Filesystem error.
pub const IO_FAILURE: i32 = 4;

/// The submission command could not be parsed or launched.
pub const SUBMISSION_FAILURE: i32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            CONFIG_ERROR,
            PRECONDITION_FAILURE,
            TEMPLATE_FAILURE,
            IO_FAILURE,
            SUBMISSION_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn failures_are_nonzero() {
        for code in [
            CONFIG_ERROR,
            PRECONDITION_FAILURE,
            TEMPLATE_FAILURE,
            IO_FAILURE,
            SUBMISSION_FAILURE,
        ] {
            assert_ne!(code, SUCCESS);
        }
    }
}
