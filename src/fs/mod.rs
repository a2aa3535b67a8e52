//! Filesystem utilities.
//!
//! Directory creation and atomic writes for generated test files.

pub mod atomic;

pub use atomic::{atomic_write, atomic_write_file};

use crate::error::{Result, SetupError};
use std::fs;
use std::path::Path;

/// Ensure the parent directory chain of `path` exists.
///
/// Fails if creation is blocked by permissions or a non-directory entry
/// somewhere on the path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };

    if parent.as_os_str().is_empty() || parent.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(parent).map_err(|e| {
        SetupError::IoError(format!(
            "failed to create directory '{}': {}",
            parent.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_missing_chain() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("a").join("b").join("tasks.tsv");

        ensure_parent_dir(&target).unwrap();

        assert!(temp_dir.path().join("a").join("b").is_dir());
        assert!(!target.exists());
    }

    #[test]
    fn existing_parent_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        ensure_parent_dir(&temp_dir.path().join("tasks.tsv")).unwrap();
    }

    #[test]
    fn bare_file_name_is_ok() {
        ensure_parent_dir(Path::new("tasks.tsv")).unwrap();
    }

    #[test]
    fn file_in_the_way_is_an_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = ensure_parent_dir(&blocker.join("sub").join("tasks.tsv")).unwrap_err();
        assert!(matches!(err, SetupError::IoError(_)));
        assert!(err.to_string().contains("failed to create directory"));
    }
}
