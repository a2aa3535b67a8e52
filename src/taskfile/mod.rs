//! Task-file generation.
//!
//! Expands a tab-separated task template against the test environment
//! mapping and writes the result. The output has exactly the template's
//! shape: same rows, same number of fields per row.
//!
//! Expansion is all-or-nothing. The whole document is expanded in memory
//! before anything is written, and the write itself is atomic, so an
//! unresolved placeholder never leaves a partial task file behind.

mod document;


pub use document::{CellError, TsvDocument};

use crate::error::{Result, SetupError};
use crate::fs::{atomic_write_file, ensure_parent_dir};
use crate::template::Variables;
use std::path::Path;
use tracing::debug;

/// Summary of a completed expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandSummary {
    pub rows: usize,
}

/// Expand `template_path` into `output_path` using `environment`.
///
/// # Errors
///
/// * `SetupError::IoError` - parent directory cannot be created, template
///   cannot be read, or output cannot be written
/// * `SetupError::TemplateError` - a placeholder is undefined or malformed
pub fn expand(
    environment: &Variables,
    template_path: &Path,
    output_path: &Path,
) -> Result<ExpandSummary> {
    ensure_parent_dir(output_path)?;

    let template = TsvDocument::read(template_path)?;
    let expanded = template.expand(environment).map_err(|e| {
        SetupError::TemplateError(format!("{}: {}", template_path.display(), e))
    })?;

    atomic_write_file(output_path, &expanded.to_tsv_string())?;

    debug!(
        template = %template_path.display(),
        output = %output_path.display(),
        rows = expanded.row_count(),
        "expanded task file"
    );

    Ok(ExpandSummary {
        rows: expanded.row_count(),
    })
}
