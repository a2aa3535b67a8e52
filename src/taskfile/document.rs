//! Tab-separated task documents.
//!
//! A document is an ordered list of rows, each an ordered list of fields.
//! Parsing never trims fields or drops empty trailing fields, so a document
//! serializes back to its source text (with `\r\n` normalized to `\n`).

use crate::error::{Result, SetupError};
use crate::template::{TemplateError, Variables, render_template};
use std::fmt;
use std::path::Path;

/// A parsed tab-separated document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TsvDocument {
    rows: Vec<Vec<String>>,
    trailing_newline: bool,
}

/// A placeholder failure located in a specific cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellError {
    /// 1-based line number.
    pub line: usize,
    /// 1-based field number within the line.
    pub field: usize,
    pub error: TemplateError,
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, field {}: {}", self.line, self.field, self.error)
    }
}

impl TsvDocument {
    /// Parse tab-separated text.
    pub fn parse(content: &str) -> Self {
        if content.is_empty() {
            return Self::default();
        }

        let trailing_newline = content.ends_with('\n');
        let body = content.strip_suffix('\n').unwrap_or(content);

        let rows = body
            .split('\n')
            .map(|line| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                line.split('\t').map(str::to_string).collect()
            })
            .collect();

        Self {
            rows,
            trailing_newline,
        }
    }

    /// Read and parse a document from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SetupError::IoError(format!(
                "failed to read template '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self::parse(&content))
    }

    /// Build a document from explicit rows.
    #[cfg(test)]
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            trailing_newline: true,
        }
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Substitute placeholders in every field.
    ///
    /// Stops at the first failing cell; the returned document always has the
    /// same shape as `self`.
    pub fn expand(&self, variables: &Variables) -> std::result::Result<Self, CellError> {
        let mut rows = Vec::with_capacity(self.rows.len());

        for (line_idx, row) in self.rows.iter().enumerate() {
            let mut expanded = Vec::with_capacity(row.len());
            for (field_idx, field) in row.iter().enumerate() {
                let value = render_template(field, variables).map_err(|error| CellError {
                    line: line_idx + 1,
                    field: field_idx + 1,
                    error,
                })?;
                expanded.push(value);
            }
            rows.push(expanded);
        }

        Ok(Self {
            rows,
            trailing_newline: self.trailing_newline,
        })
    }

    /// Serialize back to tab-separated text.
    pub fn to_tsv_string(&self) -> String {
        let mut out = self
            .rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");

        if self.trailing_newline && !self.rows.is_empty() {
            out.push('\n');
        }
        out
    }
}
