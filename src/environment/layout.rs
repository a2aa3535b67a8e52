//! Local layout of a test: its name, directory, scratch space and task files.

use super::EnvSnapshot;
use crate::error::{Result, SetupError};
use std::path::{Path, PathBuf};

/// Suffix marking a test that submits a batch from a task file.
pub const TASKS_SUFFIX: &str = "_tasks";

/// Environment variable overriding the scratch root (default `/tmp`).
pub const TMP_ROOT_VAR: &str = "TEST_TMP_ROOT";

const DEFAULT_TMP_ROOT: &str = "/tmp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestLayout {
    /// `TEST_NAME`: the test script's file stem.
    pub name: String,
    /// `TEST_DIR`: directory holding the test script.
    pub dir: PathBuf,
    /// `TEST_TMP`: local scratch directory for this test.
    pub tmp: PathBuf,
    /// `TASKS_FILE`: generated task file, for task-file tests.
    pub tasks_file: Option<PathBuf>,
    /// `TASKS_FILE_TMPL`: template the task file is generated from.
    pub tasks_template: Option<PathBuf>,
}

impl TestLayout {
    /// Derive the layout from the path of a test script.
    ///
    /// `tests/e2e_io_tasks.sh` yields `TEST_NAME=e2e_io_tasks`,
    /// `TEST_DIR=tests`, and because the name ends in `_tasks`,
    /// `TASKS_FILE_TMPL=tests/e2e_io_tasks.tsv.tmpl`.
    pub fn from_script(script: &Path, env: &EnvSnapshot) -> Result<Self> {
        let name = script
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        let dir = match script.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Self::new(name, dir, env)
    }

    /// Build a layout from an explicit test name and directory.
    pub fn new(name: &str, dir: PathBuf, env: &EnvSnapshot) -> Result<Self> {
        validate_test_name(name)?;

        let tmp_root = env.get_non_empty(TMP_ROOT_VAR).unwrap_or(DEFAULT_TMP_ROOT);
        let tmp = Path::new(tmp_root).join("dsub-test-py").join(name);

        let (tasks_file, tasks_template) = if name.ends_with(TASKS_SUFFIX) {
            (
                Some(tmp.join(format!("{}.tsv", name))),
                Some(dir.join(format!("{}.tsv.tmpl", name))),
            )
        } else {
            (None, None)
        };

        Ok(Self {
            name: name.to_string(),
            dir,
            tmp,
            tasks_file,
            tasks_template,
        })
    }

    /// Use an explicit task-file template, making this a task-file test.
    pub fn with_tasks_template(mut self, template: PathBuf) -> Self {
        if self.tasks_file.is_none() {
            self.tasks_file = Some(self.tmp.join(format!("{}.tsv", self.name)));
        }
        self.tasks_template = Some(template);
        self
    }

    pub fn is_task_file_test(&self) -> bool {
        self.tasks_file.is_some()
    }

    /// Append-only setup event log for this test.
    pub fn events_file(&self) -> PathBuf {
        self.tmp.join("events").join("events.ndjson")
    }
}

fn validate_test_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SetupError::ConfigError(
            "test name could not be determined.\n\
             Fix: pass a test script path with a file name, or use --test-name."
                .to_string(),
        ));
    }

    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(SetupError::ConfigError(format!(
            "invalid test name '{}': must be a single path component",
            name
        )));
    }

    Ok(())
}
