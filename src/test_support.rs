use crate::cloud::CloudTools;
use crate::config::Config;
use crate::dsub::Provider;
use crate::environment::{EnvSnapshot, TestEnvironment, TestLayout, derive};
use crate::error::{Result, SetupError};
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::PathBuf;

/// In-memory [`CloudTools`] that records every `exists` query.
#[derive(Default)]
pub(crate) struct FakeCloud {
    pub(crate) project: Option<String>,
    objects: HashSet<String>,
    fail: bool,
    calls: RefCell<Vec<String>>,
}

impl FakeCloud {
    pub(crate) fn with_objects<I, S>(objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            objects: objects.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn with_project(mut self, project: &str) -> Self {
        self.project = Some(project.to_string());
        self
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CloudTools for FakeCloud {
    fn configured_project(&self) -> Result<Option<String>> {
        if self.fail {
            return Err(SetupError::ConfigError("gcloud unavailable".to_string()));
        }
        Ok(self.project.clone())
    }

    fn exists(&self, uri_pattern: &str) -> Result<bool> {
        self.calls.borrow_mut().push(uri_pattern.to_string());
        if self.fail {
            return Err(SetupError::ConfigError("gsutil unavailable".to_string()));
        }
        Ok(self.objects.contains(uri_pattern))
    }
}

/// Snapshot with the variables every derivation needs.
pub(crate) fn base_snapshot(provider: Provider) -> EnvSnapshot {
    EnvSnapshot::from_pairs([
        ("DSUB_PROVIDER", provider.as_str()),
        ("YOUR_BUCKET", "test-bucket"),
        ("TEST_TMP_ROOT", "/tmp/dsub-e2e-tests"),
        ("USER", "tester"),
    ])
}

/// A derived environment for test `name` in directory `tests`.
pub(crate) fn test_environment(provider: Provider, name: &str) -> TestEnvironment {
    let env = base_snapshot(provider);
    let layout = TestLayout::new(name, PathBuf::from("tests"), &env).unwrap();
    derive(
        &env,
        layout,
        Some("test-project".to_string()),
        &Config::default(),
    )
    .unwrap()
}
