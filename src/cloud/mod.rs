//! Cloud collaborators.
//!
//! The setup logic needs two things from the cloud: the project configured
//! for the current user, and whether objects matching a URI pattern exist.
//! Both sit behind [`CloudTools`] so setup can be tested without network
//! access.

mod gcloud;

pub use gcloud::GcloudCli;

use crate::error::Result;

pub trait CloudTools {
    /// Project configured in the local cloud SDK, if any.
    fn configured_project(&self) -> Result<Option<String>>;

    /// Whether any object matches `uri_pattern` (e.g. `gs://bucket/path/**`).
    fn exists(&self, uri_pattern: &str) -> Result<bool>;
}
