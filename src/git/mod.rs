//! Version-control abstraction layer
//!
//! The publish step needs four git operations: recover `{owner, repo}` from
//! the remote URL, read the current branch, commit the updated changelog,
//! and push. The [GitOps] trait abstracts them so the orchestrator can be
//! exercised against [mock::MockGit] without a real remote.

pub mod mock;
pub mod repository;

pub use mock::MockGit;
pub use repository::Git2Repository;

use std::path::Path;

use crate::error::Result;

/// Git operations consumed by the release orchestrator.
pub trait GitOps: Send {
    /// Recover `(owner, repo)` from the remote's SSH URL
    /// (`git@<host>:<owner>/<repo>.git`).
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    fn owner_and_repo(&self, remote: &str) -> Result<(String, String)>;

    /// Short name of the branch HEAD points at.
    fn current_branch(&self) -> Result<String>;

    /// Stage one file and commit it on HEAD.
    ///
    /// # Arguments
    /// * `path` - Path of the file, relative to the repository workdir
    /// * `message` - Commit message (e.g., "Release v1.2.3")
    fn commit_file(&self, path: &Path, message: &str) -> Result<()>;

    /// Push a branch to the remote.
    fn push(&self, remote: &str, branch: &str) -> Result<()>;
}
