use std::path::Path;
use std::sync::Mutex;

use crate::error::{ReleaseError, Result};
use crate::git::GitOps;

/// Mock git backend that records invocations instead of touching a
/// repository.
pub struct MockGit {
    owner: String,
    repo: String,
    branch: String,
    fail_push: bool,
    log: Mutex<Vec<String>>,
}

impl MockGit {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, branch: impl Into<String>) -> Self {
        MockGit {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
            fail_push: false,
            log: Mutex::new(Vec::new()),
        }
    }

    /// Make [GitOps::push] fail.
    pub fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    /// Operations performed so far, in order.
    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }
}

impl GitOps for MockGit {
    fn owner_and_repo(&self, _remote: &str) -> Result<(String, String)> {
        Ok((self.owner.clone(), self.repo.clone()))
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn commit_file(&self, path: &Path, message: &str) -> Result<()> {
        self.record(format!("commit {} '{}'", path.display(), message));
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        if self.fail_push {
            return Err(ReleaseError::remote(format!(
                "Simulated push failure to '{}'",
                remote
            )));
        }
        self.record(format!("push {} {}", remote, branch));
        Ok(())
    }
}
