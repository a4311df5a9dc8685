use std::sync::Mutex;

use crate::error::{ReleaseError, Result};
use crate::forge::{Forge, LatestRelease, ReleasePayload};

/// Mock forge for testing without network access.
pub struct MockForge {
    latest_tag: Option<String>,
    query_failure: Option<u16>,
    create_failure: Option<u16>,
    created: Mutex<Vec<ReleasePayload>>,
}

impl MockForge {
    /// Create a mock whose latest published release carries the given tag.
    pub fn with_latest(tag: impl Into<String>) -> Self {
        MockForge {
            latest_tag: Some(tag.into()),
            query_failure: None,
            create_failure: None,
            created: Mutex::new(Vec::new()),
        }
    }

    /// Make the latest-release query fail with the given status.
    pub fn failing_query(status: u16) -> Self {
        MockForge {
            latest_tag: None,
            query_failure: Some(status),
            create_failure: None,
            created: Mutex::new(Vec::new()),
        }
    }

    /// Make release creation fail with the given status.
    pub fn fail_create_with(mut self, status: u16) -> Self {
        self.create_failure = Some(status);
        self
    }

    /// Payloads submitted through [Forge::create_release].
    pub fn created_releases(&self) -> Vec<ReleasePayload> {
        self.created.lock().unwrap().clone()
    }
}

impl Forge for MockForge {
    fn latest_release(&self, _owner: &str, _repo: &str) -> Result<LatestRelease> {
        if let Some(status) = self.query_failure {
            return Err(ReleaseError::ForgeQuery(status));
        }
        match &self.latest_tag {
            Some(tag) => Ok(LatestRelease {
                tag_name: tag.clone(),
            }),
            None => Err(ReleaseError::ForgeQuery(404)),
        }
    }

    fn create_release(&self, _owner: &str, _repo: &str, payload: &ReleasePayload) -> Result<()> {
        if let Some(status) = self.create_failure {
            return Err(ReleaseError::ForgeWrite(status));
        }
        self.created.lock().unwrap().push(payload.clone());
        Ok(())
    }
}
