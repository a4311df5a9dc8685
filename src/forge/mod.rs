//! Forge API abstraction layer
//!
//! A trait-based seam over the hosted forge's release endpoints, with a real
//! GitHub client and a mock implementation for testing. Orchestration code
//! depends on the [Forge] trait rather than a concrete client.

pub mod github;
pub mod mock;

pub use github::GitHubForge;
pub use mock::MockForge;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The slice of the forge's latest-release response this tool needs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LatestRelease {
    pub tag_name: String,
}

/// Body of the create-release call.
///
/// Transient: built immediately before the call and never stored. Draft and
/// prerelease are always false for releases published by this tool.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReleasePayload {
    pub tag_name: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

impl ReleasePayload {
    pub fn new(tag: &str, branch: &str, body: &str) -> Self {
        ReleasePayload {
            tag_name: tag.to_string(),
            target_commitish: branch.to_string(),
            name: tag.to_string(),
            body: body.to_string(),
            draft: false,
            prerelease: false,
        }
    }
}

/// Release-management operations on the hosted forge.
///
/// Non-success responses surface as [crate::error::ReleaseError::ForgeQuery]
/// or [crate::error::ReleaseError::ForgeWrite] carrying the status code; no
/// retries are attempted at this layer.
pub trait Forge: Send + Sync {
    /// Fetch the latest published release for `owner/repo`.
    fn latest_release(&self, owner: &str, repo: &str) -> Result<LatestRelease>;

    /// Create a new release for `owner/repo`.
    fn create_release(&self, owner: &str, repo: &str, payload: &ReleasePayload) -> Result<()>;
}
