use reqwest::blocking::Client;

use crate::error::{ReleaseError, Result};
use crate::forge::{Forge, LatestRelease, ReleasePayload};

/// GitHub REST implementation of [Forge].
///
/// The access token travels as a query parameter on every call. The API base
/// is configurable so tests can point the client at a local server.
pub struct GitHubForge {
    client: Client,
    api_base: String,
    token: String,
}

impl GitHubForge {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        GitHubForge {
            client: Client::new(),
            api_base: api_base.into(),
            token: token.into(),
        }
    }

    fn compose_url(&self, suffix: &str) -> String {
        format!("{}{}?access_token={}", self.api_base, suffix, self.token)
    }
}

impl Forge for GitHubForge {
    fn latest_release(&self, owner: &str, repo: &str) -> Result<LatestRelease> {
        let url = self.compose_url(&format!("/repos/{}/{}/releases/latest", owner, repo));
        let response = self.client.get(&url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReleaseError::ForgeQuery(status.as_u16()));
        }

        Ok(response.json::<LatestRelease>()?)
    }

    fn create_release(&self, owner: &str, repo: &str, payload: &ReleasePayload) -> Result<()> {
        let url = self.compose_url(&format!("/repos/{}/{}/releases", owner, repo));
        let response = self.client.post(&url).json(payload).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReleaseError::ForgeWrite(status.as_u16()));
        }

        Ok(())
    }
}
