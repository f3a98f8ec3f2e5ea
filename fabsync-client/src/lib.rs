//! # fabsync-client
//!
//! Blocking calls against the workspace REST API: Git status, update from
//! Git, commit to Git, and the resource inventory that feeds the lookup-table
//! builder.
//!
//! Nothing here exits the process; every failure is a [`ClientError`].

pub mod auth;
pub mod error;
pub mod git;
pub mod items;
pub mod lro;
pub mod settings;

use fabsync_core::WorkspaceId;

pub use auth::{acquire_token, AccessToken};
pub use error::ClientError;
pub use git::{CommitOutcome, GitChange, GitStatus, UpdateOutcome};
pub use items::WorkspaceItem;
pub use lro::OperationState;
pub use settings::{ClientSettings, Credentials};

/// Authenticated workspace API client.
#[derive(Debug, Clone)]
pub struct FabricClient {
    agent: ureq::Agent,
    settings: ClientSettings,
    token: AccessToken,
}

impl FabricClient {
    pub fn new(token: AccessToken, settings: ClientSettings) -> Self {
        Self {
            agent: settings.agent(),
            settings,
            token,
        }
    }

    /// Acquire a token with `credentials`, then build a client.
    pub fn login(credentials: &Credentials, settings: ClientSettings) -> Result<Self, ClientError> {
        let token = acquire_token(credentials, &settings)?;
        Ok(Self::new(token, settings))
    }

    fn workspace_url(&self, workspace: &WorkspaceId, path: &str) -> String {
        format!(
            "{}/workspaces/{}/{}",
            self.settings.api_base.trim_end_matches('/'),
            workspace,
            path
        )
    }

    fn get(&self, url: &str) -> Result<ureq::Response, ClientError> {
        tracing::debug!("GET {url}");
        error::into_response(
            self.agent
                .get(url)
                .set("Authorization", &self.token.bearer())
                .call(),
        )
    }

    fn post_json(
        &self,
        url: &str,
        body: &impl serde::Serialize,
    ) -> Result<ureq::Response, ClientError> {
        tracing::debug!("POST {url}");
        error::into_response(
            self.agent
                .post(url)
                .set("Authorization", &self.token.bearer())
                .send_json(body),
        )
    }
}
