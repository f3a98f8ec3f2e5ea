//! Workspace + credential flags shared by every networked command.

use anyhow::{Context, Result};
use clap::Args;

use fabsync_client::{
    settings::{DEFAULT_API_BASE, DEFAULT_AUTHORITY_BASE},
    ClientSettings, Credentials, FabricClient,
};
use fabsync_core::WorkspaceId;

/// Target workspace and the user identity used to reach it.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Workspace to operate on.
    #[arg(long, alias = "WORKSPACE_ID")]
    pub workspace_id: String,

    /// Directory (tenant) id.
    #[arg(long, alias = "TENANT_ID")]
    pub tenant_id: String,

    /// Application (client) id.
    #[arg(long, alias = "CLIENT_ID")]
    pub client_id: String,

    /// Application secret; omit to authenticate as a public client.
    #[arg(long, alias = "CLIENT_SECRET")]
    pub client_secret: Option<String>,

    /// User principal name.
    #[arg(long, alias = "USER_NAME")]
    pub username: String,

    #[arg(long, alias = "PASSWORD")]
    pub password: String,

    #[arg(long, default_value = DEFAULT_API_BASE, hide = true)]
    pub api_base: String,

    #[arg(long, default_value = DEFAULT_AUTHORITY_BASE, hide = true)]
    pub authority: String,
}

impl ConnectionArgs {
    pub fn workspace(&self) -> WorkspaceId {
        WorkspaceId::from(self.workspace_id.as_str())
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            tenant_id: self.tenant_id.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    fn settings(&self) -> ClientSettings {
        ClientSettings {
            api_base: self.api_base.clone(),
            authority_base: self.authority.clone(),
            ..ClientSettings::default()
        }
    }

    /// Acquire a token and build an authenticated client.
    pub fn login(&self) -> Result<FabricClient> {
        tracing::info!("workspace {}, user {}", self.workspace_id, self.username);
        FabricClient::login(&self.credentials(), self.settings())
            .context("failed to acquire access token")
    }
}
