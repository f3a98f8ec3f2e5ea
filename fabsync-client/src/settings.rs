//! Explicit connection settings and credentials.

use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.fabric.microsoft.com/v1";
pub const DEFAULT_AUTHORITY_BASE: &str = "https://login.microsoftonline.com";
pub const DEFAULT_SCOPE: &str = "https://api.fabric.microsoft.com/.default";

/// User credentials exchanged for a bearer token.
///
/// With a `client_secret` the app authenticates as a confidential client,
/// otherwise as a public client.
#[derive(Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: Option<String>,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "***"))
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Endpoints, timeouts and polling cadence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base: String,
    pub authority_base: String,
    pub scope: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Wait before the first poll of an accepted operation.
    pub initial_poll_delay: Duration,
    pub poll_interval: Duration,
    /// Give up polling after this long.
    pub max_wait: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            authority_base: DEFAULT_AUTHORITY_BASE.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            timeout: Duration::from_secs(120),
            initial_poll_delay: Duration::from_secs(20),
            poll_interval: Duration::from_secs(10),
            max_wait: Duration::from_secs(30 * 60),
        }
    }
}

impl ClientSettings {
    pub(crate) fn agent(&self) -> ureq::Agent {
        ureq::AgentBuilder::new().timeout(self.timeout).build()
    }
}
