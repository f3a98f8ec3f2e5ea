//! Identity-provider token exchange (resource-owner password grant).

use std::fmt;

use serde::Deserialize;

use crate::error::{into_response, ClientError};
use crate::settings::{ClientSettings, Credentials};

/// Bearer token for workspace API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// `{authority}/{tenant}/oauth2/v2.0/token`
pub fn token_url(settings: &ClientSettings, tenant_id: &str) -> String {
    format!(
        "{}/{}/oauth2/v2.0/token",
        settings.authority_base.trim_end_matches('/'),
        tenant_id
    )
}

/// Exchange user credentials for an access token.
pub fn acquire_token(
    credentials: &Credentials,
    settings: &ClientSettings,
) -> Result<AccessToken, ClientError> {
    tracing::info!("requesting access token for {}", credentials.username);

    let mut form: Vec<(&str, &str)> = vec![
        ("grant_type", "password"),
        ("client_id", credentials.client_id.as_str()),
        ("username", credentials.username.as_str()),
        ("password", credentials.password.as_str()),
        ("scope", settings.scope.as_str()),
    ];
    if let Some(secret) = credentials.client_secret.as_deref() {
        form.push(("client_secret", secret));
    }

    let url = token_url(settings, &credentials.tenant_id);
    let response = into_response(settings.agent().post(&url).send_form(&form))?;
    let status = response.status();
    let body: TokenResponse = response
        .into_json()
        .map_err(|e| ClientError::Decode(e.to_string()))?;

    match body.access_token {
        Some(token) if status == 200 => Ok(AccessToken(token)),
        _ => Err(ClientError::Auth {
            error: body.error.unwrap_or_else(|| format!("HTTP {status}")),
            description: body.error_description.unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_url_joins_tenant() {
        let mut s = ClientSettings::default();
        assert_eq!(
            token_url(&s, "contoso"),
            "https://login.microsoftonline.com/contoso/oauth2/v2.0/token"
        );
        s.authority_base = "http://127.0.0.1:9/".into();
        assert_eq!(token_url(&s, "t"), "http://127.0.0.1:9/t/oauth2/v2.0/token");
    }

    #[test]
    fn token_debug_is_redacted() {
        assert_eq!(format!("{:?}", AccessToken("abc".into())), "AccessToken(***)");
    }
}
