//! Error types for fabsync-client.

use std::time::Duration;

use thiserror::Error;

/// All errors that can arise from identity-provider and workspace calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The token endpoint refused the credentials.
    #[error("token request rejected: {error}: {description}")]
    Auth { error: String, description: String },

    /// The service answered with an unexpected status code.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Connection, DNS, TLS or timeout failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// A 202 response carried no `Location` header to poll.
    #[error("accepted response is missing a Location header")]
    MissingLocation,

    /// The long-running operation reached a terminal state other than success.
    #[error("operation finished with status '{status}'")]
    OperationFailed { status: String },

    /// The long-running operation was still running after the allowed wait.
    #[error("operation still running after {waited:?}")]
    OperationTimedOut { waited: Duration },
}

/// Turn ureq's status-code errors back into responses so callers can branch
/// on the status themselves.
pub(crate) fn into_response(
    result: Result<ureq::Response, ureq::Error>,
) -> Result<ureq::Response, ClientError> {
    match result {
        Ok(response) => Ok(response),
        Err(ureq::Error::Status(_, response)) => Ok(response),
        Err(ureq::Error::Transport(t)) => Err(ClientError::Transport(t.to_string())),
    }
}

/// [`ClientError::Http`] from a response the caller did not expect.
pub(crate) fn http_error(response: ureq::Response) -> ClientError {
    let status = response.status();
    let body = response.into_string().unwrap_or_default();
    ClientError::Http { status, body }
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    response: ureq::Response,
) -> Result<T, ClientError> {
    response
        .into_json()
        .map_err(|e| ClientError::Decode(e.to_string()))
}
