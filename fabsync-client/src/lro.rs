//! Long-running operation polling.
//!
//! An accepted (202) request hands back a `Location` URL. Polling that URL
//! yields a body with a `status` field; `NotStarted` and `Running` mean keep
//! waiting, anything else is terminal.

use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::error::{http_error, ClientError};
use crate::FabricClient;

const RUNNING_STATES: [&str; 2] = ["NotStarted", "Running"];
const SUCCEEDED: &str = "Succeeded";

/// Terminal state of a successfully finished operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationState {
    pub status: String,
    pub polls: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Default, Deserialize)]
struct OperationBody {
    #[serde(alias = "Status")]
    status: Option<String>,
}

/// Whether `status` means the operation has not finished yet.
pub fn is_running(status: &str) -> bool {
    RUNNING_STATES.contains(&status)
}

impl FabricClient {
    /// Poll `location` until the operation leaves the running states.
    ///
    /// An HTTP 200 without a status is treated as success.
    pub fn poll_operation(&self, location: &str) -> Result<OperationState, ClientError> {
        let started = Instant::now();
        let mut polls = 0usize;
        loop {
            let response = self.get(location)?;
            polls += 1;
            let code = response.status();
            if code >= 400 {
                return Err(http_error(response));
            }
            let body: OperationBody = response.into_json().unwrap_or_default();

            let status = match body.status {
                Some(status) => status,
                None if code == 200 => SUCCEEDED.to_string(),
                None => "Running".to_string(),
            };

            if !is_running(&status) {
                let state = OperationState {
                    status,
                    polls,
                    elapsed: started.elapsed(),
                };
                if state.status == SUCCEEDED {
                    tracing::info!(
                        "operation completed after {} polls in {}s",
                        state.polls,
                        state.elapsed.as_secs()
                    );
                    return Ok(state);
                }
                return Err(ClientError::OperationFailed {
                    status: state.status,
                });
            }

            let waited = started.elapsed();
            if waited >= self.settings.max_wait {
                return Err(ClientError::OperationTimedOut { waited });
            }
            tracing::info!("operation still {status}...");
            std::thread::sleep(self.settings.poll_interval);
        }
    }
}
