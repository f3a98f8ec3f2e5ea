//! Workspace ⇄ Git synchronization calls.

use serde::{Deserialize, Serialize};

use fabsync_core::WorkspaceId;

use crate::error::{decode, http_error, ClientError};
use crate::FabricClient;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Result of `GET /workspaces/{id}/git/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitStatus {
    /// Null for a workspace that has never been synced.
    pub workspace_head: Option<String>,
    pub remote_commit_hash: String,
    #[serde(default)]
    pub changes: Vec<GitChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitChange {
    pub item_metadata: ItemMetadata,
    pub workspace_change: Option<String>,
    pub remote_change: Option<String>,
    pub conflict_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    pub item_type: String,
    pub display_name: String,
    #[serde(default)]
    pub item_identifier: Option<ItemIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemIdentifier {
    pub object_id: Option<String>,
    pub logical_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateFromGitRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    workspace_head: Option<&'a str>,
    remote_commit_hash: &'a str,
    conflict_resolution: ConflictResolution,
    options: UpdateOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConflictResolution {
    conflict_resolution_type: &'static str,
    conflict_resolution_policy: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateOptions {
    allow_override_items: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CommitToGitRequest<'a> {
    mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    workspace_head: Option<&'a str>,
    comment: &'a str,
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The service applied the update synchronously.
    Completed { remote_commit_hash: String },
    /// The update was accepted and polled to completion.
    Polled {
        remote_commit_hash: String,
        polls: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// The service rejected the commit because nothing changed.
    NothingToCommit,
}

pub const DEFAULT_COMMIT_MESSAGE: &str = "Committing all items from Fabric workspace to Git";

// ---------------------------------------------------------------------------
// Calls
// ---------------------------------------------------------------------------

impl FabricClient {
    pub fn git_status(&self, workspace: &WorkspaceId) -> Result<GitStatus, ClientError> {
        let response = self.get(&self.workspace_url(workspace, "git/status"))?;
        if response.status() != 200 {
            return Err(http_error(response));
        }
        let status: GitStatus = decode(response)?;
        tracing::info!(
            "workspace head {}, remote commit {}",
            status.workspace_head.as_deref().unwrap_or("<none>"),
            status.remote_commit_hash
        );
        Ok(status)
    }

    /// Bring the workspace up to the connected branch's head.
    ///
    /// Conflicts resolve in favour of the remote branch and items may be
    /// overwritten.
    pub fn update_from_git(&self, workspace: &WorkspaceId) -> Result<UpdateOutcome, ClientError> {
        let status = self.git_status(workspace)?;
        let request = UpdateFromGitRequest {
            workspace_head: status.workspace_head.as_deref(),
            remote_commit_hash: &status.remote_commit_hash,
            conflict_resolution: ConflictResolution {
                conflict_resolution_type: "Workspace",
                conflict_resolution_policy: "PreferRemote",
            },
            options: UpdateOptions {
                allow_override_items: true,
            },
        };

        tracing::info!("updating workspace {workspace} from Git");
        let response =
            self.post_json(&self.workspace_url(workspace, "git/updateFromGit"), &request)?;
        match response.status() {
            200 => Ok(UpdateOutcome::Completed {
                remote_commit_hash: status.remote_commit_hash,
            }),
            202 => {
                let state = self.follow_accepted(response)?;
                Ok(UpdateOutcome::Polled {
                    remote_commit_hash: status.remote_commit_hash,
                    polls: state.polls,
                })
            }
            _ => Err(http_error(response)),
        }
    }

    /// Commit every changed workspace item to the connected branch.
    pub fn commit_to_git(
        &self,
        workspace: &WorkspaceId,
        workspace_head: Option<&str>,
        message: &str,
    ) -> Result<CommitOutcome, ClientError> {
        let request = CommitToGitRequest {
            mode: "All",
            workspace_head,
            comment: message,
        };
        tracing::info!("committing all items of workspace {workspace}");
        let response =
            self.post_json(&self.workspace_url(workspace, "git/commitToGit"), &request)?;
        match response.status() {
            200 => Ok(CommitOutcome::Committed),
            202 => {
                self.follow_accepted(response)?;
                Ok(CommitOutcome::Committed)
            }
            400 => {
                tracing::warn!("no changed items to commit");
                Ok(CommitOutcome::NothingToCommit)
            }
            _ => Err(http_error(response)),
        }
    }

    fn follow_accepted(
        &self,
        response: ureq::Response,
    ) -> Result<crate::OperationState, ClientError> {
        let location = response
            .header("Location")
            .map(str::to_string)
            .ok_or(ClientError::MissingLocation)?;
        tracing::info!("request accepted; polling {location}");
        std::thread::sleep(self.settings.initial_poll_delay);
        self.poll_operation(&location)
    }
}
