//! `fabsync commit`: push every workspace change to the connected branch.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use fabsync_client::{git::DEFAULT_COMMIT_MESSAGE, CommitOutcome};

use super::connection::ConnectionArgs;

/// Arguments for `fabsync commit`.
#[derive(Args, Debug)]
pub struct CommitArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Commit message.
    #[arg(long, short, default_value = DEFAULT_COMMIT_MESSAGE)]
    pub message: String,
}

impl CommitArgs {
    pub fn run(self) -> Result<()> {
        let client = self.connection.login()?;
        let workspace = self.connection.workspace();

        let status = client
            .git_status(&workspace)
            .with_context(|| format!("failed to read Git status of '{workspace}'"))?;
        let outcome = client
            .commit_to_git(&workspace, status.workspace_head.as_deref(), &self.message)
            .with_context(|| format!("commit failed for workspace '{workspace}'"))?;

        match outcome {
            CommitOutcome::Committed => {
                println!("{} committed all items of '{workspace}'", "✓".green())
            }
            CommitOutcome::NothingToCommit => {
                println!("{} '{workspace}': nothing to commit", "·".yellow())
            }
        }
        Ok(())
    }
}
