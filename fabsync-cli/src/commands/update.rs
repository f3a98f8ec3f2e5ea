//! `fabsync update`: pull the connected branch into the workspace.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use fabsync_client::UpdateOutcome;

use super::connection::ConnectionArgs;

/// Arguments for `fabsync update`.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl UpdateArgs {
    pub fn run(self) -> Result<()> {
        let client = self.connection.login()?;
        let workspace = self.connection.workspace();
        let outcome = client
            .update_from_git(&workspace)
            .with_context(|| format!("update from Git failed for workspace '{workspace}'"))?;

        match outcome {
            UpdateOutcome::Completed { remote_commit_hash } => println!(
                "{} workspace '{workspace}' updated to {remote_commit_hash}",
                "✓".green()
            ),
            UpdateOutcome::Polled {
                remote_commit_hash,
                polls,
            } => println!(
                "{} workspace '{workspace}' updated to {remote_commit_hash} ({polls} status checks)",
                "✓".green()
            ),
        }
        Ok(())
    }
}
