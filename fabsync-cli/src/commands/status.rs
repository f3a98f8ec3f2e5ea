//! `fabsync status`: heads and pending changes between workspace and branch.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use fabsync_client::{GitChange, GitStatus};

use super::connection::ConnectionArgs;

/// Arguments for `fabsync status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct ChangeRow {
    #[tabled(rename = "item")]
    item: String,
    #[tabled(rename = "type")]
    item_type: String,
    #[tabled(rename = "workspace")]
    workspace_change: String,
    #[tabled(rename = "remote")]
    remote_change: String,
    #[tabled(rename = "conflict")]
    conflict: String,
}

impl From<&GitChange> for ChangeRow {
    fn from(change: &GitChange) -> Self {
        let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        Self {
            item: change.item_metadata.display_name.clone(),
            item_type: change.item_metadata.item_type.clone(),
            workspace_change: or_dash(&change.workspace_change),
            remote_change: or_dash(&change.remote_change),
            conflict: or_dash(&change.conflict_type),
        }
    }
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let client = self.connection.login()?;
        let workspace = self.connection.workspace();
        let status = client
            .git_status(&workspace)
            .with_context(|| format!("failed to read Git status of '{workspace}'"))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&status)?);
            return Ok(());
        }

        print_status(&workspace.0, &status);
        Ok(())
    }
}

fn print_status(workspace: &str, status: &GitStatus) {
    println!("workspace       {}", workspace.bold());
    println!(
        "workspace head  {}",
        status.workspace_head.as_deref().unwrap_or("<none>")
    );
    println!("remote commit   {}", status.remote_commit_hash);

    if status.changes.is_empty() {
        println!("{} in sync, no pending changes", "✓".green());
        return;
    }

    let rows: Vec<ChangeRow> = status.changes.iter().map(ChangeRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!("{} pending change(s)", status.changes.len());
}
