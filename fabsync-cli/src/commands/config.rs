//! `fabsync config`: inventory workspaces and persist the lookup table.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use fabsync_core::{build_config_from_inventory, config_file, WorkspaceId};

use super::connection::ConnectionArgs;

/// Arguments for `fabsync config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Workspace to inventory instead of `--workspace-id`; repeatable.
    /// On a display-name collision a lakehouse always wins over a warehouse;
    /// between two resources of the same kind the later workspace wins.
    #[arg(long = "source-workspace")]
    pub source_workspaces: Vec<String>,

    /// Where to write the table.
    #[arg(long, short, default_value = config_file::DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,
}

impl ConfigArgs {
    pub fn run(self) -> Result<()> {
        let client = self.connection.login()?;

        let sources: Vec<WorkspaceId> = if self.source_workspaces.is_empty() {
            vec![self.connection.workspace()]
        } else {
            self.source_workspaces
                .iter()
                .map(|id| WorkspaceId::from(id.as_str()))
                .collect()
        };

        let mut records = Vec::new();
        for workspace in &sources {
            let found = client
                .inventory(workspace)
                .with_context(|| format!("failed to inventory workspace '{workspace}'"))?;
            records.extend(found);
        }

        let table = build_config_from_inventory(&records);
        config_file::save(&self.output, &table)
            .with_context(|| format!("failed to write {}", self.output.display()))?;

        println!(
            "{} linked service config written: {} ({} entries)",
            "✓".green(),
            self.output.display(),
            table.len()
        );
        Ok(())
    }
}
