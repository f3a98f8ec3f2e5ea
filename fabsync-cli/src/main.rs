//! fabsync: workspace ⇄ Git promotion helper.
//!
//! # Usage
//!
//! ```text
//! fabsync update  --workspace-id <id> <credentials>
//! fabsync commit  --workspace-id <id> <credentials> [--message <text>]
//! fabsync status  --workspace-id <id> <credentials> [--json]
//! fabsync config  --workspace-id <id> <credentials> [--source-workspace <id>]... [--output <path>]
//! fabsync rewrite [--config <path>] [--root <dir>] [--dry-run] [--fail-fast] [--json]
//! fabsync diff    [--config <path>] [--root <dir>]
//! ```
//!
//! `<credentials>` is `--tenant-id --client-id [--client-secret] --username --password`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    commit::CommitArgs, config::ConfigArgs, diff::DiffArgs, rewrite::RewriteArgs,
    status::StatusArgs, update::UpdateArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "fabsync",
    version,
    about = "Sync analytics workspaces with Git and re-point pipeline linked services",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Update the workspace from its connected Git branch.
    Update(UpdateArgs),

    /// Commit every changed workspace item to Git.
    Commit(CommitArgs),

    /// Show workspace/remote heads and pending changes.
    Status(StatusArgs),

    /// Inventory warehouses and lakehouses and save the linked service config.
    Config(ConfigArgs),

    /// Rewrite linked service references in pipeline-content.json files.
    Rewrite(RewriteArgs),

    /// Show unified diffs of what `rewrite` would change.
    Diff(DiffArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Update(args) => args.run(),
        Commands::Commit(args) => args.run(),
        Commands::Status(args) => args.run(),
        Commands::Config(args) => args.run(),
        Commands::Rewrite(args) => args.run(),
        Commands::Diff(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
