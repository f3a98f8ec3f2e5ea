//! `fabsync diff`: show unified diffs for what `rewrite` would change.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use fabsync_core::config_file;
use fabsync_rewrite::diff_all;

/// Arguments for `fabsync diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Lookup table produced by `fabsync config`.
    #[arg(long, default_value = config_file::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding the Git export to scan.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let config = config_file::load(&self.config)
            .with_context(|| format!("failed to load {}", self.config.display()))?;
        let diffs = diff_all(&config, &self.root)
            .with_context(|| format!("diff failed under {}", self.root.display()))?;

        if diffs.is_empty() {
            println!("No differences under {}.", self.root.display());
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }
        Ok(())
    }
}
