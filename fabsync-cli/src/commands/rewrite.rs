//! `fabsync rewrite`: re-point linked services in a Git export.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use fabsync_core::config_file;
use fabsync_rewrite::{rewrite_all, FailurePolicy, FileOutcome, RewriteOptions, RewriteReport};

/// Arguments for `fabsync rewrite`.
#[derive(Args, Debug)]
pub struct RewriteArgs {
    /// Lookup table produced by `fabsync config`.
    #[arg(long, default_value = config_file::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding the Git export to scan.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Report what would change without writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Stop at the first document that cannot be processed.
    #[arg(long)]
    pub fail_fast: bool,

    /// Emit a machine-readable report.
    #[arg(long)]
    pub json: bool,
}

impl RewriteArgs {
    pub fn run(self) -> Result<()> {
        let config = config_file::load(&self.config)
            .with_context(|| format!("failed to load {}", self.config.display()))?;

        let options = RewriteOptions {
            dry_run: self.dry_run,
            failure_policy: if self.fail_fast {
                FailurePolicy::Abort
            } else {
                FailurePolicy::Continue
            },
        };
        let report = rewrite_all(&config, &self.root, &options)
            .with_context(|| format!("rewrite failed under {}", self.root.display()))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&ReportJson::from(&report))?);
        } else {
            print_report(&report, self.dry_run);
        }

        let failed = report.failed();
        if failed > 0 {
            bail!("{failed} pipeline document(s) could not be processed");
        }
        Ok(())
    }
}

fn print_report(report: &RewriteReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    for file in &report.files {
        match file {
            FileOutcome::Rewritten { path, references } => {
                println!("  ✎  {} ({references} references)", path.display())
            }
            FileOutcome::WouldRewrite { path, references } => {
                println!("  ~  {} ({references} references)", path.display())
            }
            FileOutcome::Unchanged { path } => println!("  ·  {}", path.display()),
            FileOutcome::Failed { path, error } => {
                println!("  {}  {}: {error}", "✗".red(), path.display())
            }
        }
    }

    if report.files.is_empty() {
        println!(
            "{prefix}no pipeline-content.json files under {}",
            report.root.display()
        );
        return;
    }

    let mark = if report.failed() > 0 {
        "!".red()
    } else {
        "✓".green()
    };
    println!(
        "{prefix}{mark} {} rewritten, {} unchanged, {} failed",
        report.rewritten(),
        report.unchanged(),
        report.failed()
    );
}

// ---------------------------------------------------------------------------
// JSON report
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ReportJson {
    root: String,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    rewritten: usize,
    unchanged: usize,
    failed: usize,
    files: Vec<FileJson>,
}

#[derive(Serialize)]
struct FileJson {
    path: String,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    references: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<&RewriteReport> for ReportJson {
    fn from(report: &RewriteReport) -> Self {
        Self {
            root: report.root.display().to_string(),
            started_at: report.started_at,
            finished_at: report.finished_at,
            rewritten: report.rewritten(),
            unchanged: report.unchanged(),
            failed: report.failed(),
            files: report.files.iter().map(FileJson::from).collect(),
        }
    }
}

impl From<&FileOutcome> for FileJson {
    fn from(file: &FileOutcome) -> Self {
        let (outcome, references, error) = match file {
            FileOutcome::Rewritten { references, .. } => ("rewritten", Some(*references), None),
            FileOutcome::WouldRewrite { references, .. } => {
                ("would_rewrite", Some(*references), None)
            }
            FileOutcome::Unchanged { .. } => ("unchanged", None, None),
            FileOutcome::Failed { error, .. } => ("failed", None, Some(error.to_string())),
        };
        Self {
            path: file.path().display().to_string(),
            outcome,
            references,
            error,
        }
    }
}
