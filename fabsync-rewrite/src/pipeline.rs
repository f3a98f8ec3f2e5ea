//! Batch rewrite entrypoint used by the CLI.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use fabsync_core::{config_file, LinkedServiceConfig};

use crate::discover::find_pipeline_documents;
use crate::error::RewriteError;
use crate::reference::ReferenceTable;
use crate::writer::{rewrite_file, FileOutcome};

/// What to do when a document cannot be read, parsed, or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log a warning, record [`FileOutcome::Failed`], move on.
    #[default]
    Continue,
    /// Stop at the first failure and return its error.
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewriteOptions {
    pub dry_run: bool,
    pub failure_policy: FailurePolicy,
}

/// Result of one batch run.
#[derive(Debug)]
pub struct RewriteReport {
    pub root: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub files: Vec<FileOutcome>,
}

impl RewriteReport {
    /// Files replaced on disk, or that would be in a dry run.
    pub fn rewritten(&self) -> usize {
        self.count(|f| {
            matches!(
                f,
                FileOutcome::Rewritten { .. } | FileOutcome::WouldRewrite { .. }
            )
        })
    }

    pub fn unchanged(&self) -> usize {
        self.count(|f| matches!(f, FileOutcome::Unchanged { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|f| matches!(f, FileOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(f)).count()
    }
}

/// Rewrite every pipeline document under `root` against `config`.
///
/// Documents are independent: each is read, rewritten, and written before
/// the next is opened.
pub fn rewrite_all(
    config: &LinkedServiceConfig,
    root: &Path,
    options: &RewriteOptions,
) -> Result<RewriteReport, RewriteError> {
    let started_at = Utc::now();
    let table = ReferenceTable::from_config(config)?;
    if table.is_empty() {
        tracing::warn!("lookup table is empty; no reference will match");
    }
    let documents = find_pipeline_documents(root)?;
    tracing::debug!(
        "found {} pipeline documents under {} ({} linked services in table)",
        documents.len(),
        root.display(),
        table.len()
    );

    let mut files = Vec::with_capacity(documents.len());
    for path in documents {
        match rewrite_file(&path, &table, options.dry_run) {
            Ok(outcome) => files.push(outcome),
            Err(error) => match options.failure_policy {
                FailurePolicy::Abort => return Err(error),
                FailurePolicy::Continue => {
                    tracing::warn!("skipping {}: {error}", path.display());
                    files.push(FileOutcome::Failed { path, error });
                }
            },
        }
    }

    Ok(RewriteReport {
        root: root.to_path_buf(),
        started_at,
        finished_at: Utc::now(),
        files,
    })
}

/// Load the lookup table from `config_path`, then [`rewrite_all`].
///
/// A table that cannot be loaded fails the call before any document is
/// opened.
pub fn rewrite_all_from_file(
    config_path: &Path,
    root: &Path,
    options: &RewriteOptions,
) -> Result<RewriteReport, RewriteError> {
    let config = config_file::load(config_path)?;
    rewrite_all(&config, root, options)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::discover::PIPELINE_CONTENT_FILE;

    fn config() -> LinkedServiceConfig {
        serde_json::from_value(json!({
            "Sales": {"typeProperties": {"artifactId": "wh-prod"}}
        }))
        .unwrap()
    }

    fn write_doc(root: &Path, dir: &str, body: &str) -> PathBuf {
        let path = root.join(dir).join(PIPELINE_CONTENT_FILE);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, body).unwrap();
        path
    }

    const MATCHING: &str =
        r#"{"linkedService": {"name": "Sales", "properties": {"typeProperties": {}}}}"#;

    #[test]
    fn empty_root_gives_empty_report() {
        let root = TempDir::new().unwrap();
        let report = rewrite_all(&config(), root.path(), &RewriteOptions::default()).unwrap();
        assert!(report.files.is_empty());
        assert!(report.finished_at >= report.started_at);
    }

    #[test]
    fn continue_policy_skips_bad_document() {
        let root = TempDir::new().unwrap();
        write_doc(root.path(), "a", "{ broken");
        let good = write_doc(root.path(), "b", MATCHING);

        let report = rewrite_all(&config(), root.path(), &RewriteOptions::default()).unwrap();
        assert_eq!(report.failed(), 1);
        assert_eq!(report.rewritten(), 1);
        assert!(fs::read_to_string(good).unwrap().contains("wh-prod"));
    }

    #[test]
    fn abort_policy_returns_first_error() {
        let root = TempDir::new().unwrap();
        write_doc(root.path(), "a", "{ broken");
        let untouched = write_doc(root.path(), "b", MATCHING);

        let options = RewriteOptions {
            dry_run: false,
            failure_policy: FailurePolicy::Abort,
        };
        let err = rewrite_all(&config(), root.path(), &options).unwrap_err();
        assert!(matches!(err, RewriteError::Parse { .. }));
        assert_eq!(fs::read_to_string(untouched).unwrap(), MATCHING);
    }

    #[test]
    fn missing_config_fails_before_touching_documents() {
        let root = TempDir::new().unwrap();
        let doc = write_doc(root.path(), "a", MATCHING);

        let err = rewrite_all_from_file(
            &root.path().join("absent.json"),
            root.path(),
            &RewriteOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RewriteError::Config(_)));
        assert_eq!(fs::read_to_string(doc).unwrap(), MATCHING);
    }
}
