//! Per-document rewrite and atomic writer.
//!
//! ## `rewrite_file` flow
//!
//! 1. Read the document and parse it.
//! 2. Rewrite references in memory.
//! 3. Skip if nothing changed (the file is not touched).
//! 4. Serialize with 2-space indentation, keeping a trailing newline if the
//!    original had one.
//! 5. Write to `<target>.fabsync.tmp` next to the real file (symlinks are
//!    resolved), copy the original permissions, then rename over it.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{io_err, RewriteError};
use crate::reference::{rewrite_value, ReferenceTable, RewriteStats};

// ---------------------------------------------------------------------------
// File outcome
// ---------------------------------------------------------------------------

/// Outcome of processing a single document.
#[derive(Debug)]
pub enum FileOutcome {
    /// References were updated and the file was replaced.
    Rewritten { path: PathBuf, references: usize },
    /// Dry run: the file *would* have been replaced.
    WouldRewrite { path: PathBuf, references: usize },
    /// Nothing to change; the file was left alone.
    Unchanged { path: PathBuf },
    /// The document could not be processed.
    Failed { path: PathBuf, error: RewriteError },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Rewritten { path, .. }
            | FileOutcome::WouldRewrite { path, .. }
            | FileOutcome::Unchanged { path }
            | FileOutcome::Failed { path, .. } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

/// A document before and after rewriting.
#[derive(Debug, Clone)]
pub(crate) struct RenderedDocument {
    pub original: String,
    pub rendered: String,
    pub stats: RewriteStats,
}

pub(crate) fn render_document(
    path: &Path,
    table: &ReferenceTable,
) -> Result<RenderedDocument, RewriteError> {
    let original = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let mut document = parse_document(path, &original)?;

    let stats = rewrite_value(&mut document, table);

    let rendered = if stats.changed {
        let mut text = serde_json::to_string_pretty(&document)?;
        if original.ends_with('\n') {
            text.push('\n');
        }
        text
    } else {
        original.clone()
    };

    Ok(RenderedDocument {
        original,
        rendered,
        stats,
    })
}

/// Parse without serde_json's nesting limit. Deep documents grow the stack
/// on the heap instead of overflowing it.
fn parse_document(path: &Path, text: &str) -> Result<Value, RewriteError> {
    let parse_err = |source: serde_json::Error| RewriteError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let document =
        Value::deserialize(serde_stacker::Deserializer::new(&mut de)).map_err(parse_err)?;
    de.end().map_err(parse_err)?;
    Ok(document)
}

// ---------------------------------------------------------------------------
// rewrite_file
// ---------------------------------------------------------------------------

/// Rewrite the references in one document.
///
/// Errors are returned, not folded into [`FileOutcome::Failed`]; the caller
/// decides whether a failure stops the batch.
pub fn rewrite_file(
    path: &Path,
    table: &ReferenceTable,
    dry_run: bool,
) -> Result<FileOutcome, RewriteError> {
    let doc = render_document(path, table)?;
    let references = doc.stats.references_matched;

    if !doc.stats.changed {
        tracing::debug!(
            "unchanged: {} ({} references, {} matched)",
            path.display(),
            doc.stats.references_seen,
            references
        );
        return Ok(FileOutcome::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would rewrite: {}", path.display());
        return Ok(FileOutcome::WouldRewrite {
            path: path.to_path_buf(),
            references,
        });
    }

    atomic_write(path, &doc.rendered)?;
    tracing::info!("rewrote: {} ({references} references)", path.display());
    Ok(FileOutcome::Rewritten {
        path: path.to_path_buf(),
        references,
    })
}

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

/// Replace the file behind `path`. A symlink stays a symlink: its target is
/// the file that gets replaced.
pub(crate) fn atomic_write(path: &Path, content: &str) -> Result<(), RewriteError> {
    let target = std::fs::canonicalize(path).map_err(|e| io_err(path, e))?;
    let tmp = PathBuf::from(format!("{}.fabsync.tmp", target.display()));
    atomic_write_with_tmp(&target, content, &tmp)
}

fn atomic_write_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<(), RewriteError> {
    let permissions = std::fs::metadata(path).ok().map(|meta| meta.permissions());
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;
    if let Some(permissions) = permissions {
        if let Err(e) = std::fs::set_permissions(tmp, permissions) {
            let _ = std::fs::remove_file(tmp);
            return Err(io_err(tmp, e));
        }
    }
    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
