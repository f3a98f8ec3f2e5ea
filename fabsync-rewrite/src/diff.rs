//! Unified diffs of what a rewrite would change.

use std::path::{Path, PathBuf};

use similar::TextDiff;

use fabsync_core::LinkedServiceConfig;

use crate::discover::find_pipeline_documents;
use crate::reference::ReferenceTable;
use crate::writer::render_document;
use crate::RewriteError;

/// A single document diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Diff every pipeline document under `root` against its rewritten form.
///
/// No files are written. Documents that would not change are omitted.
pub fn diff_all(config: &LinkedServiceConfig, root: &Path) -> Result<Vec<FileDiff>, RewriteError> {
    let table = ReferenceTable::from_config(config)?;
    let mut diffs = Vec::new();

    for path in find_pipeline_documents(root)? {
        let doc = render_document(&path, &table)?;
        if !doc.stats.changed {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path.as_path());
        let old_header = format!("a/{}", relative.display());
        let new_header = format!("b/{}", relative.display());
        let unified = TextDiff::from_lines(&doc.original, &doc.rendered)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();

        diffs.push(FileDiff {
            path,
            unified_diff: unified,
        });
    }

    Ok(diffs)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::{rewrite_all, RewriteOptions, PIPELINE_CONTENT_FILE};

    fn config() -> LinkedServiceConfig {
        serde_json::from_value(json!({
            "Sales": {"typeProperties": {"artifactId": "wh-prod"}}
        }))
        .unwrap()
    }

    const DOC: &str = r#"{
  "linkedService": {
    "name": "Sales",
    "properties": {
      "typeProperties": {
        "artifactId": "wh-dev"
      }
    }
  }
}"#;

    #[test]
    fn diff_shows_replaced_artifact() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("Load.DataPipeline");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PIPELINE_CONTENT_FILE), DOC).unwrap();

        let diffs = diff_all(&config(), root.path()).unwrap();
        assert_eq!(diffs.len(), 1);
        let text = &diffs[0].unified_diff;
        assert!(text.contains("a/Load.DataPipeline/pipeline-content.json"));
        assert!(text.contains("-        \"artifactId\": \"wh-dev\""));
        assert!(text.contains("+        \"artifactId\": \"wh-prod\""));
        assert_eq!(fs::read_to_string(dir.join(PIPELINE_CONTENT_FILE)).unwrap(), DOC);
    }

    #[test]
    fn no_diffs_after_rewrite() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(PIPELINE_CONTENT_FILE), DOC).unwrap();
        rewrite_all(&config(), root.path(), &RewriteOptions::default()).unwrap();
        assert!(diff_all(&config(), root.path()).unwrap().is_empty());
    }
}
