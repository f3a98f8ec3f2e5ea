//! Pipeline document discovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{io_err, RewriteError};

/// File name of a pipeline definition in a Git-synced workspace.
pub const PIPELINE_CONTENT_FILE: &str = "pipeline-content.json";

/// Every `pipeline-content.json` under `root`, at any depth, sorted.
///
/// Directory symlinks are not followed; file symlinks are included.
pub fn find_pipeline_documents(root: &Path) -> Result<Vec<PathBuf>, RewriteError> {
    if !root.is_dir() {
        return Err(RewriteError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir).map_err(|e| io_err(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| io_err(&dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
            if file_type.is_dir() {
                pending.push(path);
            } else if entry.file_name() == PIPELINE_CONTENT_FILE
                && (file_type.is_file() || path.is_file())
            {
                found.push(path);
            }
        }
    }
    found.sort();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    #[test]
    fn finds_documents_at_every_depth() {
        let root = TempDir::new().unwrap();
        let shallow = root.path().join("Load.DataPipeline").join(PIPELINE_CONTENT_FILE);
        let deep = root
            .path()
            .join("a")
            .join("b")
            .join("c")
            .join("d")
            .join(PIPELINE_CONTENT_FILE);
        let top = root.path().join(PIPELINE_CONTENT_FILE);
        touch(&shallow);
        touch(&deep);
        touch(&top);

        let found = find_pipeline_documents(root.path()).unwrap();
        let mut expected = vec![shallow, deep, top];
        expected.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn ignores_other_names() {
        let root = TempDir::new().unwrap();
        touch(&root.path().join("x").join("item-content.json"));
        touch(&root.path().join("x").join("pipeline-content.json.bak"));
        touch(&root.path().join("x").join("Pipeline-Content.json"));
        assert!(find_pipeline_documents(root.path()).unwrap().is_empty());
    }

    #[test]
    fn directory_named_like_document_is_descended_not_returned() {
        let root = TempDir::new().unwrap();
        let inner = root
            .path()
            .join(PIPELINE_CONTENT_FILE)
            .join(PIPELINE_CONTENT_FILE);
        touch(&inner);
        assert_eq!(find_pipeline_documents(root.path()).unwrap(), vec![inner]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let root = TempDir::new().unwrap();
        let err = find_pipeline_documents(&root.path().join("absent")).unwrap_err();
        assert!(matches!(err, RewriteError::RootNotFound { .. }));
    }
}
