//! Lookup-table persistence.
//!
//! The table is handed between processes as a pretty-printed JSON object,
//! conventionally named `linkedservice-config.json`:
//!
//! ```text
//! {
//!     "<display name>": {
//!         "typeProperties": { ... },
//!         "objectId": "...",        (warehouses only)
//!         "name": "<display name>"
//!     }
//! }
//! ```
//!
//! Write flow: serialize → `<file>.tmp` sibling → `rename`, so a reader never
//! observes a half-written table.

use std::path::{Path, PathBuf};

use crate::error::{io_err, ConfigError};
use crate::types::LinkedServiceConfig;

/// Default file name for a persisted table.
pub const DEFAULT_CONFIG_FILE: &str = "linkedservice-config.json";

/// Load a table from `path`.
///
/// Returns `ConfigError::NotFound` if absent, `ConfigError::Parse` (with
/// path) if the content is not a table.
pub fn load(path: &Path) -> Result<LinkedServiceConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Atomically save `table` to `path`, replacing any existing file.
pub fn save(path: &Path, table: &LinkedServiceConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let mut json = serde_json::to_string_pretty(table)?;
    json.push('\n');

    let tmp = tmp_path(path);
    std::fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_config;
    use crate::types::ResourceRecord;
    use tempfile::TempDir;

    fn sample() -> LinkedServiceConfig {
        build_config(
            &[ResourceRecord::warehouse("wh-1", "Sales", "conn", "ws")],
            &[ResourceRecord::lakehouse("lh-1", "Bronze", "ws")],
        )
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        let table = sample();
        save(&path, &table).expect("save");
        let loaded = load(&path).expect("load");
        assert_eq!(loaded, table);
    }

    #[test]
    fn tmp_file_removed_after_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        save(&path, &sample()).expect("save");
        assert!(!tmp_path(&path).exists(), ".tmp must be gone after save");
    }

    #[test]
    fn save_replaces_existing_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        save(&path, &sample()).expect("first save");
        save(&path, &LinkedServiceConfig::new()).expect("second save");
        assert!(load(&path).expect("load").is_empty());
    }

    #[test]
    fn load_missing_returns_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn tmp_path_is_sibling() {
        let p = Path::new("/a/b/linkedservice-config.json");
        assert_eq!(tmp_path(p), Path::new("/a/b/linkedservice-config.json.tmp"));
    }
}
