use super::StorageBackend;
use crate::error::{Result, SanctuaryError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const ITEM_EXT: &str = ".json";

/// File-backed storage: each key lives in `<root>/<key>.json`.
///
/// ```text
/// <data dir>/
/// ├── config.json      # SanctuaryConfig (not managed by this backend)
/// ├── resources.json
/// └── tags.json
/// ```
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn item_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(SanctuaryError::Storage(format!(
                "Invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.root.join(format!("{}{}", key, ITEM_EXT)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(SanctuaryError::Io)?;
        }
        Ok(())
    }

    fn item_paths(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(SanctuaryError::Io)? {
            let path = entry.map_err(SanctuaryError::Io)?.path();
            let is_item = path.is_file()
                && path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .map(|name| name.ends_with(ITEM_EXT) && name != "config.json")
                    .unwrap_or(false);
            if is_item {
                paths.push(path);
            }
        }
        Ok(paths)
    }
}

impl StorageBackend for FsBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(SanctuaryError::Io)?;
        Ok(Some(content))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;
        self.ensure_dir()?;

        // Atomic write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(SanctuaryError::Io)?;
        fs::rename(&tmp_path, path).map_err(SanctuaryError::Io)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;
        if path.exists() {
            fs::remove_file(path).map_err(SanctuaryError::Io)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        for path in self.item_paths()? {
            fs::remove_file(path).map_err(SanctuaryError::Io)?;
        }
        Ok(())
    }
}
