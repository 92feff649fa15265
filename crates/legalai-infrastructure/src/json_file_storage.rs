//! JSON-file-backed snapshot storage with atomic writes.

use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use legalai_core::error::{LegalAiError, Result};
use legalai_core::SnapshotStorage;

use crate::paths::LegalAiPaths;

/// A [`SnapshotStorage`] that keeps each key in its own JSON file.
///
/// A key `k` maps to `<base_dir>/k.json`. Writes go through a temporary
/// file, an fsync, and an atomic rename, so a crash mid-write leaves either
/// the old snapshot or the new one on disk, never a torn file.
///
/// Keys are internal constants (`legalai.conversations`), not user input;
/// no path sanitization is applied.
pub struct JsonFileStorage {
    base_dir: PathBuf,
}

impl JsonFileStorage {
    /// Creates a storage rooted at `base_dir`, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)
            .map_err(|e| LegalAiError::storage(format!("Failed to create {base_dir:?}: {e}")))?;
        Ok(Self { base_dir })
    }

    /// Creates a storage at the default per-user location.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be
    /// determined or created.
    pub fn default_location() -> Result<Self> {
        let dir = LegalAiPaths::storage_dir()
            .map_err(|e| LegalAiError::config(e.to_string()))?;
        Self::new(dir)
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

impl SnapshotStorage for JsonFileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| LegalAiError::storage(format!("Failed to read {path:?}: {e}")))?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(content))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        let tmp_path = self.base_dir.join(format!("{key}.json.tmp"));

        // Write to temporary file in the same directory
        let mut tmp_file = File::create(&tmp_path)
            .map_err(|e| LegalAiError::storage(format!("Failed to create {tmp_path:?}: {e}")))?;
        tmp_file
            .write_all(value.as_bytes())
            .map_err(|e| LegalAiError::storage(format!("Failed to write {tmp_path:?}: {e}")))?;

        // Ensure data is written to disk
        tmp_file
            .sync_all()
            .map_err(|e| LegalAiError::storage(format!("Failed to sync {tmp_path:?}: {e}")))?;
        drop(tmp_file);

        // Atomic rename
        fs::rename(&tmp_path, &path)
            .map_err(|e| LegalAiError::storage(format!("Failed to rename into {path:?}: {e}")))?;

        tracing::debug!("Persisted snapshot key '{key}' ({} bytes)", value.len());
        Ok(())
    }
}
