//! In-memory snapshot storage.

use std::collections::HashMap;
use std::sync::Mutex;

use legalai_core::error::{LegalAiError, Result};
use legalai_core::SnapshotStorage;

/// A [`SnapshotStorage`] backed by a plain hash map.
///
/// Used by tests and by callers that explicitly want a memory-only session
/// (nothing survives the process). Last write wins, like the real thing.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a key, bypassing the trait. Test convenience.
    pub fn seed(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

impl SnapshotStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| LegalAiError::storage("storage mutex poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| LegalAiError::storage("storage mutex poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("absent").unwrap(), None);
    }

    #[test]
    fn last_write_wins() {
        let storage = MemoryStorage::new();
        storage.write("k", "one").unwrap();
        storage.write("k", "two").unwrap();
        assert_eq!(storage.read("k").unwrap(), Some("two".to_string()));
    }

    #[test]
    fn seed_is_visible_through_read() {
        let storage = MemoryStorage::new();
        storage.seed("k", "seeded");
        assert_eq!(storage.read("k").unwrap(), Some("seeded".to_string()));
    }
}
