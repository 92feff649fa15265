//! Snapshot persistence port.

use crate::error::Result;

/// The single namespaced key the conversation snapshot lives under.
pub const CONVERSATIONS_KEY: &str = "legalai.conversations";

/// An abstract key-value store for serialized snapshots.
///
/// This trait decouples the conversation store from the concrete storage
/// mechanism (a JSON file on disk in production, a hash map in tests). The
/// contract mirrors browser-profile local storage: one flat namespace of
/// string keys to string payloads, synchronous access, last write wins.
///
/// # Implementation Notes
///
/// Implementations should treat a missing key as `Ok(None)`, not an error.
/// Callers own the serialization; values are opaque strings here.
pub trait SnapshotStorage: Send + Sync {
    /// Reads the payload stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(String))`: Key present
    /// - `Ok(None)`: Key absent
    /// - `Err(_)`: Underlying storage failed
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous payload.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}
