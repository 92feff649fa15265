//! Storage adapters for the LegalAI client.
//!
//! Concrete implementations of the `SnapshotStorage` port defined in
//! `legalai-core`, plus unified path management for the client's on-disk
//! footprint.

pub mod json_file_storage;
pub mod memory_storage;
pub mod paths;

pub use crate::json_file_storage::JsonFileStorage;
pub use crate::memory_storage::MemoryStorage;
pub use crate::paths::LegalAiPaths;
