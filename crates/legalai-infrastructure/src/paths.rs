//! Unified path management for LegalAI client files.
//!
//! All client configuration and snapshot data live under one per-user
//! directory, resolved the same way on every platform.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for the LegalAI client.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/legalai/                   # Config directory (XDG on Linux)
/// ├── config.toml                      # Endpoint configuration
/// └── legalai.conversations.json       # Conversation snapshot (JsonFileStorage)
/// ```
pub struct LegalAiPaths;

impl LegalAiPaths {
    /// Returns the LegalAI configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/legalai/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("legalai"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the directory snapshot files are stored in.
    ///
    /// Snapshots share the config directory; the storage layer namespaces
    /// its keys, so one flat directory is enough.
    pub fn storage_dir() -> Result<PathBuf, PathError> {
        Self::config_dir()
    }
}
