//! Endpoint configuration for the Query Service.
//!
//! Supports reading `~/.config/legalai/config.toml`, with the
//! `LEGALAI_API_URL` environment variable taking precedence.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the Query Service backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServiceConfig {
    /// Loads the configuration file from ~/.config/legalai/config.toml
    ///
    /// # Errors
    ///
    /// Returns an error string if the file is missing or unparseable.
    pub fn load() -> Result<Self, String> {
        let config_path = get_config_path()?;

        if !config_path.exists() {
            return Err(format!(
                "Configuration file not found at: {}",
                config_path.display()
            ));
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            format!(
                "Failed to read configuration file at {}: {}",
                config_path.display(),
                e
            )
        })?;

        Self::parse(&content).map_err(|e| {
            format!(
                "Failed to parse configuration file at {}: {}",
                config_path.display(),
                e
            )
        })
    }

    /// Best-effort resolution: config file if present and valid, defaults
    /// otherwise, `LEGALAI_API_URL` on top of either.
    ///
    /// A broken config file is logged and ignored rather than refusing to
    /// start; the chat UI must come up regardless.
    pub fn resolve() -> Self {
        let mut config = match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("Using default service config: {e}");
                Self::default()
            }
        };

        if let Ok(url) = std::env::var("LEGALAI_API_URL") {
            if !url.trim().is_empty() {
                config.base_url = url.trim().trim_end_matches('/').to_string();
            }
        }

        config
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }
}

/// Returns the path to the configuration file: ~/.config/legalai/config.toml
fn get_config_path() -> Result<PathBuf, String> {
    let config_dir =
        dirs::config_dir().ok_or_else(|| "Could not determine config directory".to_string())?;
    Ok(config_dir.join("legalai").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ServiceConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn parses_full_config() {
        let config =
            ServiceConfig::parse("base_url = \"https://api.legalai.in\"\ntimeout_secs = 20\n")
                .unwrap();
        assert_eq!(config.base_url, "https://api.legalai.in");
        assert_eq!(config.timeout_secs, 20);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = ServiceConfig::parse("base_url = \"http://10.0.0.5:8000/\"").unwrap();
        assert_eq!(config.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let config = ServiceConfig::parse("").unwrap();
        assert_eq!(config.base_url, ServiceConfig::default().base_url);
    }
}
