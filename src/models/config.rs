//! Configuration model.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_OMDB_URL: &str = "http://www.omdbapi.com/";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OMDb configuration.
    pub omdb: OmdbConfig,
}

/// OMDb configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OmdbConfig {
    /// Base URL of the API.
    pub base_url: String,
    /// API key.
    pub api_key: Option<String>,
    /// Request timeout in seconds. No timeout when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OMDB_URL.to_string(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Apply `OMDB_API_KEY` and `OMDB_URL` environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("OMDB_API_KEY") {
            if !key.trim().is_empty() {
                self.omdb.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("OMDB_URL") {
            if !url.trim().is_empty() {
                self.omdb.base_url = url;
            }
        }
        self
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("imdb_renamer")
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Load configuration.
///
/// An explicit path must exist and parse. Without one, the user config
/// directory is tried and defaults are used when it has no config file.
/// Environment overrides are applied last.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match explicit {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| {
                crate::Error::Config(format!("cannot read {}: {}", path.display(), e))
            })?;
            parse_config(&content)?
        }
        None => {
            let config_path = dirs_config_path().join("config.toml");
            match std::fs::read_to_string(&config_path) {
                Ok(content) => parse_config(&content).unwrap_or_else(|e| {
                    tracing::warn!("Ignoring invalid config {}: {}", config_path.display(), e);
                    Config::default()
                }),
                Err(_) => Config::default(),
            }
        }
    };

    Ok(config.with_env_overrides())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.omdb.base_url, "http://www.omdbapi.com/");
        assert!(config.omdb.timeout_secs.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config("[omdb]\napi_key = \"abc123\"\n").unwrap();
        assert_eq!(config.omdb.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.omdb.base_url, "http://www.omdbapi.com/");
    }

    #[test]
    fn test_parse_invalid_config() {
        assert!(parse_config("[omdb\napi_key = ").is_err());
    }

    #[test]
    fn test_load_missing_explicit_config() {
        let result = load_config(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }
}
