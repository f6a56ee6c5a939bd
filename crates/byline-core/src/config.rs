//! Configuration management for byline.
//!
//! Loads configuration from `${BYLINE_HOME}/config.toml` with sensible
//! defaults when the file is absent.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for byline configuration and credential storage.
    //!
    //! `BYLINE_HOME` resolution order:
    //! 1. `BYLINE_HOME` environment variable (if set)
    //! 2. `~/.config/byline` (default)

    use std::path::PathBuf;

    /// Returns the byline home directory.
    pub fn byline_home() -> PathBuf {
        if let Ok(home) = std::env::var("BYLINE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("byline"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        byline_home().join("config.toml")
    }

    /// Returns the path to the credential slot.
    pub fn token_path() -> PathBuf {
        byline_home().join("token.json")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the article API, including any path prefix.
    pub base_url: String,
}

impl Config {
    const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolves the effective base URL with precedence: env > config > default.
    ///
    /// Trailing slashes are stripped so request paths can be appended
    /// verbatim.
    ///
    /// # Errors
    /// Returns an error if the configured URL is not well-formed.
    pub fn resolve_base_url(&self) -> Result<String> {
        if let Ok(env_url) = std::env::var("BYLINE_BASE_URL") {
            let trimmed = env_url.trim();
            if !trimmed.is_empty() {
                validate_url(trimmed)?;
                return Ok(trimmed.trim_end_matches('/').to_string());
            }
        }

        let trimmed = self.base_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.trim_end_matches('/').to_string());
        }

        Ok(Self::DEFAULT_BASE_URL.to_string())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid base URL: {url}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: missing config file yields defaults.
    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.base_url, Config::DEFAULT_BASE_URL);
    }

    /// Test: config file values are picked up.
    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"https://api.example.com/v1/\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "https://api.example.com/v1/");
        // Trailing slash stripped on resolution.
        assert_eq!(
            config.resolve_base_url().unwrap(),
            "https://api.example.com/v1"
        );
    }

    /// Test: malformed base URL is rejected at resolution time.
    #[test]
    fn test_resolve_rejects_invalid_url() {
        let config = Config {
            base_url: "not a url".to_string(),
        };
        assert!(config.resolve_base_url().is_err());
    }
}
