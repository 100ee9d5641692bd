use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use planboard::ClientConfig;
use serde::{Deserialize, Serialize};

pub const API_URL_ENV: &str = "PLANBOARD_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Base URL of the project API, e.g. "http://localhost:5001/api"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_api_url() -> String {
    "http://localhost:5001/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            headers: BTreeMap::new(),
        }
    }
}

impl CliConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("planboard")
            .join("config.toml"))
    }

    /// Load config from the default location, then apply the environment override.
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_path()?)?;
        Ok(config.with_env_override(std::env::var(API_URL_ENV).ok()))
    }

    /// Load config from `path`. Returns default config if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }

    /// Write the default config to `path` unless something is already there.
    /// Returns whether a file was created.
    pub fn ensure_exists(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        Self::default().save_to(path)?;
        Ok(true)
    }

    pub fn with_env_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            self.api_url = url;
        }
        self
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        let config = ClientConfig::new(&self.api_url)
            .with_context(|| format!("Invalid api_url in config: {}", self.api_url))?
            .with_timeout(Duration::from_secs(self.timeout_secs));
        Ok(self
            .headers
            .iter()
            .fold(config, |config, (name, value)| config.with_header(name, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.api_url, "http://localhost:5001/api");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_url = \"https://pm.example.com/api\"\n\n[headers]\nX-Team = \"core\"\n",
        )
        .unwrap();

        let config = CliConfig::load_from(&path).unwrap();
        assert_eq!(config.api_url, "https://pm.example.com/api");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.headers.get("X-Team").map(String::as_str), Some("core"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = [").unwrap();
        assert!(CliConfig::load_from(&path).is_err());
    }

    #[test]
    fn ensure_exists_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(CliConfig::ensure_exists(&path).unwrap());
        assert!(!CliConfig::ensure_exists(&path).unwrap());
        assert_eq!(CliConfig::load_from(&path).unwrap(), CliConfig::default());
    }

    #[test]
    fn env_override_replaces_url_unless_blank() {
        let config = CliConfig::default().with_env_override(Some("http://api:9000".into()));
        assert_eq!(config.api_url, "http://api:9000");

        let config = CliConfig::default().with_env_override(Some("  ".into()));
        assert_eq!(config.api_url, default_api_url());
    }

    #[test]
    fn client_config_carries_headers_and_timeout() {
        let mut config = CliConfig {
            timeout_secs: 5,
            ..CliConfig::default()
        };
        config.headers.insert("X-Team".into(), "core".into());

        let client = config.client_config().unwrap();
        assert_eq!(client.base_url.as_str(), "http://localhost:5001/api/");
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert!(client
            .headers
            .contains(&("X-Team".to_string(), "core".to_string())));
    }

    #[test]
    fn bad_url_is_reported() {
        let config = CliConfig {
            api_url: "not a url".into(),
            ..CliConfig::default()
        };
        assert!(config.client_config().is_err());
    }
}
