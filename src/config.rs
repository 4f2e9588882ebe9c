//! Configuration Management
//!
//! Endpoint and credential settings for a [`Client`](crate::Client),
//! persisted as JSON under the user config directory and overridable from
//! the environment.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding [`ClientConfig::url`]
pub const ENV_URL: &str = "HYPERMEDIA_URL";
/// Environment variable overriding [`ClientConfig::access_key`]
pub const ENV_ACCESS_KEY: &str = "HYPERMEDIA_ACCESS_KEY";
/// Environment variable overriding [`ClientConfig::secret_key`]
pub const ENV_SECRET_KEY: &str = "HYPERMEDIA_SECRET_KEY";

const DEFAULT_URL: &str = "http://localhost:8080/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// API base URL, e.g. `http://localhost:8080/v1`
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

impl ClientConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            access_key: None,
            secret_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hypermedia-client").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Apply environment overrides (env > file)
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_URL) {
            self.url = url;
        }
        if let Some(access_key) = lookup(ENV_ACCESS_KEY) {
            self.access_key = Some(access_key);
        }
        if let Some(secret_key) = lookup(ENV_SECRET_KEY) {
            self.secret_key = Some(secret_key);
        }
        self
    }

    /// User agent sent with every request
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("hypermedia-client/{}", env!("CARGO_PKG_VERSION")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_keys_use_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"access_key": "ak"}"#).unwrap();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.access_key.as_deref(), Some("ak"));
        assert_eq!(config.secret_key, None);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let env: HashMap<&str, &str> = [
            (ENV_URL, "http://api.example/v2"),
            (ENV_SECRET_KEY, "sk"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig {
            access_key: Some("from-file".to_string()),
            ..ClientConfig::new("http://file.example/v1")
        }
        .with_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.url, "http://api.example/v2");
        assert_eq!(config.access_key.as_deref(), Some("from-file"));
        assert_eq!(config.secret_key.as_deref(), Some("sk"));
    }

    #[test]
    fn test_user_agent_default() {
        let config = ClientConfig::default();
        assert!(config.user_agent().starts_with("hypermedia-client/"));

        let custom = ClientConfig {
            user_agent: Some("my-tool/1.0".to_string()),
            ..ClientConfig::default()
        };
        assert_eq!(custom.user_agent(), "my-tool/1.0");
    }

    #[test]
    fn test_roundtrip_through_json() {
        let config = ClientConfig {
            access_key: Some("ak".to_string()),
            secret_key: Some("sk".to_string()),
            ..ClientConfig::new("http://h/v1")
        };
        let text = serde_json::to_string_pretty(&config).unwrap();
        let back: ClientConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
