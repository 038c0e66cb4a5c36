//! Client configuration loading
//!
//! Supports loading the API endpoint and credentials from (in order of priority):
//! 1. JSON file in the octofeed config directory (~/.config/octofeed/github.json)
//! 2. Runtime environment variables (GITHUB_TOKEN, GITHUB_ENDPOINT)
//! 3. Anonymous access to the public API

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config filename in the octofeed config directory
const CONFIG_FILE: &str = "github.json";

const TOKEN_VAR: &str = "GITHUB_TOKEN";
const ENDPOINT_VAR: &str = "GITHUB_ENDPOINT";

/// Credentials attached to every request
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Credentials {
    #[default]
    Anonymous,
    /// OAuth or personal access token
    Token(String),
    /// Login and password (or token) sent as HTTP basic auth
    Basic { login: String, password: String },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Anonymous => f.write_str("Anonymous"),
            Credentials::Token(_) => f.write_str("Token(***)"),
            Credentials::Basic { login, .. } => write!(f, "Basic({login}:***)"),
        }
    }
}

/// Connection settings for the GitHub API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL, e.g. https://api.github.com or https://ghe.example.com/api/v3
    pub endpoint: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub credentials: Credentials,
}

/// On-disk format of github.json
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    oauth_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

impl From<&ClientConfig> for ConfigFile {
    fn from(config: &ClientConfig) -> Self {
        let mut file = ConfigFile {
            endpoint: Some(config.endpoint.clone()),
            user_agent: Some(config.user_agent.clone()),
            timeout_secs: Some(config.timeout.as_secs()),
            ..ConfigFile::default()
        };
        match &config.credentials {
            Credentials::Anonymous => {}
            Credentials::Token(token) => file.oauth_token = Some(token.clone()),
            Credentials::Basic { login, password } => {
                file.login = Some(login.clone());
                file.password = Some(password.clone());
            }
        }
        file
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            credentials: Credentials::Anonymous,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.github.com";
    pub const DEFAULT_USER_AGENT: &'static str = concat!("octofeed/", env!("CARGO_PKG_VERSION"));
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Load configuration using the following priority:
    /// 1. JSON file (~/.config/octofeed/github.json)
    /// 2. Runtime environment variables
    /// 3. Anonymous defaults
    pub fn load() -> Result<Self> {
        if config::config_exists(CONFIG_FILE) {
            let file: ConfigFile = config::load_json(CONFIG_FILE)?;
            log::debug!("Loaded GitHub config from {}", CONFIG_FILE);
            return Ok(Self::from_config_file(file));
        }

        if let Ok(config) = Self::from_env() {
            log::debug!("Loaded GitHub config from environment");
            return Ok(config);
        }

        log::info!("No GitHub credentials configured, using anonymous access");
        Ok(Self::default())
    }

    /// Configuration with a token against the public API
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::Token(token.into()),
            ..Self::default()
        }
    }

    /// Load configuration from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file: ConfigFile = config::load_json_file(path)?;
        Ok(Self::from_config_file(file))
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ConfigFile =
            serde_json::from_str(json).context("Failed to parse GitHub config JSON")?;
        Ok(Self::from_config_file(file))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup(TOKEN_VAR)
            .filter(|t| !t.is_empty())
            .with_context(|| format!("{} environment variable not set", TOKEN_VAR))?;

        let mut config = Self::with_token(token);
        if let Some(endpoint) = lookup(ENDPOINT_VAR).filter(|e| !e.is_empty()) {
            config.endpoint = endpoint;
        }
        Ok(config)
    }

    fn from_config_file(file: ConfigFile) -> Self {
        let defaults = Self::default();

        // A token wins over basic auth when both are present
        let credentials = match (file.oauth_token, file.login, file.password) {
            (Some(token), _, _) if !token.is_empty() => Credentials::Token(token),
            (_, Some(login), Some(password)) => Credentials::Basic { login, password },
            _ => Credentials::Anonymous,
        };

        Self {
            endpoint: file.endpoint.unwrap_or(defaults.endpoint),
            user_agent: file.user_agent.unwrap_or(defaults.user_agent),
            timeout: file
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            credentials,
        }
    }

    /// Write this configuration to ~/.config/octofeed/github.json
    ///
    /// Returns the path written. [`ClientConfig::load`] picks it up next time.
    pub fn save(&self) -> Result<PathBuf> {
        let path = config::save_json(CONFIG_FILE, &ConfigFile::from(self))?;
        log::info!("Saved GitHub config to {}", path.display());
        Ok(path)
    }

    /// Write this configuration to a specific JSON file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        config::save_json_file(path, &ConfigFile::from(self))
    }

    /// Get the default config file path (~/.config/octofeed/github.json)
    pub fn default_config_path() -> Option<PathBuf> {
        config::config_path(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_token_config() {
        let json = r#"{
            "endpoint": "https://ghe.example.com/api/v3",
            "oauth_token": "ghp_secret",
            "timeout_secs": 5
        }"#;

        let config = ClientConfig::from_json(json).unwrap();
        assert_eq!(config.endpoint, "https://ghe.example.com/api/v3");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.credentials, Credentials::Token("ghp_secret".to_string()));
        assert_eq!(config.user_agent, ClientConfig::DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_parse_basic_config() {
        let json = r#"{ "login": "octocat", "password": "hunter2" }"#;

        let config = ClientConfig::from_json(json).unwrap();
        assert_eq!(config.endpoint, ClientConfig::DEFAULT_ENDPOINT);
        assert_eq!(
            config.credentials,
            Credentials::Basic {
                login: "octocat".to_string(),
                password: "hunter2".to_string()
            }
        );
    }

    #[test]
    fn test_empty_config_is_anonymous() {
        let config = ClientConfig::from_json("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github.json");
        std::fs::write(&path, r#"{ "oauth_token": "abc", "user_agent": "tests" }"#).unwrap();

        let config = ClientConfig::from_file(&path).unwrap();
        assert_eq!(config.user_agent, "tests");
        assert_eq!(config.credentials, Credentials::Token("abc".to_string()));
    }

    #[test]
    fn test_save_to_then_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github.json");
        let saved = ClientConfig {
            endpoint: "https://ghe.example.com/api/v3".to_string(),
            timeout: Duration::from_secs(12),
            credentials: Credentials::Basic {
                login: "octocat".to_string(),
                password: "hunter2".to_string(),
            },
            ..ClientConfig::default()
        };

        saved.save_to(&path).unwrap();
        assert_eq!(ClientConfig::from_file(&path).unwrap(), saved);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("oauth_token"));
    }

    #[test]
    fn test_from_vars() {
        let vars: HashMap<&str, &str> = [
            ("GITHUB_TOKEN", "ghp_env"),
            ("GITHUB_ENDPOINT", "https://ghe.example.com/api/v3"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_vars(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.credentials, Credentials::Token("ghp_env".to_string()));
        assert_eq!(config.endpoint, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_from_vars_requires_token() {
        assert!(ClientConfig::from_vars(|_| None).is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let basic = Credentials::Basic {
            login: "octocat".to_string(),
            password: "hunter2".to_string(),
        };
        let token = Credentials::Token("ghp_secret".to_string());
        assert!(!format!("{:?}", basic).contains("hunter2"));
        assert!(!format!("{:?}", token).contains("ghp_secret"));
    }
}
