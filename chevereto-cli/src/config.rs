// ABOUTME: Configuration file loading, validation, and hierarchical merging for the Chevereto CLI
// ABOUTME: Supports TOML config files with XDG locations and environment overrides

use anyhow::{Context, Result, anyhow};
use chevereto_sdk::{CheveretoClient, Endpoint, UploadError};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants;

#[derive(Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub upload_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub direct_url: Option<bool>,
    #[serde(default, deserialize_with = "validate_timeout")]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub proxy: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("upload_url", &self.upload_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("direct_url", &self.direct_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl Config {
    /// Load configuration from standard locations, then apply environment overrides
    pub fn load() -> Result<Self> {
        let paths = Self::get_config_paths();
        let config = Self::load_from_paths(&paths.iter().map(|p| p.as_path()).collect::<Vec<_>>())?;
        Ok(config.apply_env(|name| std::env::var(name).ok()))
    }

    /// Load configuration from specific file paths; later paths override earlier ones
    pub fn load_from_paths(paths: &[&Path]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            if !path.exists() {
                continue;
            }
            let file_config = Self::load_from_file(path)?;
            config = config.merge(file_config);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Standard config file paths in order of precedence (lowest first)
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(
                home_dir
                    .join(".config")
                    .join(constants::paths::CONFIG_DIR)
                    .join(constants::paths::CONFIG_FILE),
            );
        }

        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            paths.push(
                PathBuf::from(config_home)
                    .join(constants::paths::CONFIG_DIR)
                    .join(constants::paths::CONFIG_FILE),
            );
        }

        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join(constants::paths::PROJECT_CONFIG_FILE));
        }

        paths.dedup();
        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            upload_url: other.upload_url.or(self.upload_url),
            api_key: other.api_key.or(self.api_key),
            direct_url: other.direct_url.or(self.direct_url),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            proxy: other.proxy.or(self.proxy),
        }
    }

    /// Override upload URL and API key from the environment
    pub fn apply_env<F>(self, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Config {
            upload_url: non_empty(constants::env::UPLOAD_URL).or(self.upload_url),
            api_key: non_empty(constants::env::API_KEY).or(self.api_key),
            ..self
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref proxy) = self.proxy {
            CheveretoClient::create_proxy(proxy).context("Invalid proxy setting")?;
        }

        Ok(())
    }

    /// True when both an upload URL and an API key are set
    pub fn is_configured(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.upload_url) && present(&self.api_key)
    }

    /// Endpoint described by this config, if one is configured
    pub fn endpoint(&self) -> Result<Endpoint> {
        match (&self.upload_url, &self.api_key) {
            (Some(url), Some(key)) if self.is_configured() => {
                Ok(Endpoint::new(url.as_str(), key.as_str())?)
            }
            _ => Err(anyhow!(UploadError::Configuration(
                "no upload endpoint configured".to_string()
            ))),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(chevereto_sdk::constants::timeouts::UPLOAD_TIMEOUT)
    }

    pub fn proxy(&self) -> Result<Option<chevereto_sdk::Proxy>> {
        self.proxy
            .as_deref()
            .map(CheveretoClient::create_proxy)
            .transpose()
            .map_err(Into::into)
    }
}

// Custom deserializer rejecting a zero timeout
fn validate_timeout<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<u64> = Option::deserialize(deserializer)?;

    match value {
        Some(0) => Err(D::Error::custom(
            "Invalid timeout_secs '0'. Must be at least 1 second",
        )),
        other => Ok(other),
    }
}
