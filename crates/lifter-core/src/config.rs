//! Client configuration management.
//!
//! Holds the API base URL, API version and request timeout. Values come from
//! `~/.config/lifter-api/config.json` and can be overridden by environment
//! variables:
//!
//! - `LIFTER_API_URL`: base URL, takes precedence over the file
//! - `LOCAL_DEVELOPMENT`: when set to anything but `0`, the default URL is the
//!   local development server instead of the live API
//!
//! [`Config::override_url`] beats both for the current process.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config directory paths
const APP_NAME: &str = "lifter-api";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Live API
pub const LIVE_URL: &str = "https://api.lifter.shivan.xyz";

/// Local development server
pub const TEST_URL: &str = "http://0.0.0.0:8000";

/// API version path segment
pub const DEFAULT_VERSION: &str = "v1";

/// HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const URL_ENV: &str = "LIFTER_API_URL";
pub const LOCAL_DEVELOPMENT_ENV: &str = "LOCAL_DEVELOPMENT";

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Per-invocation URL that beats every other source. Never saved.
    #[serde(skip)]
    url_override: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            version: default_version(),
            timeout_secs: default_timeout_secs(),
            url_override: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Read a config file, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Invalid config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Use `url` for this process regardless of environment or file.
    pub fn override_url(&mut self, url: impl Into<String>) {
        self.url_override = Some(url.into());
    }

    /// Base URL to talk to, reading the process environment.
    pub fn base_url(&self) -> String {
        self.resolve_url(
            std::env::var(URL_ENV).ok().as_deref(),
            std::env::var(LOCAL_DEVELOPMENT_ENV).ok().as_deref(),
        )
    }

    /// An explicit override beats `LIFTER_API_URL`, which beats the config file, which beats the
    /// `LOCAL_DEVELOPMENT` switch between the live and local servers.
    fn resolve_url(&self, url_env: Option<&str>, local_development: Option<&str>) -> String {
        if let Some(ref url) = self.url_override {
            return url.clone();
        }
        if let Some(url) = url_env.filter(|u| !u.is_empty()) {
            return url.to_string();
        }
        if let Some(ref url) = self.url {
            return url.clone();
        }
        match local_development {
            None | Some("0") => LIVE_URL.to_string(),
            Some(_) => TEST_URL.to_string(),
        }
    }
}
