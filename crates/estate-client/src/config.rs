// File: src/config.rs
// Purpose: Configuration parsing from estate.toml

use anyhow::{Context, Result};
use estate_forms::images::{DEFAULT_IMAGE_TYPES, DEFAULT_MAX_IMAGE_BYTES};
use estate_forms::ImagePolicy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "estate.toml";

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "ESTATE_API_URL";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub uploads: UploadsConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// REST API location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Image upload limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadsConfig {
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,

    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
}

/// Where credentials are kept between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,
}

// Default values
fn default_base_url() -> String {
    "http://127.0.0.1:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_image_bytes() -> u64 {
    DEFAULT_MAX_IMAGE_BYTES
}

fn default_allowed_types() -> Vec<String> {
    DEFAULT_IMAGE_TYPES.iter().map(|s| s.to_string()).collect()
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from(".estate/credentials.json")
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            allowed_types: default_allowed_types(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl From<&UploadsConfig> for ImagePolicy {
    fn from(uploads: &UploadsConfig) -> Self {
        ImagePolicy {
            max_bytes: uploads.max_image_bytes,
            allowed_types: uploads.allowed_types.clone(),
        }
    }
}

impl Config {
    /// Load configuration from a file. A missing file gives the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::parse(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        config.apply_env_override(env::var(API_URL_ENV).ok());
        Ok(config)
    }

    /// Load from `estate.toml` in the current directory.
    pub fn load_default() -> Result<Self> {
        Self::load(CONFIG_FILE)
    }

    /// Parse TOML text. Empty text gives the defaults.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        toml::from_str(content).context("Invalid estate.toml")
    }

    fn apply_env_override(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!(base_url = %url, "API URL taken from environment");
            self.api.base_url = url;
        }
    }

    pub fn image_policy(&self) -> ImagePolicy {
        ImagePolicy::from(&self.uploads)
    }
}
