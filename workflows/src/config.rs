//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/gateway.toml
//!
//! `GATEWAY_BASE_URL` overrides the base URL from the file.

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use gateway_core::Transport;

pub const DEFAULT_CONFIG_PATH: &str = "config/gateway.toml";
pub const BASE_URL_ENV: &str = "GATEWAY_BASE_URL";
pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), timeout_ms: default_timeout_ms() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl WorkflowConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: WorkflowConfig = toml::from_str(content)?;
        if config.gateway.timeout_ms == 0 {
            anyhow::bail!("gateway.timeout_ms must be greater than zero");
        }
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is missing
    /// or invalid.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{e:#}. Using defaults.");
                Self::default()
            }
        }
    }

    /// Resolve the config path (explicit, then `CONFIG_FILE`, then the
    /// default), load it and apply the `GATEWAY_BASE_URL` override.
    pub fn load(explicit_path: Option<&str>) -> Self {
        let path = Self::resolve_config_path(explicit_path, env::var(CONFIG_FILE_ENV).ok());
        let mut config = Self::load_from_path(&path);
        config.apply_base_url_override(env::var(BASE_URL_ENV).ok());
        config
    }

    pub fn resolve_config_path(explicit_path: Option<&str>, env_path: Option<String>) -> String {
        explicit_path
            .map(str::to_string)
            .or(env_path)
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
    }

    pub fn apply_base_url_override(&mut self, base_url: Option<String>) {
        if let Some(base_url) = base_url.filter(|url| !url.is_empty()) {
            self.gateway.base_url = base_url;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.gateway.timeout_ms)
    }

    pub fn transport(&self) -> Transport {
        Transport::new(&self.gateway.base_url).with_timeout(self.timeout())
    }
}
