use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::langfuse::{Credentials, DEFAULT_DOMAIN};

pub const PUBLIC_KEY_ENV: &str = "LANGFUSE_PUBLIC_KEY";
pub const PRIVATE_KEY_ENV: &str = "LANGFUSE_PRIVATE_KEY";
pub const DOMAIN_ENV: &str = "LANGFUSE_DOMAIN";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub langfuse: LangfuseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LangfuseConfig {
    pub domain: String,
    pub public_key: Option<String>,
    pub private_key: Option<String>,
    /// Per-request timeout; unset means no timeout
    pub timeout_ms: Option<u64>,
}

impl Default for LangfuseConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            public_key: None,
            private_key: None,
            timeout_ms: None,
        }
    }
}

impl LangfuseConfig {
    /// Both keys present and non-empty
    pub fn has_keys(&self) -> bool {
        let present = |key: &Option<String>| key.as_deref().is_some_and(|k| !k.is_empty());
        present(&self.public_key) && present(&self.private_key)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            langfuse: LangfuseConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Overlay the process environment
    pub fn apply_env(self) -> Self {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`. Empty values count as unset.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(domain) = lookup(DOMAIN_ENV) {
            self.langfuse.domain = domain;
        }
        if let Some(public_key) = lookup(PUBLIC_KEY_ENV) {
            self.langfuse.public_key = Some(public_key);
        }
        if let Some(private_key) = lookup(PRIVATE_KEY_ENV) {
            self.langfuse.private_key = Some(private_key);
        }
        self
    }

    /// Validated credentials for the API client
    pub fn credentials(&self) -> crate::Result<Credentials> {
        let langfuse = &self.langfuse;
        let domain = if langfuse.domain.is_empty() {
            DEFAULT_DOMAIN
        } else {
            langfuse.domain.as_str()
        };
        Credentials::new(
            domain,
            langfuse.public_key.clone().unwrap_or_default(),
            langfuse.private_key.clone().unwrap_or_default(),
        )
    }
}
