use crate::core::capm::RISK_FREE_RATE;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_NEWTON_BASE_URL: &str = "https://api.newtonanalytics.com";
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_risk_free_rate() -> f64 {
    RISK_FREE_RATE
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    pub fn new(base_url: &str) -> Self {
        ProviderConfig {
            base_url: base_url.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub newton: Option<ProviderConfig>,
    pub yahoo: Option<ProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            newton: Some(ProviderConfig::new(DEFAULT_NEWTON_BASE_URL)),
            yahoo: Some(ProviderConfig::new(DEFAULT_YAHOO_BASE_URL)),
        }
    }
}

impl ProvidersConfig {
    pub fn newton(&self) -> ProviderConfig {
        self.newton
            .clone()
            .unwrap_or_else(|| ProviderConfig::new(DEFAULT_NEWTON_BASE_URL))
    }

    pub fn yahoo(&self) -> ProviderConfig {
        self.yahoo
            .clone()
            .unwrap_or_else(|| ProviderConfig::new(DEFAULT_YAHOO_BASE_URL))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            risk_free_rate: RISK_FREE_RATE,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file has been set up.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "mfv", "mfv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        if !config.risk_free_rate.is_finite() {
            anyhow::bail!(
                "Invalid risk_free_rate in config file: {}",
                path.as_ref().display()
            );
        }
        debug!("Successfully loaded config");
        Ok(config)
    }
}
