use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::messages::Locale;
use crate::validation::GuardPolicy;
use crate::workflow::StatusScope;

/// Application configuration module
/// This module handles loading, validating and saving the settings of the
/// control surface.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Processing service connection
    #[serde(default)]
    pub service: ServiceConfig,

    /// Submit and status behaviour
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Interface language
    #[serde(default)]
    pub locale: Locale,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Processing service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceConfig {
    /// Base URL of the service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds, 0 waits forever
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ServiceConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Submit and status behaviour
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WorkflowConfig {
    /// Which status the banner shows
    #[serde(default)]
    pub status_scope: StatusScope,

    /// Drop results of requests superseded by a newer submit of the same kind
    #[serde(default = "default_true")]
    pub discard_stale_results: bool,

    /// Block folder paths whose last segment has a dot.
    /// When false the check only warns.
    #[serde(default = "default_true")]
    pub strict_folder_check: bool,
}

impl WorkflowConfig {
    pub fn guard_policy(&self) -> GuardPolicy {
        GuardPolicy { strict_folder_check: self.strict_folder_check }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            status_scope: StatusScope::default(),
            discard_stale_results: default_true(),
            strict_folder_check: default_true(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:4664".to_string()
}

fn default_timeout_secs() -> u64 {
    300 // batch jobs can be slow, but never wait forever by default
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Default location: `<config dir>/fusionn/config.json`, or the working
    /// directory when the platform has no config dir
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("fusionn").join("config.json"))
            .unwrap_or_else(|| PathBuf::from("fusionn.json"))
    }

    /// Load the configuration at `path`, writing a default one if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create config directory: {}", parent.display()))?;
        }

        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.service.endpoint)
            .map_err(|e| anyhow!("Invalid service endpoint '{}': {}", self.service.endpoint, e))?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(anyhow!("Service endpoint must use http or https, got '{}'", other)),
        }

        if url.host_str().is_none() {
            return Err(anyhow!("Service endpoint has no host: {}", self.service.endpoint));
        }

        Ok(())
    }
}
