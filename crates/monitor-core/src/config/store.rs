//! Config store for loading monitor.toml.

use std::path::PathBuf;

use super::{MonitorConfig, parser, paths::default_config_path};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
    /// Whether the file was named explicitly and so must exist.
    required: bool,
}

impl ConfigStore {
    /// Store at the platform default location; a missing file means defaults.
    pub fn with_defaults() -> anyhow::Result<Self> {
        Ok(Self {
            config_path: default_config_path()?,
            required: false,
        })
    }

    /// Store at an explicitly chosen file, which must exist.
    pub fn from_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            required: true,
        }
    }

    /// Store at `config_path`, falling back to defaults when it is missing.
    pub fn optional(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            required: false,
        }
    }

    pub fn load(&self) -> anyhow::Result<MonitorConfig> {
        if !self.config_path.exists() {
            if self.required {
                anyhow::bail!("Config file not found: {}", self.config_path.display());
            }
            tracing::debug!(
                path = %self.config_path.display(),
                "No config file, using defaults"
            );
            return Ok(MonitorConfig::new());
        }
        parser::parse_monitor_toml(&self.config_path)
    }
}
