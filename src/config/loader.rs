use super::types::*;
use crate::utils::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_DIR_NAME: &str = "media-quality-check";
const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: ToolsConfig,
    pub logging: LoggingConfig,
    pub report: ReportConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_str = std::fs::read_to_string(config_path)?;
        Self::from_yaml(&config_str)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Explicit path first, then the per-user config file, then defaults.
    ///
    /// An explicit path that does not exist is an error; a missing per-user
    /// file is not.
    pub fn load_with_fallback(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(Error::validation(format!(
                    "Configuration file does not exist: {}",
                    path.display()
                )));
            }
            return Self::load(path);
        }

        match Self::user_config_path() {
            Some(path) if path.is_file() => {
                debug!("Loading configuration from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    fn validate(&self) -> Result<()> {
        if self.tools.ffprobe.trim().is_empty() {
            return Err(Error::validation("tools.ffprobe must not be empty"));
        }

        if self.tools.probe_timeout_seconds == 0 {
            return Err(Error::validation(
                "tools.probe_timeout_seconds must be greater than 0",
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::validation(format!(
                "Invalid logging.level: {} (valid levels: {})",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        if self.report.separator_width == 0 {
            return Err(Error::validation(
                "report.separator_width must be greater than 0",
            ));
        }

        Ok(())
    }
}
