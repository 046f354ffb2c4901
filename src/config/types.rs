use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffprobe: String,
    /// Upper bound for a single ffprobe invocation.
    pub probe_timeout_seconds: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffprobe: "ffprobe".to_string(),
            probe_timeout_seconds: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub show_timestamps: bool,
    pub colored_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            show_timestamps: false,
            colored_output: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub separator_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            separator_width: 120,
        }
    }
}

pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
