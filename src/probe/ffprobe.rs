use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tracing::debug;

use super::{MetadataExtractor, ProbeOutput};
use crate::config::ToolsConfig;
use crate::utils::{Error, Result};

/// [`MetadataExtractor`] backed by the `ffprobe` CLI.
#[derive(Debug, Clone)]
pub struct FfprobeExtractor {
    ffprobe_path: String,
    timeout: Duration,
}

impl FfprobeExtractor {
    pub fn new(ffprobe_path: String, timeout_seconds: u64) -> Self {
        Self {
            ffprobe_path,
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    pub fn from_config(tools: &ToolsConfig) -> Self {
        Self::new(tools.ffprobe.clone(), tools.probe_timeout_seconds)
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.ffprobe_path
    }

    fn probe_args(input_path: &str) -> Vec<&str> {
        vec![
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
            input_path,
        ]
    }
}

impl MetadataExtractor for FfprobeExtractor {
    fn name(&self) -> &'static str {
        "ffprobe"
    }

    async fn extract(&self, path: &Path) -> Result<ProbeOutput> {
        let input_path = path.to_string_lossy();
        let args = Self::probe_args(&input_path);
        debug!("Running {} with args: {:?}", self.ffprobe_path, args);

        let child = TokioCommand::new(&self.ffprobe_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                Error::extraction(path, format!("failed to run {}: {}", self.ffprobe_path, e))
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                Error::extraction(
                    path,
                    format!("ffprobe timed out after {} seconds", self.timeout.as_secs()),
                )
            })?
            .map_err(|e| Error::extraction(path, format!("ffprobe failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.trim();
            let message = if detail.is_empty() {
                format!("ffprobe exited with {}", output.status)
            } else {
                format!("ffprobe exited with {}: {}", output.status, detail)
            };
            return Err(Error::extraction(path, message));
        }

        let json_output = String::from_utf8_lossy(&output.stdout);
        ProbeOutput::from_json(&json_output).map_err(|e| {
            Error::extraction(path, format!("failed to parse ffprobe output: {}", e))
        })
    }
}
