use crate::utils::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(name = "media-quality-check")]
#[command(about = "Score the audiovisual quality of media files from their stream metadata")]
#[command(long_about = "
Reads container and stream metadata with ffprobe and rates each file: HDR / Dolby Vision
and resolution-aware video scoring, codec-aware audio scoring with object-audio detection
(Atmos, DTS:X, Auro-3D, MPEG-H), and a combined media score. When several files are given,
the preferred one is reported at the end.

EXAMPLES:
  # Score a single file
  media-quality-check movie.mkv

  # Compare two releases of the same title
  media-quality-check release-a.mkv release-b.mkv

  # Score every media file below a directory, as JSON
  media-quality-check --json ~/Videos/Movies/
")]
pub struct CliArgs {
    /// Media files or directories to analyse
    #[arg(value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// Configuration file path (defaults to the per-user config file if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// ffprobe binary to use instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub ffprobe: Option<String>,

    /// Print the results as JSON instead of the console report
    #[arg(long)]
    pub json: bool,

    /// Enable informational logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    pub show_config: bool,

    /// Validate the configuration file and exit
    #[arg(long)]
    pub validate_config: bool,
}

impl CliArgs {
    pub fn get_log_level<'a>(&self, config_level: &'a str) -> &'a str {
        if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            config_level
        }
    }

    pub fn should_use_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_info_command(&self) -> bool {
        self.show_config || self.validate_config
    }

    pub fn should_analyze(&self) -> bool {
        !self.is_info_command() && !self.inputs.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(ffprobe) = &self.ffprobe {
            if ffprobe.trim().is_empty() {
                return Err(Error::validation("--ffprobe must not be empty"));
            }
        }

        if self.validate_config && self.config.is_none() {
            return Err(Error::validation(
                "--validate-config needs a configuration file (--config <FILE>)",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inputs() {
        let args = CliArgs::parse_from(["media-quality-check", "a.mkv", "b.mkv", "--json"]);
        assert_eq!(args.inputs, vec![PathBuf::from("a.mkv"), PathBuf::from("b.mkv")]);
        assert!(args.json);
        assert!(args.should_analyze());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_no_inputs() {
        let args = CliArgs::parse_from(["media-quality-check"]);
        assert!(args.inputs.is_empty());
        assert!(!args.should_analyze());
    }

    #[test]
    fn test_log_level_flags() {
        let args = CliArgs::parse_from(["media-quality-check", "a.mkv"]);
        assert_eq!(args.get_log_level("warn"), "warn");

        let args = CliArgs::parse_from(["media-quality-check", "-v", "a.mkv"]);
        assert_eq!(args.get_log_level("warn"), "info");

        let args = CliArgs::parse_from(["media-quality-check", "--debug", "-v", "a.mkv"]);
        assert_eq!(args.get_log_level("warn"), "debug");
    }

    #[test]
    fn test_validate() {
        let args = CliArgs::parse_from(["media-quality-check", "--ffprobe", "", "a.mkv"]);
        assert!(args.validate().is_err());

        let args = CliArgs::parse_from(["media-quality-check", "--validate-config"]);
        assert!(args.is_info_command());
        assert!(args.validate().is_err());

        let args = CliArgs::parse_from([
            "media-quality-check",
            "--validate-config",
            "--config",
            "config.yaml",
        ]);
        assert!(args.validate().is_ok());
    }
}
