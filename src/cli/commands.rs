use crate::{cli::CliArgs, config::Config, utils::Result};
use std::path::Path;

/// Runs the informational commands. Returns `true` when one of them ran and
/// no analysis should follow.
pub async fn handle_commands(args: &CliArgs, config: &Config) -> Result<bool> {
    if args.show_config {
        show_config(config)?;
        return Ok(true);
    }

    if args.validate_config {
        if let Some(path) = args.config.as_deref() {
            validate_config(path)?;
        }
        return Ok(true);
    }

    Ok(false)
}

fn show_config(config: &Config) -> Result<()> {
    match Config::user_config_path() {
        Some(path) if path.is_file() => println!("# user config: {}", path.display()),
        Some(path) => println!("# user config: {} (not present)", path.display()),
        None => println!("# user config: unavailable on this platform"),
    }
    print!("{}", render_config(config)?);
    Ok(())
}

fn render_config(config: &Config) -> Result<String> {
    Ok(serde_yaml::to_string(config)?)
}

fn validate_config(config_path: &Path) -> Result<()> {
    match Config::load(config_path) {
        Ok(config) => {
            println!("✓ Configuration file is valid: {}", config_path.display());
            println!();
            println!("Configuration Summary:");
            println!("{:-<40}", "");
            println!("ffprobe: {}", config.tools.ffprobe);
            println!("Probe timeout: {}s", config.tools.probe_timeout_seconds);
            println!("Log level: {}", config.logging.level);
            println!("Separator width: {}", config.report.separator_width);
            Ok(())
        }
        Err(e) => {
            println!("✗ Configuration validation failed: {}", e);
            println!();
            println!("Common issues:");
            println!("  - Check YAML syntax and indentation");
            println!("  - Log level must be one of trace, debug, info, warn, error");
            println!("  - Timeouts and widths must be greater than 0");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_render_config_round_trips() {
        let mut config = Config::default();
        config.tools.probe_timeout_seconds = 45;

        let yaml = render_config(&config).unwrap();
        assert!(yaml.contains("probe_timeout_seconds: 45"));
        assert_eq!(Config::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_validate_config() {
        let mut valid = NamedTempFile::new().unwrap();
        writeln!(valid, "logging:\n  level: \"debug\"").unwrap();
        assert!(validate_config(valid.path()).is_ok());

        let mut invalid = NamedTempFile::new().unwrap();
        writeln!(invalid, "tools:\n  probe_timeout_seconds: 0").unwrap();
        assert!(validate_config(invalid.path()).is_err());
    }

    #[tokio::test]
    async fn test_handle_commands_passthrough() {
        let args = CliArgs::parse_from(["media-quality-check", "movie.mkv"]);
        let handled = handle_commands(&args, &Config::default()).await.unwrap();
        assert!(!handled);
    }
}
