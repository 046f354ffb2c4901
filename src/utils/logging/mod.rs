//! Console logging setup.
//!
//! Log events go to stderr through [`CleanFormatter`]; stdout is reserved for
//! the report itself.

mod formatter;

pub use formatter::{format_level, CleanFormatter};

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Sets up the logging system with the specified configuration
///
/// # Arguments
/// * `level` - Default log level (trace, debug, info, warn, error); `RUST_LOG` overrides it
/// * `show_timestamps` - Whether to prefix lines with the local time
/// * `colored` - Whether to style level labels
pub fn setup_logging(
    level: &str,
    show_timestamps: bool,
    colored: bool,
) -> crate::utils::Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(parse_level(level).into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(false)
        .event_format(CleanFormatter::new(show_timestamps, colored));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| crate::utils::Error::validation(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}
