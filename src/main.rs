use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use tracing::{error, info};

use media_quality_check::{
    cli::{handle_commands, render_json, CliArgs, ConsoleReport},
    config::Config,
    probe::FfprobeExtractor,
    processing::MediaAnalyzer,
    utils::{expand_inputs, setup_logging, Result},
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let args = CliArgs::parse();

    if !args.is_info_command() && !args.should_analyze() {
        let mut cmd = CliArgs::command();
        eprintln!("{}", cmd.render_usage());
        return Ok(ExitCode::FAILURE);
    }

    args.validate()?;

    // --validate-config reports load errors itself
    let config = if args.validate_config {
        Config::default()
    } else {
        Config::load_with_fallback(args.config.as_deref())?
    };

    let use_color = config.logging.colored_output && args.should_use_color();
    console::set_colors_enabled(use_color);
    console::set_colors_enabled_stderr(use_color);

    setup_logging(
        args.get_log_level(&config.logging.level),
        config.logging.show_timestamps,
        use_color,
    )?;

    if handle_commands(&args, &config).await? {
        return Ok(ExitCode::SUCCESS);
    }

    let mut tools = config.tools.clone();
    if let Some(ffprobe) = &args.ffprobe {
        tools.ffprobe = ffprobe.clone();
    }
    let extractor = FfprobeExtractor::from_config(&tools);

    let paths = expand_inputs(&args.inputs);
    if paths.is_empty() {
        error!("No media files found in the given paths");
        return Ok(ExitCode::FAILURE);
    }
    info!("Found {} file(s) to analyze", paths.len());

    let analyzer = MediaAnalyzer::new(extractor).with_progress(!args.json);
    let outcome = analyzer.analyze_batch(&paths).await;

    if args.json {
        println!("{}", render_json(&outcome)?);
    } else {
        let report = ConsoleReport::new(config.report.separator_width, use_color);
        print!("{}", report.render(&outcome, paths.len()));
    }

    if outcome.all_failed() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
