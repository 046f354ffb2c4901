//! Console and JSON rendering of a finished run.

use console::style;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::analysis::{ScoreEntry, MAX_SCORE};
use crate::processing::{AudioStreamSummary, BatchOutcome, FileAnalysis, VideoStreamSummary};
use crate::utils::{truncate_path_display, Error, Result};

pub const PREFERRED_PATH_MAX_CHARS: usize = 100;

pub struct ConsoleReport {
    separator_width: usize,
    use_color: bool,
}

impl ConsoleReport {
    pub fn new(separator_width: usize, use_color: bool) -> Self {
        Self {
            separator_width,
            use_color,
        }
    }

    fn separator(&self, out: &mut String) {
        out.push_str(&"=".repeat(self.separator_width));
        out.push('\n');
    }

    fn emphasize(&self, text: &str) -> String {
        if self.use_color {
            style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Renders every analysis, then the skipped files, then the preferred
    /// file when more than one input was given.
    pub fn render(&self, outcome: &BatchOutcome, input_count: usize) -> String {
        let mut out = String::new();

        for analysis in &outcome.analyses {
            self.render_file(&mut out, analysis);
        }

        for failure in &outcome.failures {
            let line = failure_line(&failure.error);
            if self.use_color {
                let _ = writeln!(out, "{}", style(line).red());
            } else {
                let _ = writeln!(out, "{}", line);
            }
        }

        if input_count > 1 {
            if let Some(preferred) = outcome.preferred() {
                let _ = writeln!(
                    out,
                    "✅ Preferred File: {}",
                    self.emphasize(&preferred_display(preferred))
                );
                self.separator(&mut out);
            }
        }

        out
    }

    fn render_file(&self, out: &mut String, analysis: &FileAnalysis) {
        self.separator(out);
        let _ = writeln!(out, "📁 File: {}", analysis.path.display());
        self.separator(out);

        out.push_str("🎥 Video Streams:\n");
        for stream in &analysis.video_streams {
            let _ = writeln!(out, "  ▸ {}", video_line(stream));
        }

        out.push_str("\n🔊 Audio Streams:\n");
        for stream in &analysis.audio_streams {
            let _ = writeln!(out, "  ▸ {}", audio_line(stream));
        }

        let _ = writeln!(
            out,
            "\n📊 Media Score: {} / {}",
            format_score(analysis.media_score),
            format_score(MAX_SCORE)
        );
        let _ = writeln!(
            out,
            "\n🏁 Verdict: {}",
            self.emphasize(analysis.video.verdict.as_str())
        );
        self.separator(out);
    }
}

fn video_line(stream: &VideoStreamSummary) -> String {
    format!(
        "{} | {}x{} | {} | {} | {:.2} Mbps",
        stream.codec,
        stream.width,
        stream.height,
        stream.bit_depth,
        stream.dynamic_range.as_str(),
        stream.bitrate.mbps
    )
}

fn audio_line(stream: &AudioStreamSummary) -> String {
    let bitrate = match stream.bitrate_kbps {
        Some(kbps) => format!("{} kbps", kbps),
        None => "NA".to_string(),
    };

    let mut line = format!(
        "{} | {}ch | {} | LANG: {}",
        stream.codec, stream.channels, bitrate, stream.language
    );
    if let Some(variant) = stream.object_audio {
        line.push_str(" | ");
        line.push_str(variant.as_str());
    }
    line
}

fn failure_line(error: &Error) -> String {
    match error {
        Error::NotFound { path } => format!("File not found: {}", path.display()),
        other => format!("Skipped: {}", other),
    }
}

fn preferred_display(entry: &ScoreEntry) -> String {
    truncate_path_display(&entry.path.to_string_lossy(), PREFERRED_PATH_MAX_CHARS)
}

/// Whole scores keep one decimal ("5.0"); others print as stored.
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.1}", score)
    } else {
        format!("{}", score)
    }
}

#[derive(Debug, Serialize)]
struct JsonFailure {
    path: PathBuf,
    kind: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    files: &'a [FileAnalysis],
    failures: Vec<JsonFailure>,
    preferred: Option<&'a ScoreEntry>,
}

pub fn render_json(outcome: &BatchOutcome) -> Result<String> {
    let report = JsonReport {
        files: &outcome.analyses,
        failures: outcome
            .failures
            .iter()
            .map(|failure| JsonFailure {
                path: failure.path.clone(),
                kind: failure.error.kind(),
                message: failure.error.to_string(),
            })
            .collect(),
        preferred: outcome.preferred(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}
