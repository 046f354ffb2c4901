//! Per-file analysis and the sequential batch run.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::analysis::{
    aggregate::{media_score, FileScore, ScoreBoard, ScoreEntry},
    audio::{audio_bit_rate, score_audio, score_audio_stream},
    classifier::{bit_depth_label, classify_video, HdrLabel, ObjectAudioVariant, VideoClassification},
    video::{qualifying_video_streams, score_primary_video, select_primary_video, video_bitrate},
    VideoBitrate, VideoScore,
};
use crate::probe::{MetadataExtractor, ProbeOutput};
use crate::utils::{Error, ProbeSpinner, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoStreamSummary {
    pub index: u32,
    pub codec: String,
    pub width: u32,
    pub height: u32,
    pub bit_depth: &'static str,
    pub dynamic_range: HdrLabel,
    pub bitrate: VideoBitrate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioStreamSummary {
    pub index: u32,
    pub codec: String,
    pub channels: u32,
    pub bitrate_kbps: Option<u64>,
    pub language: String,
    pub object_audio: Option<ObjectAudioVariant>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub video_streams: Vec<VideoStreamSummary>,
    pub audio_streams: Vec<AudioStreamSummary>,
    pub classification: VideoClassification,
    pub video: VideoScore,
    pub audio_score: f64,
    pub media_score: f64,
}

impl FileAnalysis {
    pub fn file_score(&self) -> FileScore {
        FileScore {
            media_score: self.media_score,
            video_bitrate_mbps: self.video.bitrate.mbps,
        }
    }
}

/// Scores one file from its already extracted metadata.
pub fn analyze_probe(path: &Path, probe: &ProbeOutput) -> Result<FileAnalysis> {
    let format = &probe.format;

    let mut classification = VideoClassification::sdr();
    let mut video_streams = Vec::new();
    for stream in qualifying_video_streams(&probe.streams) {
        let stream_class = classify_video(stream);
        classification = classification.merge(stream_class);
        video_streams.push(VideoStreamSummary {
            index: stream.index,
            codec: stream.codec_name.clone(),
            width: stream.width,
            height: stream.height,
            bit_depth: bit_depth_label(stream.pix_fmt.as_deref()),
            dynamic_range: stream_class.label,
            bitrate: video_bitrate(stream, format),
        });
    }

    let primary = select_primary_video(&probe.streams).ok_or_else(|| Error::no_video_stream(path))?;
    let video = score_primary_video(primary, format, &classification);
    if video.bitrate.source.is_low_confidence() {
        warn!(
            "No duration for {}, video bitrate assumes a 1 second runtime",
            path.display()
        );
    }

    let audio_streams: Vec<AudioStreamSummary> = probe
        .audio_streams()
        .map(|stream| {
            let scored = score_audio_stream(stream);
            AudioStreamSummary {
                index: stream.index,
                codec: stream.codec_name.clone(),
                channels: stream.channels,
                bitrate_kbps: audio_bit_rate(stream).map(|bps| bps / 1000),
                language: stream.language().to_string(),
                object_audio: scored.classification.variant,
                score: scored.score,
            }
        })
        .collect();

    let audio_score = score_audio(probe.audio_streams());
    let media_score = media_score(video.score, audio_score);

    debug!(
        "{}: video {:.1} ({}), audio {:.2}, media {:.2}",
        path.display(),
        video.score,
        video.verdict.as_str(),
        audio_score,
        media_score
    );

    Ok(FileAnalysis {
        path: path.to_path_buf(),
        video_streams,
        audio_streams,
        classification,
        video,
        audio_score,
        media_score,
    })
}

#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: Error,
}

/// Everything one run produced, in input order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub analyses: Vec<FileAnalysis>,
    pub failures: Vec<FileFailure>,
    pub scores: ScoreBoard,
}

impl BatchOutcome {
    pub fn preferred(&self) -> Option<&ScoreEntry> {
        self.scores.preferred()
    }

    pub fn all_failed(&self) -> bool {
        self.analyses.is_empty() && !self.failures.is_empty()
    }
}

pub struct MediaAnalyzer<E> {
    extractor: E,
    spinner: ProbeSpinner,
}

impl<E: MetadataExtractor> MediaAnalyzer<E> {
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            spinner: ProbeSpinner::hidden(),
        }
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.spinner = ProbeSpinner::new(enabled);
        self
    }

    pub async fn analyze_file(&self, path: &Path) -> Result<FileAnalysis> {
        if !path.exists() {
            return Err(Error::not_found(path));
        }

        debug!("Extracting metadata with {}: {}", self.extractor.name(), path.display());
        let probe = self.extractor.extract(path).await?;
        analyze_probe(path, &probe)
    }

    /// Analyzes `paths` one after another. A failing file is recorded and
    /// skipped; it never stops the run.
    pub async fn analyze_batch<P: AsRef<Path>>(&self, paths: &[P]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        let total = paths.len();

        for (position, path) in paths.iter().enumerate() {
            let path = path.as_ref();
            info!("Analyzing file {}/{}: {}", position + 1, total, path.display());

            self.spinner.start(position + 1, total, &path.to_string_lossy());
            let result = self.analyze_file(path).await;
            self.spinner.clear();

            match result {
                Ok(analysis) => {
                    outcome.scores.insert(path, analysis.file_score());
                    outcome.analyses.push(analysis);
                }
                Err(error) => {
                    warn!("Skipping {}: {}", path.display(), error);
                    outcome.failures.push(FileFailure {
                        path: path.to_path_buf(),
                        error,
                    });
                }
            }
        }

        if total > 1 {
            info!(
                "Analysis complete: {} scored, {} failed",
                outcome.analyses.len(),
                outcome.failures.len()
            );
        }

        outcome
    }
}
