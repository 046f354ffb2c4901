pub mod analysis;
pub mod cli;
pub mod config;
pub mod probe;
pub mod processing;
pub mod utils;

pub use analysis::{
    FileScore, HdrLabel, ObjectAudioVariant, ScoreBoard, ScoreEntry, VideoClassification,
    VideoVerdict,
};
pub use config::Config;
pub use probe::{FfprobeExtractor, MetadataExtractor, ProbeOutput};
pub use processing::{BatchOutcome, FileAnalysis, MediaAnalyzer};
pub use utils::{Error, Result};
