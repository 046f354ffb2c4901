pub mod aggregate;
pub mod audio;
pub mod classifier;
pub mod video;

/// Upper bound of every score in the engine.
pub const MAX_SCORE: f64 = 5.0;

pub use aggregate::{media_score, FileScore, ScoreBoard, ScoreEntry};
pub use audio::{score_audio, score_audio_stream, AudioStreamScore, CodecFamily};
pub use classifier::{
    classify_audio, classify_video, AudioClassification, HdrLabel, ObjectAudioVariant,
    VideoClassification,
};
pub use video::{
    score_primary_video, select_primary_video, BitrateSource, VideoBitrate, VideoScore,
    VideoVerdict,
};
