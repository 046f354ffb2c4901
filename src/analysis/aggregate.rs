use serde::Serialize;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use super::MAX_SCORE;

pub const VIDEO_WEIGHT: f64 = 0.7;
pub const AUDIO_WEIGHT: f64 = 0.3;

/// Rounds the stored value once to `decimals` places, so 4.834999.. stays 4.83.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// Weighted composite of the video and audio scores, rounded to 2 places.
pub fn media_score(video_score: f64, audio_score: f64) -> f64 {
    let weighted = video_score * VIDEO_WEIGHT + audio_score * AUDIO_WEIGHT;
    round_to(weighted.clamp(0.0, MAX_SCORE), 2)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FileScore {
    pub media_score: f64,
    pub video_bitrate_mbps: f64,
}

impl FileScore {
    /// Ranking order: media score first, raw video bitrate breaks ties.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.media_score
            .total_cmp(&other.media_score)
            .then(self.video_bitrate_mbps.total_cmp(&other.video_bitrate_mbps))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEntry {
    pub path: PathBuf,
    #[serde(flatten)]
    pub score: FileScore,
}

/// Per-file scores accumulated over one run, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreBoard {
    entries: Vec<ScoreEntry>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the score of `path`, replacing an earlier entry for the same
    /// path in place.
    pub fn insert<P: Into<PathBuf>>(&mut self, path: P, score: FileScore) {
        let path = path.into();
        match self.entries.iter_mut().find(|e| e.path == path) {
            Some(entry) => entry.score = score,
            None => self.entries.push(ScoreEntry { path, score }),
        }
    }

    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<&FileScore> {
        let path = path.as_ref();
        self.entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| &e.score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreEntry> {
        self.entries.iter()
    }

    /// The best-ranked entry. A complete tie keeps the earliest entry.
    pub fn preferred(&self) -> Option<&ScoreEntry> {
        self.entries.iter().fold(None, |best: Option<&ScoreEntry>, entry| match best {
            Some(current) if entry.score.rank_cmp(&current.score) != Ordering::Greater => {
                Some(current)
            }
            _ => Some(entry),
        })
    }
}
