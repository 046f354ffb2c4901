use serde::Serialize;

use super::classifier::VideoClassification;
use crate::probe::{FormatRecord, StreamRecord};

/// Substituted when the container reports no usable duration.
pub const FALLBACK_DURATION_SECONDS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BitrateSource {
    /// Explicit stream `bit_rate`.
    Stream,
    /// Container size over duration.
    Container,
    /// Container size over the fallback duration; not a meaningful rate.
    ContainerNoDuration,
}

impl BitrateSource {
    pub fn is_low_confidence(&self) -> bool {
        matches!(self, Self::ContainerNoDuration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VideoBitrate {
    pub mbps: f64,
    pub source: BitrateSource,
}

/// Stream bit rate in Mbps, falling back to the container average.
///
/// With no duration the container size is divided by one second, which
/// yields a very large apparent bitrate. That is accepted: the source tag
/// marks the value as low confidence.
pub fn video_bitrate(stream: &StreamRecord, format: &FormatRecord) -> VideoBitrate {
    // A zero stream bit rate counts as absent.
    if let Some(bps) = stream.bit_rate.filter(|b| *b > 0) {
        return VideoBitrate {
            mbps: bps as f64 / 1_000_000.0,
            source: BitrateSource::Stream,
        };
    }

    let size = format.size.unwrap_or(0) as f64;
    let (duration, source) = match format.duration.filter(|d| *d > 0.0) {
        Some(duration) => (duration, BitrateSource::Container),
        None => (FALLBACK_DURATION_SECONDS, BitrateSource::ContainerNoDuration),
    };

    VideoBitrate {
        mbps: (size * 8.0) / duration / 1_000_000.0,
        source,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VideoVerdict {
    #[serde(rename = "REFERENCE QUALITY")]
    ReferenceQuality,
    #[serde(rename = "EXCELLENT")]
    Excellent,
    #[serde(rename = "GOOD")]
    Good,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "LOW")]
    Low,
}

impl VideoVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReferenceQuality => "REFERENCE QUALITY",
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// Score table keyed on width, dynamic range and bitrate.
pub fn score_video(width: u32, is_hdr: bool, mbps: f64) -> (f64, VideoVerdict) {
    use VideoVerdict::*;

    if width >= 3840 {
        if is_hdr {
            if mbps >= 15.0 {
                (5.0, ReferenceQuality)
            } else if mbps >= 12.0 {
                (4.5, Excellent)
            } else {
                (4.0, Good)
            }
        } else if mbps >= 20.0 {
            (4.5, Excellent)
        } else {
            (4.0, Good)
        }
    } else if width >= 1920 {
        if mbps >= 30.0 {
            (4.5, Excellent)
        } else if mbps >= 20.0 {
            (4.0, Good)
        } else {
            (3.5, Medium)
        }
    } else if width >= 1280 {
        (3.0, Medium)
    } else {
        (2.0, Low)
    }
}

/// Video streams eligible for analysis: everything except cover art.
pub fn qualifying_video_streams(streams: &[StreamRecord]) -> impl Iterator<Item = &StreamRecord> {
    streams
        .iter()
        .filter(|s| s.is_video() && !s.is_attached_picture())
}

/// Widest qualifying video stream. Equal widths prefer the higher explicit
/// bit rate, then the earlier stream.
pub fn select_primary_video(streams: &[StreamRecord]) -> Option<&StreamRecord> {
    qualifying_video_streams(streams).fold(None, |best: Option<&StreamRecord>, candidate| {
        match best {
            Some(current)
                if (candidate.width, candidate.bit_rate.unwrap_or(0))
                    <= (current.width, current.bit_rate.unwrap_or(0)) =>
            {
                Some(current)
            }
            _ => Some(candidate),
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VideoScore {
    pub score: f64,
    pub bitrate: VideoBitrate,
    pub verdict: VideoVerdict,
}

pub fn score_primary_video(
    primary: &StreamRecord,
    format: &FormatRecord,
    classification: &VideoClassification,
) -> VideoScore {
    let bitrate = video_bitrate(primary, format);
    let (score, verdict) = score_video(
        primary.width,
        classification.is_hdr || classification.is_dolby_vision,
        bitrate.mbps,
    );

    VideoScore {
        score,
        bitrate,
        verdict,
    }
}
