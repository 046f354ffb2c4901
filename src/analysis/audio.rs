use serde::Serialize;

use super::classifier::{classify_audio, AudioClassification};
use super::MAX_SCORE;
use crate::probe::StreamRecord;

pub const LOSSLESS_SCORE: f64 = 5.0;
pub const OBJECT_AUDIO_BONUS: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecFamily {
    TrueHd,
    Dts,
    Eac3,
    Ac3,
    Aac,
    Unknown,
}

impl CodecFamily {
    pub fn from_codec_name(codec_name: &str) -> Self {
        let name = codec_name.to_lowercase();
        match name.as_str() {
            "truehd" => Self::TrueHd,
            "eac3" => Self::Eac3,
            "ac3" => Self::Ac3,
            "aac" => Self::Aac,
            n if n.starts_with("dts") => Self::Dts,
            _ => Self::Unknown,
        }
    }

    /// TrueHD always, DTS only for its HD profiles.
    pub fn is_lossless(&self, profile: Option<&str>) -> bool {
        match self {
            Self::TrueHd => true,
            Self::Dts => profile.is_some_and(|p| p.to_lowercase().contains("hd")),
            _ => false,
        }
    }
}

/// Raw stream bit rate in bits per second, from the stream or its tags.
pub fn audio_bit_rate(stream: &StreamRecord) -> Option<u64> {
    // A zero stream bit rate counts as absent.
    stream
        .bit_rate
        .filter(|b| *b > 0)
        .or_else(|| stream.tag_bit_rate())
}

pub fn base_score(family: CodecFamily, lossless: bool, kbps: f64, channels: u32) -> f64 {
    if lossless {
        return LOSSLESS_SCORE;
    }

    match family {
        CodecFamily::Eac3 => {
            if kbps >= 640.0 {
                4.6
            } else if kbps >= 448.0 {
                4.2
            } else if kbps >= 384.0 {
                3.8
            } else if kbps >= 256.0 {
                3.3
            } else {
                2.4
            }
        }
        CodecFamily::Ac3 => {
            if kbps >= 640.0 {
                3.8
            } else if kbps >= 448.0 {
                3.4
            } else {
                3.0
            }
        }
        CodecFamily::Aac => {
            if channels >= 6 && kbps >= 384.0 {
                3.0
            } else if channels >= 2 {
                2.4
            } else {
                2.0
            }
        }
        // Lossy TrueHD cannot happen; plain DTS core and unknown codecs floor out.
        CodecFamily::TrueHd | CodecFamily::Dts | CodecFamily::Unknown => 2.0,
    }
}

pub fn channel_bonus(channels: u32) -> f64 {
    if channels >= 8 {
        0.2
    } else if channels >= 6 {
        0.1
    } else {
        0.0
    }
}

pub fn object_audio_bonus(family: CodecFamily, lossless: bool, is_object: bool, kbps: f64) -> f64 {
    if !is_object || lossless {
        return 0.0;
    }

    match family {
        CodecFamily::Eac3 if kbps >= 448.0 => OBJECT_AUDIO_BONUS,
        CodecFamily::Dts if kbps >= 1500.0 => OBJECT_AUDIO_BONUS,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AudioStreamScore {
    pub family: CodecFamily,
    pub lossless: bool,
    pub kbps: f64,
    pub classification: AudioClassification,
    pub score: f64,
}

pub fn score_audio_stream(stream: &StreamRecord) -> AudioStreamScore {
    let family = CodecFamily::from_codec_name(&stream.codec_name);
    let lossless = family.is_lossless(stream.profile.as_deref());
    let kbps = audio_bit_rate(stream).map_or(0.0, |bps| bps as f64 / 1000.0);
    let classification = classify_audio(stream);

    let score = base_score(family, lossless, kbps, stream.channels)
        + channel_bonus(stream.channels)
        + object_audio_bonus(family, lossless, classification.is_object_audio, kbps);

    AudioStreamScore {
        family,
        lossless,
        kbps,
        classification,
        score: score.clamp(0.0, MAX_SCORE),
    }
}

/// Best single-track score; 0.0 for a file without audio.
pub fn score_audio<'a, I>(streams: I) -> f64
where
    I: IntoIterator<Item = &'a StreamRecord>,
{
    streams
        .into_iter()
        .filter(|s| s.is_audio())
        .map(|s| score_audio_stream(s).score)
        .fold(0.0, f64::max)
}
