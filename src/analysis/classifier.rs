//! HDR / Dolby Vision classification for video streams and object-audio
//! detection for audio streams.
//!
//! All marker matching goes through [`contains_any_marker`] and
//! [`first_marker_group`], which operate on an already lower-cased search
//! string so the rules can be tested without building stream records.

use serde::Serialize;

use crate::probe::StreamRecord;

pub const DOLBY_VISION_SIDE_DATA_MARKERS: &[&str] = &["dovi", "dolby vision"];
pub const DOLBY_VISION_CODEC_TAGS: &[&str] = &["dvh1", "dvhe"];
pub const HDR_TRANSFERS: &[&str] = &["smpte2084", "arib-std-b67"];

pub const OBJECT_AUDIO_MARKERS: &[&str] = &[
    "atmos", "dts:x", "dtsx", "dts x", "auro", "auro-3d", "mpeg-h", "3d audio",
];

/// Variant lookup table, in priority order.
const OBJECT_AUDIO_VARIANTS: &[(ObjectAudioVariant, &[&str])] = &[
    (ObjectAudioVariant::Atmos, &["atmos"]),
    (ObjectAudioVariant::DtsX, &["dts:x", "dtsx", "dts x"]),
    (ObjectAudioVariant::Auro3d, &["auro", "auro-3d"]),
    (ObjectAudioVariant::MpegH, &["mpeg-h", "3d audio"]),
];

pub fn contains_any_marker(haystack: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| haystack.contains(marker))
}

/// Returns the tag of the first group with a marker present in `haystack`.
pub fn first_marker_group<T: Copy>(haystack: &str, groups: &[(T, &[&str])]) -> Option<T> {
    groups
        .iter()
        .find(|(_, markers)| contains_any_marker(haystack, markers))
        .map(|(tag, _)| *tag)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HdrLabel {
    DolbyVision,
    #[serde(rename = "HDR")]
    Hdr,
    #[serde(rename = "SDR")]
    Sdr,
}

impl HdrLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DolbyVision => "Dolby Vision",
            Self::Hdr => "HDR",
            Self::Sdr => "SDR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VideoClassification {
    pub is_hdr: bool,
    pub is_dolby_vision: bool,
    pub label: HdrLabel,
}

impl VideoClassification {
    pub fn from_flags(is_hdr: bool, is_dolby_vision: bool) -> Self {
        // Dolby Vision always carries an HDR base layer.
        let is_hdr = is_hdr || is_dolby_vision;
        let label = if is_dolby_vision {
            HdrLabel::DolbyVision
        } else if is_hdr {
            HdrLabel::Hdr
        } else {
            HdrLabel::Sdr
        };

        Self {
            is_hdr,
            is_dolby_vision,
            label,
        }
    }

    pub fn sdr() -> Self {
        Self::from_flags(false, false)
    }

    /// Folds per-stream results into a file level classification: the file is
    /// HDR (or Dolby Vision) when any of its video streams is.
    pub fn merge(self, other: Self) -> Self {
        Self::from_flags(
            self.is_hdr || other.is_hdr,
            self.is_dolby_vision || other.is_dolby_vision,
        )
    }
}

pub fn detect_dolby_vision(stream: &StreamRecord) -> bool {
    let side_data_match = stream.side_data_list.iter().any(|side_data| {
        contains_any_marker(
            &side_data.side_data_type.to_lowercase(),
            DOLBY_VISION_SIDE_DATA_MARKERS,
        )
    });

    side_data_match
        || DOLBY_VISION_CODEC_TAGS.contains(&stream.codec_tag_string.to_lowercase().as_str())
}

pub fn has_hdr_transfer(color_transfer: Option<&str>) -> bool {
    color_transfer.is_some_and(|transfer| HDR_TRANSFERS.contains(&transfer))
}

pub fn classify_video(stream: &StreamRecord) -> VideoClassification {
    VideoClassification::from_flags(
        has_hdr_transfer(stream.color_transfer.as_deref()),
        detect_dolby_vision(stream),
    )
}

pub fn bit_depth_label(pix_fmt: Option<&str>) -> &'static str {
    match pix_fmt {
        Some(fmt) if fmt.contains("10") => "10-bit",
        _ => "8-bit",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectAudioVariant {
    Atmos,
    #[serde(rename = "DTS:X")]
    DtsX,
    #[serde(rename = "Auro-3D")]
    Auro3d,
    #[serde(rename = "MPEG-H")]
    MpegH,
}

impl ObjectAudioVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Atmos => "Atmos",
            Self::DtsX => "DTS:X",
            Self::Auro3d => "Auro-3D",
            Self::MpegH => "MPEG-H",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudioClassification {
    pub is_object_audio: bool,
    pub variant: Option<ObjectAudioVariant>,
}

/// Lower-cased concatenation of every descriptive field of an audio stream.
pub fn audio_search_text(stream: &StreamRecord) -> String {
    let mut parts = vec![
        stream.codec_name.as_str(),
        stream.codec_long_name.as_str(),
        stream.profile.as_deref().unwrap_or(""),
    ];
    parts.extend(stream.tags.values().map(String::as_str));
    parts.join(" ").to_lowercase()
}

pub fn classify_object_audio(search_text: &str) -> AudioClassification {
    AudioClassification {
        is_object_audio: contains_any_marker(search_text, OBJECT_AUDIO_MARKERS),
        variant: first_marker_group(search_text, OBJECT_AUDIO_VARIANTS),
    }
}

pub fn classify_audio(stream: &StreamRecord) -> AudioClassification {
    classify_object_audio(&audio_search_text(stream))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::SideData;

    fn video(transfer: Option<&str>, tag: &str, side_data: &[&str]) -> StreamRecord {
        StreamRecord {
            codec_type: "video".to_string(),
            codec_name: "hevc".to_string(),
            codec_tag_string: tag.to_string(),
            color_transfer: transfer.map(str::to_string),
            side_data_list: side_data
                .iter()
                .map(|t| SideData {
                    side_data_type: t.to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_marker_helpers() {
        assert!(contains_any_marker("dolby truehd atmos", OBJECT_AUDIO_MARKERS));
        assert!(!contains_any_marker("aac lc", OBJECT_AUDIO_MARKERS));
        assert!(!contains_any_marker("", OBJECT_AUDIO_MARKERS));

        let groups: &[(u8, &[&str])] = &[(1, &["x"]), (2, &["y", "z"])];
        assert_eq!(first_marker_group("zzz", groups), Some(2));
        assert_eq!(first_marker_group("xyz", groups), Some(1));
        assert_eq!(first_marker_group("abc", groups), None);
    }

    #[test]
    fn test_dolby_vision_from_side_data() {
        let stream = video(None, "[0][0][0][0]", &["DOVI configuration record"]);
        assert!(detect_dolby_vision(&stream));

        let stream = video(None, "", &["Dolby Vision RPU Data"]);
        assert!(detect_dolby_vision(&stream));

        let stream = video(None, "", &["Mastering display metadata"]);
        assert!(!detect_dolby_vision(&stream));
    }

    #[test]
    fn test_dolby_vision_from_codec_tag() {
        assert!(detect_dolby_vision(&video(None, "dvh1", &[])));
        assert!(detect_dolby_vision(&video(None, "DVHE", &[])));
        assert!(!detect_dolby_vision(&video(None, "hvc1", &[])));
        assert!(!detect_dolby_vision(&video(None, "dvh1x", &[])));
    }

    #[test]
    fn test_hdr_label_precedence() {
        let dv = classify_video(&video(Some("bt709"), "dvhe", &[]));
        assert!(dv.is_dolby_vision);
        assert!(dv.is_hdr);
        assert_eq!(dv.label, HdrLabel::DolbyVision);

        let hdr10 = classify_video(&video(Some("smpte2084"), "hev1", &[]));
        assert!(hdr10.is_hdr);
        assert!(!hdr10.is_dolby_vision);
        assert_eq!(hdr10.label, HdrLabel::Hdr);

        let hlg = classify_video(&video(Some("arib-std-b67"), "", &[]));
        assert_eq!(hlg.label, HdrLabel::Hdr);

        let sdr = classify_video(&video(Some("bt709"), "avc1", &[]));
        assert_eq!(sdr, VideoClassification::sdr());
        assert_eq!(sdr.label.as_str(), "SDR");

        let unknown = classify_video(&video(None, "", &[]));
        assert_eq!(unknown.label, HdrLabel::Sdr);
    }

    #[test]
    fn test_dolby_vision_implies_hdr() {
        for (hdr, dv) in [(false, false), (false, true), (true, false), (true, true)] {
            let classification = VideoClassification::from_flags(hdr, dv);
            if classification.is_dolby_vision {
                assert!(classification.is_hdr);
            }
        }
    }

    #[test]
    fn test_merge_file_level() {
        let merged = VideoClassification::sdr()
            .merge(VideoClassification::from_flags(false, true));
        assert_eq!(merged.label, HdrLabel::DolbyVision);

        let merged = VideoClassification::from_flags(true, false).merge(VideoClassification::sdr());
        assert_eq!(merged.label, HdrLabel::Hdr);
    }

    #[test]
    fn test_bit_depth_label() {
        assert_eq!(bit_depth_label(Some("yuv420p10le")), "10-bit");
        assert_eq!(bit_depth_label(Some("yuv420p")), "8-bit");
        assert_eq!(bit_depth_label(None), "8-bit");
    }

    #[test]
    fn test_object_audio_variants() {
        let cases = [
            ("eac3 e-ac-3 (dolby digital plus + dolby atmos)", Some(ObjectAudioVariant::Atmos)),
            ("dts dca dts-hd ma + dts:x", Some(ObjectAudioVariant::DtsX)),
            ("dts dca dtsx", Some(ObjectAudioVariant::DtsX)),
            ("dts dca dts x master", Some(ObjectAudioVariant::DtsX)),
            ("pcm auro-3d 11.1", Some(ObjectAudioVariant::Auro3d)),
            ("mpegh 3d audio", Some(ObjectAudioVariant::MpegH)),
            ("mha1 mpeg-h", Some(ObjectAudioVariant::MpegH)),
            ("aac lc stereo", None),
        ];

        for (text, expected) in cases {
            let classification = classify_object_audio(text);
            assert_eq!(classification.variant, expected, "{}", text);
            assert_eq!(classification.is_object_audio, expected.is_some(), "{}", text);
        }
    }

    #[test]
    fn test_object_audio_priority() {
        // Atmos wins over every other marker in the same text.
        let classification = classify_object_audio("dts:x atmos mpeg-h");
        assert_eq!(classification.variant, Some(ObjectAudioVariant::Atmos));
    }

    #[test]
    fn test_audio_search_text_includes_tags() {
        let mut stream = StreamRecord {
            codec_type: "audio".to_string(),
            codec_name: "truehd".to_string(),
            codec_long_name: "TrueHD".to_string(),
            ..Default::default()
        };
        stream
            .tags
            .insert("title".to_string(), "English Dolby ATMOS 7.1".to_string());

        let text = audio_search_text(&stream);
        assert!(text.starts_with("truehd truehd "));
        assert!(text.contains("atmos"));

        let classification = classify_audio(&stream);
        assert!(classification.is_object_audio);
        assert_eq!(classification.variant.map(|v| v.as_str()), Some("Atmos"));
    }
}
