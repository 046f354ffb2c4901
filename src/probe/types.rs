use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Decoded `ffprobe -show_streams -show_format` document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProbeOutput {
    #[serde(default)]
    pub streams: Vec<StreamRecord>,
    #[serde(default)]
    pub format: FormatRecord,
}

impl ProbeOutput {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn audio_streams(&self) -> impl Iterator<Item = &StreamRecord> {
        self.streams.iter().filter(|s| s.is_audio())
    }
}

/// Container level attributes. ffprobe prints numbers as strings here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FormatRecord {
    #[serde(default)]
    pub format_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub size: Option<u64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub bit_rate: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StreamRecord {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub codec_type: String,
    #[serde(default)]
    pub codec_name: String,
    #[serde(default)]
    pub codec_long_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub profile: Option<String>,
    #[serde(default)]
    pub codec_tag_string: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub pix_fmt: Option<String>,
    #[serde(default)]
    pub color_transfer: Option<String>,
    #[serde(default)]
    pub channels: u32,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub bit_rate: Option<u64>,
    #[serde(default)]
    pub side_data_list: Vec<SideData>,
    #[serde(default)]
    pub disposition: Disposition,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SideData {
    #[serde(default)]
    pub side_data_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Disposition {
    #[serde(default)]
    pub attached_pic: u8,
}

/// Matroska statistics tags carrying the stream bit rate, in lookup order.
const BIT_RATE_TAGS: &[&str] = &["BPS", "BPS-eng"];

impl StreamRecord {
    pub fn is_video(&self) -> bool {
        self.codec_type == "video"
    }

    pub fn is_audio(&self) -> bool {
        self.codec_type == "audio"
    }

    /// Cover art is muxed as a single-frame video stream.
    pub fn is_attached_picture(&self) -> bool {
        self.disposition.attached_pic == 1
    }

    pub fn language(&self) -> &str {
        self.tags.get("language").map(String::as_str).unwrap_or("und")
    }

    pub fn tag_bit_rate(&self) -> Option<u64> {
        BIT_RATE_TAGS
            .iter()
            .filter_map(|key| self.tags.get(*key))
            .find_map(|value| value.trim().parse::<u64>().ok())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

fn lenient_u64<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite() && *v >= 0.0).map(|v| v as u64)),
        Some(NumberOrText::Text(s)) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite() && *v >= 0.0)
                    .map(|v| v as u64)
            })
        }
        None => None,
    };
    Ok(value)
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => n.as_f64(),
        Some(NumberOrText::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => Some(n.to_string()),
        Some(NumberOrText::Text(s)) => Some(s),
        None => None,
    })
}

fn lenient_tags<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const UHD_REMUX: &str = r#"{
        "streams": [
            {
                "index": 0,
                "codec_name": "hevc",
                "codec_long_name": "H.265 / HEVC (High Efficiency Video Coding)",
                "profile": "Main 10",
                "codec_type": "video",
                "codec_tag_string": "[0][0][0][0]",
                "width": 3840,
                "height": 2160,
                "pix_fmt": "yuv420p10le",
                "color_transfer": "smpte2084",
                "side_data_list": [
                    { "side_data_type": "DOVI configuration record", "dv_profile": 7 }
                ],
                "disposition": { "default": 1, "attached_pic": 0 },
                "tags": { "BPS": "45000000", "language": "eng" }
            },
            {
                "index": 1,
                "codec_name": "truehd",
                "codec_long_name": "TrueHD",
                "codec_type": "audio",
                "channels": 8,
                "disposition": { "default": 1, "attached_pic": 0 },
                "tags": { "language": "eng", "title": "TrueHD Atmos 7.1", "BPS-eng": "4500000" }
            },
            {
                "index": 2,
                "codec_name": "mjpeg",
                "codec_type": "video",
                "width": 600,
                "height": 900,
                "disposition": { "default": 0, "attached_pic": 1 },
                "tags": { "filename": "cover.jpg" }
            }
        ],
        "format": {
            "format_name": "matroska,webm",
            "duration": "7200.000000",
            "size": "40500000000",
            "bit_rate": "45000000"
        }
    }"#;

    #[test]
    fn test_parse_ffprobe_document() {
        let probe = ProbeOutput::from_json(UHD_REMUX).unwrap();

        assert_eq!(probe.streams.len(), 3);
        assert_eq!(probe.format.size, Some(40_500_000_000));
        assert_eq!(probe.format.duration, Some(7200.0));
        assert_eq!(probe.format.bit_rate, Some(45_000_000));
        assert_eq!(probe.format.format_name.as_deref(), Some("matroska,webm"));

        let video = &probe.streams[0];
        assert!(video.is_video());
        assert_eq!(video.width, 3840);
        assert_eq!(video.bit_rate, None);
        assert_eq!(video.color_transfer.as_deref(), Some("smpte2084"));
        assert_eq!(video.side_data_list[0].side_data_type, "DOVI configuration record");
        assert_eq!(video.tag_bit_rate(), Some(45_000_000));

        let audio = &probe.streams[1];
        assert!(audio.is_audio());
        assert_eq!(audio.channels, 8);
        assert_eq!(audio.language(), "eng");
        assert_eq!(audio.tag_bit_rate(), Some(4_500_000));

        assert!(probe.streams[2].is_attached_picture());
        assert_eq!(probe.streams.iter().filter(|s| s.is_video()).count(), 2);
        assert_eq!(probe.audio_streams().count(), 1);
    }

    #[test]
    fn test_missing_fields_default() {
        let probe = ProbeOutput::from_json(r#"{"streams": [{"codec_type": "audio"}]}"#).unwrap();
        let audio = &probe.streams[0];

        assert_eq!(audio.codec_name, "");
        assert_eq!(audio.channels, 0);
        assert_eq!(audio.bit_rate, None);
        assert_eq!(audio.language(), "und");
        assert_eq!(probe.format, FormatRecord::default());
    }

    #[test]
    fn test_lenient_numbers() {
        let probe = ProbeOutput::from_json(
            r#"{
                "streams": [{"codec_type": "audio", "bit_rate": 640000, "profile": 2}],
                "format": {"duration": "N/A", "size": 1024, "bit_rate": "12.5"}
            }"#,
        )
        .unwrap();

        assert_eq!(probe.streams[0].bit_rate, Some(640_000));
        assert_eq!(probe.streams[0].profile.as_deref(), Some("2"));
        assert_eq!(probe.format.duration, None);
        assert_eq!(probe.format.size, Some(1024));
        assert_eq!(probe.format.bit_rate, Some(12));
    }

    #[test]
    fn test_malformed_document_is_error() {
        assert!(ProbeOutput::from_json("").is_err());
        assert!(ProbeOutput::from_json(r#"{"streams": {}}"#).is_err());
    }
}
