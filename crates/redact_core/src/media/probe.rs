//! Parsing of `ffprobe -show_streams -show_format -of json` output.

use serde_json::Value;

use super::types::{AudioInfo, MediaError, MediaResult};

/// Extract [`AudioInfo`] for the first audio stream.
///
/// Returns `Ok(None)` when no stream has `codec_type == "audio"`. The
/// stream duration is preferred; containers that only report a duration
/// at format level (Matroska, WebM) fall back to `format.duration`.
pub fn parse_ffprobe_json(json: &Value) -> MediaResult<Option<AudioInfo>> {
    let Some(stream) = json
        .get("streams")
        .and_then(|s| s.as_array())
        .and_then(|streams| {
            streams
                .iter()
                .find(|s| s.get("codec_type").and_then(|t| t.as_str()) == Some("audio"))
        })
    else {
        return Ok(None);
    };

    let duration = number_field(stream, "duration")
        .or_else(|| json.get("format").and_then(|f| number_field(f, "duration")))
        .ok_or_else(|| MediaError::parse_error("audio duration", "no duration reported"))?;

    if !duration.is_finite() || duration < 0.0 {
        return Err(MediaError::parse_error(
            "audio duration",
            format!("invalid value {}", duration),
        ));
    }

    Ok(Some(AudioInfo {
        duration,
        sample_rate: number_field(stream, "sample_rate")
            .map(|v| v as u32)
            .unwrap_or(0),
        channels: number_field(stream, "channels")
            .map(|v| v as u32)
            .unwrap_or(0),
        codec_name: stream
            .get("codec_name")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string(),
        bit_rate: number_field(stream, "bit_rate").map(|v| v as u64),
    }))
}

/// ffprobe prints most numbers as strings ("44100", "12.345000") but some as
/// JSON numbers (`channels`). Accept either.
fn number_field(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
