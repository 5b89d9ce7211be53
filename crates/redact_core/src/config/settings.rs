//! Settings struct with TOML-based sections.
//!
//! Every field has a default, so a partial (or empty) file is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Replacement tone.
    #[serde(default)]
    pub tone: ToneSettings,

    /// Encoding of the reassembled output.
    #[serde(default)]
    pub output: OutputSettings,

    /// Working directories.
    #[serde(default)]
    pub paths: PathSettings,

    /// External tool locations.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Tone used to cover redacted spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneSettings {
    /// Tone frequency in Hz.
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: u32,

    /// Tone sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

fn default_frequency_hz() -> u32 {
    1000
}

fn default_sample_rate() -> u32 {
    44100
}

impl Default for ToneSettings {
    fn default() -> Self {
        Self {
            frequency_hz: default_frequency_hz(),
            sample_rate: default_sample_rate(),
        }
    }
}

/// Output encoding for multi-segment redactions.
///
/// Single-segment results and untouched copies keep the container implied
/// by the output file name instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// FFmpeg audio encoder name.
    #[serde(default = "default_codec")]
    pub codec: String,

    /// FFmpeg muxer name.
    #[serde(default = "default_format")]
    pub format: String,

    /// Optional target bitrate (e.g. "192k").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<String>,
}

fn default_codec() -> String {
    "libmp3lame".to_string()
}

fn default_format() -> String {
    "mp3".to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            codec: default_codec(),
            format: default_format(),
            bitrate: None,
        }
    }
}

/// Working directory configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Directory for intermediate clips. When unset, each redaction gets a
    /// fresh directory under the system temp dir that is removed afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,
}

/// Locations of the FFmpeg binaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: PathBuf,

    #[serde(default = "default_ffprobe")]
    pub ffprobe: PathBuf,
}

fn default_ffmpeg() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_ffprobe() -> PathBuf {
    PathBuf::from("ffprobe")
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg: default_ffmpeg(),
            ffprobe: default_ffprobe(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when RUST_LOG is not set.
    #[serde(default)]
    pub level: LogLevel,
}
