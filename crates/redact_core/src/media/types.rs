//! Types exchanged with the media engine.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for media engine operations.
#[derive(Error, Debug)]
pub enum MediaError {
    /// Input file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The tool could not be started at all.
    #[error("Failed to run {tool}: {source}")]
    ToolExecutionFailed {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The tool ran and reported failure.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// Tool output could not be understood.
    #[error("Failed to parse {what}: {message}")]
    ParseError { what: String, message: String },

    /// A request cannot be expressed as a tool argument.
    #[error("Invalid {what}: {message}")]
    InvalidArgument { what: String, message: String },
}

impl MediaError {
    /// Create a tool execution error.
    pub fn tool_execution(tool: impl Into<String>, source: io::Error) -> Self {
        Self::ToolExecutionFailed {
            tool: tool.into(),
            source,
        }
    }

    /// Create a command failed error.
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse_error(what: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            what: what.into(),
            message: message.into(),
        }
    }
}

impl MediaError {
    /// Create an invalid argument error.
    pub fn invalid_argument(what: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            what: what.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for MediaError {
    fn from(e: serde_json::Error) -> Self {
        MediaError::parse_error("ffprobe JSON", e.to_string())
    }
}

/// Result type for media engine operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Snapshot of the first audio stream of a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioInfo {
    /// Duration in seconds.
    pub duration: f64,
    /// Sample rate in Hz (0 when not reported).
    pub sample_rate: u32,
    /// Channel count (0 when not reported).
    pub channels: u32,
    /// Codec name as reported by the prober (e.g. "aac", "pcm_s16le").
    pub codec_name: String,
    /// Bit rate in bits/second, when reported.
    pub bit_rate: Option<u64>,
}

/// Parameters for one synthesized tone clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    /// Length in seconds.
    pub duration: f64,
    /// Frequency in Hz.
    pub frequency: u32,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Linear fade-in/fade-out length in seconds, if any.
    pub fade: Option<f64>,
}
