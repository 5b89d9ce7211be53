//! Error types for the redaction pipeline.
//!
//! Errors carry context that chains through layers:
//! Stage → Segment → Tool → Detail

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::types::Segment;
use crate::media::MediaError;

/// Failure of one redaction call.
#[derive(Error, Debug)]
pub enum RedactError {
    /// The input could not be probed.
    #[error("Failed to probe '{}': {source}", .path.display())]
    Probe {
        path: PathBuf,
        #[source]
        source: MediaError,
    },

    /// The input has no audio stream, so there is nothing to redact.
    #[error("No audio stream found in '{}'", .path.display())]
    NoAudioStream { path: PathBuf },

    /// An original segment could not be cut from the input.
    #[error("Failed to extract {segment}: {source}")]
    Extraction {
        segment: Segment,
        #[source]
        source: MediaError,
    },

    /// A tone request was rejected before reaching the engine.
    #[error("Invalid tone duration {duration}s")]
    InvalidTone { duration: f64 },

    /// The engine failed to synthesize a tone.
    #[error("Failed to generate {duration:.3}s tone: {source}")]
    ToneGeneration {
        duration: f64,
        #[source]
        source: MediaError,
    },

    /// Clips could not be joined, or the final output could not be written.
    #[error("Failed to write '{}' from {clips} clip(s): {message}", .output.display())]
    Concatenation {
        output: PathBuf,
        clips: usize,
        message: String,
        #[source]
        source: Option<MediaError>,
    },

    /// The working directory could not be prepared.
    #[error("Failed to prepare working directory '{}': {source}", .path.display())]
    Setup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Coarse failure category, for callers that branch on the kind of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedactErrorKind {
    Probe,
    Extraction,
    ToneGeneration,
    Concatenation,
    Setup,
}

impl RedactErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedactErrorKind::Probe => "probe",
            RedactErrorKind::Extraction => "extraction",
            RedactErrorKind::ToneGeneration => "tone_generation",
            RedactErrorKind::Concatenation => "concatenation",
            RedactErrorKind::Setup => "setup",
        }
    }
}

impl fmt::Display for RedactErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RedactError {
    /// Create a probe error.
    pub fn probe(path: impl Into<PathBuf>, source: MediaError) -> Self {
        Self::Probe {
            path: path.into(),
            source,
        }
    }

    /// Create a no-audio-stream error.
    pub fn no_audio_stream(path: impl Into<PathBuf>) -> Self {
        Self::NoAudioStream { path: path.into() }
    }

    /// Create an extraction error.
    pub fn extraction(segment: Segment, source: MediaError) -> Self {
        Self::Extraction { segment, source }
    }

    /// Create a tone generation error.
    pub fn tone_generation(duration: f64, source: MediaError) -> Self {
        Self::ToneGeneration { duration, source }
    }

    /// Create a concatenation error caused by the engine.
    pub fn concatenation(output: impl Into<PathBuf>, clips: usize, source: MediaError) -> Self {
        Self::Concatenation {
            output: output.into(),
            clips,
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create a concatenation error for a precondition violation.
    pub fn concatenation_precondition(
        output: impl Into<PathBuf>,
        clips: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Concatenation {
            output: output.into(),
            clips,
            message: message.into(),
            source: None,
        }
    }

    /// Create a setup error.
    pub fn setup(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Setup {
            path: path.into(),
            source,
        }
    }

    /// The category of this error.
    ///
    /// A missing audio stream is a probe-stage failure.
    pub fn kind(&self) -> RedactErrorKind {
        match self {
            RedactError::Probe { .. } | RedactError::NoAudioStream { .. } => {
                RedactErrorKind::Probe
            }
            RedactError::Extraction { .. } => RedactErrorKind::Extraction,
            RedactError::InvalidTone { .. } | RedactError::ToneGeneration { .. } => {
                RedactErrorKind::ToneGeneration
            }
            RedactError::Concatenation { .. } => RedactErrorKind::Concatenation,
            RedactError::Setup { .. } => RedactErrorKind::Setup,
        }
    }

    /// This error followed by every `source()` in its chain, joined by " <- ".
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            out.push_str(" <- ");
            out.push_str(&err.to_string());
            source = std::error::Error::source(err);
        }
        out
    }
}

/// Result type for redaction operations.
pub type RedactResult<T> = Result<T, RedactError>;
