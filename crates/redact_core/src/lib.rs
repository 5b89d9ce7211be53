//! Redact Core - audio redaction engine
//!
//! Replaces chosen time ranges of an audio file with a fixed-frequency
//! tone, leaving everything else untouched. Media work is delegated to
//! FFmpeg behind the [`media::MediaEngine`] trait.

pub mod config;
pub mod logging;
pub mod media;
pub mod redaction;

pub use redaction::{
    convert_audio_format, get_audio_info, redact_audio_segments, RedactError, RedactErrorKind,
    RedactionReport, Redactor, TimeRange,
};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
