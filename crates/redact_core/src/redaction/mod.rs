//! Audio redaction: replace time ranges of a recording with a tone.
//!
//! The pipeline is split into small stages:
//! - **Planner**: ranges + duration → ordered ORIGINAL / TONE segments (pure)
//! - **Tone**: replacement tone parameters and synthesis
//! - **Materializer**: one intermediate WAV clip per segment
//! - **Concat**: join clips into the output, then delete them
//! - **Redactor**: runs the stages in order and owns the working directory
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use redact_core::config::Settings;
//! use redact_core::redaction::{Redactor, TimeRange};
//!
//! let redactor = Redactor::with_ffmpeg(Settings::default());
//! let report = redactor
//!     .redact(
//!         Path::new("call.wav"),
//!         &[TimeRange::new(2.0, 4.0), TimeRange::new(6.0, 7.0)],
//!         Path::new("call_redacted.mp3"),
//!     )
//!     .unwrap();
//! println!("replaced {:.1}s", report.tone_seconds);
//! ```

mod concat;
mod error;
mod materializer;
mod planner;
mod redactor;
mod tone;
mod types;

pub use concat::{cleanup_clips, Concatenator};
pub use error::{RedactError, RedactErrorKind, RedactResult};
pub use materializer::Materializer;
pub use planner::{normalize_ranges, plan, tone_seconds, MIN_SEGMENT_SECS};
pub use redactor::{
    convert_audio_format, get_audio_info, redact_audio_segments, RedactionReport, Redactor,
};
pub use tone::{ToneGenerator, FADE_SECS, MIN_FADED_SECS};
pub use types::{MaterializedClip, Segment, SegmentKind, TimeRange};
