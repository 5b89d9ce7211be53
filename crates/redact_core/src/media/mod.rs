//! External media engine boundary.
//!
//! - **Engine trait**: probe / extract / synthesize tone / concat / transcode
//! - **FFmpeg engine**: the production implementation (`ffmpeg`, `ffprobe`)
//! - **Probe parsing**: ffprobe JSON → [`AudioInfo`]
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use redact_core::media::{FfmpegEngine, MediaEngine};
//!
//! let engine = FfmpegEngine::new();
//! if let Some(info) = engine.probe(Path::new("call.wav")).unwrap() {
//!     println!("{:.2}s @ {} Hz", info.duration, info.sample_rate);
//! }
//! ```

mod engine;
mod ffmpeg;
mod probe;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::MediaEngine;
pub use ffmpeg::FfmpegEngine;
pub use probe::parse_ffprobe_json;
pub use types::{AudioInfo, MediaError, MediaResult, ToneSpec};
