//! Top-level redaction orchestration.
//!
//! ```text
//! START ─┬─ (no ranges) ──────────────────────────────── COPY ─────────── DONE
//!        └─ PROBE → PLAN → MATERIALIZE (each) → CONCATENATE → CLEANUP → DONE
//! ```
//!
//! Every stage runs to completion before the next starts. Intermediate clips
//! live in a working directory owned by one call: either caller-provided
//! (created if needed, left in place) or a fresh temp directory removed when
//! the call returns.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::TempDir;

use super::concat::Concatenator;
use super::error::{RedactError, RedactResult};
use super::materializer::Materializer;
use super::planner::{plan, tone_seconds};
use super::tone::ToneGenerator;
use super::types::{Segment, TimeRange};
use crate::config::Settings;
use crate::media::{AudioInfo, FfmpegEngine, MediaEngine, MediaError};

/// Summary of a completed redaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedactionReport {
    /// File that was written.
    pub output: PathBuf,
    /// Probed input duration; `None` on the no-redaction copy path.
    pub total_duration: Option<f64>,
    /// Planned timeline (empty on the copy path).
    pub segments: Vec<Segment>,
    /// Seconds replaced by tone.
    pub tone_seconds: f64,
}

impl RedactionReport {
    /// Whether any audio was replaced.
    pub fn redacted(&self) -> bool {
        self.segments.iter().any(Segment::is_tone)
    }
}

/// Runs redactions against one media engine with fixed settings.
pub struct Redactor<E: MediaEngine> {
    engine: E,
    settings: Settings,
}

impl Redactor<FfmpegEngine> {
    /// FFmpeg-backed redactor using the tool paths from `settings`.
    pub fn with_ffmpeg(settings: Settings) -> Self {
        let engine = FfmpegEngine::from_settings(&settings.tools);
        Self::new(engine, settings)
    }
}

impl<E: MediaEngine> Redactor<E> {
    pub fn new(engine: E, settings: Settings) -> Self {
        Self { engine, settings }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Redact `ranges` of `input` into `output`, using the configured
    /// working directory.
    pub fn redact(
        &self,
        input: &Path,
        ranges: &[TimeRange],
        output: &Path,
    ) -> RedactResult<RedactionReport> {
        self.redact_in(input, ranges, output, self.settings.paths.temp_dir.as_deref())
    }

    /// Redact with an explicit working directory (`None` = fresh temp dir).
    pub fn redact_in(
        &self,
        input: &Path,
        ranges: &[TimeRange],
        output: &Path,
        temp_dir: Option<&Path>,
    ) -> RedactResult<RedactionReport> {
        let span = tracing::info_span!(
            "redact",
            input = %input.display(),
            output = %output.display(),
            ranges = ranges.len()
        );
        let _enter = span.enter();

        if !input.exists() {
            return Err(RedactError::probe(
                input,
                MediaError::FileNotFound(input.to_path_buf()),
            ));
        }

        if ranges.is_empty() {
            return self.copy_through(input, output);
        }

        let info = self.probe(input)?;
        let total_duration = info.duration;

        let segments = plan(total_duration, ranges);
        if segments.is_empty() {
            return Err(RedactError::probe(
                input,
                MediaError::parse_error(
                    "audio duration",
                    format!("nothing to redact in {}s of audio", total_duration),
                ),
            ));
        }
        let tone_secs = tone_seconds(&segments);
        tracing::info!(
            stage = "plan",
            segments = segments.len(),
            tone_seconds = tone_secs,
            "Planned {} segment(s) over {:.3}s",
            segments.len(),
            total_duration
        );
        for segment in &segments {
            tracing::debug!(stage = "plan", "  {}", segment);
        }

        let work_dir = WorkDir::prepare(temp_dir)?;
        tracing::debug!(
            stage = "materialize",
            "Working directory: {}",
            work_dir.path().display()
        );

        let tone = ToneGenerator::from_settings(&self.settings.tone);
        let clips = Materializer::new(&self.engine, tone, work_dir.path()).materialize_all(
            input,
            &segments,
            total_duration,
        )?;

        Concatenator::new(&self.engine, &self.settings.output).concatenate(&clips, output)?;

        tracing::info!(
            stage = "concatenate",
            "Redacted {:.3}s of {:.3}s into {}",
            tone_secs,
            total_duration,
            output.display()
        );

        Ok(RedactionReport {
            output: output.to_path_buf(),
            total_duration: Some(total_duration),
            segments,
            tone_seconds: tone_secs,
        })
    }

    /// Probe `input`, treating a missing audio stream as an error.
    pub fn probe(&self, input: &Path) -> RedactResult<AudioInfo> {
        tracing::debug!(stage = "probe", engine = self.engine.name(), "Probing input");

        let info = self
            .engine
            .probe(input)
            .map_err(|e| RedactError::probe(input, e))?
            .ok_or_else(|| RedactError::no_audio_stream(input))?;

        tracing::info!(
            stage = "probe",
            duration = info.duration,
            sample_rate = info.sample_rate,
            channels = info.channels,
            codec = %info.codec_name,
            "Probed input"
        );
        Ok(info)
    }

    /// Convert `input` into `output`, optionally forcing a container format.
    pub fn convert(&self, input: &Path, output: &Path, format: Option<&str>) -> RedactResult<()> {
        self.engine
            .transcode(input, output, format)
            .map_err(|e| RedactError::concatenation(output, 1, e))
    }

    fn copy_through(&self, input: &Path, output: &Path) -> RedactResult<RedactionReport> {
        tracing::info!(stage = "copy", "No ranges to redact, copying input");

        self.convert(input, output, None)?;

        Ok(RedactionReport {
            output: output.to_path_buf(),
            total_duration: None,
            segments: Vec::new(),
            tone_seconds: 0.0,
        })
    }
}

/// Working directory for one call.
enum WorkDir {
    /// Caller-specified; left in place afterwards.
    Provided(PathBuf),
    /// Generated; removed on drop.
    Temporary(TempDir),
}

impl WorkDir {
    fn prepare(requested: Option<&Path>) -> RedactResult<Self> {
        match requested {
            Some(dir) => {
                fs::create_dir_all(dir).map_err(|e| RedactError::setup(dir, e))?;
                Ok(WorkDir::Provided(dir.to_path_buf()))
            }
            None => tempfile::Builder::new()
                .prefix("redact-")
                .tempdir()
                .map(WorkDir::Temporary)
                .map_err(|e| RedactError::setup(env::temp_dir(), e)),
        }
    }

    fn path(&self) -> &Path {
        match self {
            WorkDir::Provided(path) => path,
            WorkDir::Temporary(dir) => dir.path(),
        }
    }
}

/// Log a failed call with its kind and full source chain.
pub(crate) fn log_failure(operation: &str, err: &RedactError) {
    tracing::error!(
        operation,
        kind = %err.kind(),
        error = %err.chain(),
        "{} failed: {}",
        operation,
        err
    );
}

/// Redact with FFmpeg and default settings, reporting only success.
///
/// Failures are logged (kind and cause chain); use [`Redactor`] when the
/// caller needs to act on the error.
pub fn redact_audio_segments(
    input: &Path,
    ranges: &[TimeRange],
    output: &Path,
    temp_dir: Option<&Path>,
) -> bool {
    let redactor = Redactor::with_ffmpeg(Settings::default());
    match redactor.redact_in(input, ranges, output, temp_dir) {
        Ok(_) => true,
        Err(e) => {
            log_failure("Redaction", &e);
            false
        }
    }
}

/// Probe a file with FFmpeg. `None` when it has no audio or cannot be read.
pub fn get_audio_info(path: &Path) -> Option<AudioInfo> {
    let engine = FfmpegEngine::new();
    match engine.probe(path) {
        Ok(info) => info,
        Err(e) => {
            log_failure("Audio info", &RedactError::probe(path, e));
            None
        }
    }
}

/// Convert a file to `target_format` (an FFmpeg muxer name such as "wav").
pub fn convert_audio_format(input: &Path, output: &Path, target_format: &str) -> bool {
    let redactor = Redactor::with_ffmpeg(Settings::default());
    match redactor.convert(input, output, Some(target_format)) {
        Ok(()) => true,
        Err(e) => {
            log_failure("Conversion", &e);
            false
        }
    }
}
