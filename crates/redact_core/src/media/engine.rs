//! Media engine capability.
//!
//! Everything that decodes, encodes or inspects audio goes through this
//! trait, so planning stays pure and the clip/concat stages can be tested
//! without FFmpeg installed.

use std::path::{Path, PathBuf};

use super::types::{AudioInfo, MediaResult, ToneSpec};
use crate::config::OutputSettings;

/// Blocking media operations used by the redaction pipeline.
///
/// Every call must finish (successfully or not) before returning; callers
/// run them strictly one after another.
pub trait MediaEngine: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    /// Describe the first audio stream of `input`.
    ///
    /// Returns `Ok(None)` when the file has no audio stream.
    fn probe(&self, input: &Path) -> MediaResult<Option<AudioInfo>>;

    /// Write `[start, start + duration)` of `input` to `output` as PCM.
    ///
    /// `duration == None` extracts through the end of the input.
    fn extract(
        &self,
        input: &Path,
        start: f64,
        duration: Option<f64>,
        output: &Path,
    ) -> MediaResult<()>;

    /// Synthesize a mono sine tone into `output`.
    fn synthesize_tone(&self, tone: &ToneSpec, output: &Path) -> MediaResult<()>;

    /// Join `clips` in order into `output`, re-encoding with `encoding`.
    fn concat(&self, clips: &[PathBuf], output: &Path, encoding: &OutputSettings)
        -> MediaResult<()>;

    /// Copy or transcode `input` into `output`.
    ///
    /// With `format == None` the container is inferred from `output`.
    fn transcode(&self, input: &Path, output: &Path, format: Option<&str>) -> MediaResult<()>;
}
