//! Replacement tone generation.

use std::path::Path;

use super::error::{RedactError, RedactResult};
use super::planner::MIN_SEGMENT_SECS;
use crate::config::ToneSettings;
use crate::media::{MediaEngine, ToneSpec};

/// Linear fade applied at each end of a tone, in seconds.
pub const FADE_SECS: f64 = 0.01;

/// Tones must be longer than this to be faded (fade-in + fade-out).
pub const MIN_FADED_SECS: f64 = 2.0 * FADE_SECS;

/// Produces fixed-frequency mono tone clips of arbitrary length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneGenerator {
    frequency: u32,
    sample_rate: u32,
}

impl ToneGenerator {
    pub fn new(frequency: u32, sample_rate: u32) -> Self {
        Self {
            frequency,
            sample_rate,
        }
    }

    pub fn from_settings(settings: &ToneSettings) -> Self {
        Self::new(settings.frequency_hz, settings.sample_rate)
    }

    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Describe a tone of `duration` seconds.
    ///
    /// Clips longer than 20 ms get a 10 ms fade at both ends to avoid
    /// clicks at the splice points; shorter clips are left unfaded.
    /// Durations under [`MIN_SEGMENT_SECS`] are rejected.
    pub fn spec(&self, duration: f64) -> RedactResult<ToneSpec> {
        if !duration.is_finite() || duration < MIN_SEGMENT_SECS {
            return Err(RedactError::InvalidTone { duration });
        }

        Ok(ToneSpec {
            duration,
            frequency: self.frequency,
            sample_rate: self.sample_rate,
            fade: (duration > MIN_FADED_SECS).then_some(FADE_SECS),
        })
    }

    /// Write a tone of `duration` seconds to `output`.
    ///
    /// On failure `output` may hold a partial file; it must not be used.
    pub fn generate(
        &self,
        engine: &dyn MediaEngine,
        duration: f64,
        output: &Path,
    ) -> RedactResult<()> {
        let spec = self.spec(duration)?;

        tracing::debug!(
            stage = "materialize",
            duration = spec.duration,
            frequency = spec.frequency,
            faded = spec.fade.is_some(),
            "Generating tone {}",
            output.display()
        );

        engine
            .synthesize_tone(&spec, output)
            .map_err(|e| RedactError::tone_generation(duration, e))
    }
}

impl Default for ToneGenerator {
    fn default() -> Self {
        Self::from_settings(&ToneSettings::default())
    }
}
