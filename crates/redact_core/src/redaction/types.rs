//! Timeline types shared by the redaction stages.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A span to redact, in seconds.
///
/// Serialized as a `[start, end]` pair, the shape transcript analysis emits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Both bounds are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }

    /// Clamp into `[0, total]`, never letting `end` precede `start`.
    pub fn clamped(&self, total: f64) -> Self {
        let start = self.start.max(0.0).min(total);
        let end = self.end.min(total).max(start);
        Self { start, end }
    }
}

impl From<(f64, f64)> for TimeRange {
    fn from((start, end): (f64, f64)) -> Self {
        Self { start, end }
    }
}

impl From<TimeRange> for (f64, f64) {
    fn from(range: TimeRange) -> Self {
        (range.start, range.end)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}s, {:.3}s]", self.start, self.end)
    }
}

/// What a segment is rebuilt from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Audio copied from the input.
    Original,
    /// Synthesized replacement tone.
    Tone,
}

impl SegmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::Original => "original",
            SegmentKind::Tone => "tone",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed slice `[start, end)` of the output timeline. Always `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn original(start: f64, end: f64) -> Self {
        Self {
            kind: SegmentKind::Original,
            start,
            end,
        }
    }

    pub fn tone(start: f64, end: f64) -> Self {
        Self {
            kind: SegmentKind::Tone,
            start,
            end,
        }
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_tone(&self) -> bool {
        self.kind == SegmentKind::Tone
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.3}-{:.3}", self.kind, self.start, self.end)
    }
}

/// An intermediate clip on disk holding the audio for one segment.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterializedClip {
    pub segment: Segment,
    pub path: PathBuf,
}

impl MaterializedClip {
    pub fn path(&self) -> &Path {
        &self.path
    }
}
