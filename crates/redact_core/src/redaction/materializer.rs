//! Segment materialization.
//!
//! Realizes each planned segment as a PCM WAV clip in the working
//! directory: ORIGINAL segments are cut from the input, TONE segments are
//! synthesized. The input file is never modified.

use std::path::{Path, PathBuf};

use super::concat::{cleanup_clips, remove_clip_file};
use super::error::{RedactError, RedactResult};
use super::tone::ToneGenerator;
use super::types::{MaterializedClip, Segment, SegmentKind};
use crate::media::MediaEngine;

/// Builds intermediate clips for one redaction call.
pub struct Materializer<'a> {
    engine: &'a dyn MediaEngine,
    tone: ToneGenerator,
    work_dir: &'a Path,
}

impl<'a> Materializer<'a> {
    pub fn new(engine: &'a dyn MediaEngine, tone: ToneGenerator, work_dir: &'a Path) -> Self {
        Self {
            engine,
            tone,
            work_dir,
        }
    }

    /// Path of the clip for the `index`-th segment.
    ///
    /// The index keeps names unique within a call even when two segments
    /// share rounded bounds.
    pub fn clip_path(&self, index: usize, segment: &Segment) -> PathBuf {
        self.work_dir.join(format!(
            "seg_{:03}_{}_{:.3}_{:.3}.wav",
            index, segment.kind, segment.start, segment.end
        ))
    }

    /// Materialize a single segment.
    ///
    /// The segment that reaches `total_duration` is cut without an explicit
    /// length so the input's exact tail is kept.
    pub fn materialize(
        &self,
        input: &Path,
        index: usize,
        segment: &Segment,
        total_duration: f64,
    ) -> RedactResult<MaterializedClip> {
        let path = self.clip_path(index, segment);

        match segment.kind {
            SegmentKind::Original => {
                let duration = (segment.end < total_duration).then(|| segment.duration());
                tracing::debug!(
                    stage = "materialize",
                    index,
                    start = segment.start,
                    end = segment.end,
                    "Extracting original audio to {}",
                    path.display()
                );
                self.engine
                    .extract(input, segment.start, duration, &path)
                    .map_err(|e| RedactError::extraction(*segment, e))?;
            }
            SegmentKind::Tone => {
                self.tone
                    .generate(self.engine, segment.duration(), &path)?;
            }
        }

        Ok(MaterializedClip {
            segment: *segment,
            path,
        })
    }

    /// Materialize every segment in order.
    ///
    /// Stops at the first failure; clips already written, and whatever the
    /// failing step left behind, are removed before the error is returned.
    pub fn materialize_all(
        &self,
        input: &Path,
        segments: &[Segment],
        total_duration: f64,
    ) -> RedactResult<Vec<MaterializedClip>> {
        let mut clips = Vec::with_capacity(segments.len());

        for (index, segment) in segments.iter().enumerate() {
            match self.materialize(input, index, segment, total_duration) {
                Ok(clip) => clips.push(clip),
                Err(e) => {
                    tracing::error!(
                        stage = "materialize",
                        index,
                        segment = %segment,
                        "Segment failed: {}",
                        e
                    );
                    remove_clip_file(&self.clip_path(index, segment));
                    cleanup_clips(&clips);
                    return Err(e);
                }
            }
        }

        tracing::info!(
            stage = "materialize",
            clips = clips.len(),
            "Materialized {} clip(s)",
            clips.len()
        );

        Ok(clips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::testing::{Call, FailOn, FakeEngine};
    use crate::redaction::planner::plan;
    use crate::redaction::types::TimeRange;
    use std::fs;
    use tempfile::tempdir;

    fn scenario() -> Vec<Segment> {
        plan(
            10.0,
            &[TimeRange::new(2.0, 4.0), TimeRange::new(6.0, 7.0)],
        )
    }

    fn dir_entries(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }

    #[test]
    fn clip_names_are_indexed() {
        let dir = tempdir().unwrap();
        let engine = FakeEngine::with_duration(10.0);
        let materializer = Materializer::new(&engine, ToneGenerator::default(), dir.path());

        let path = materializer.clip_path(3, &Segment::tone(6.0, 7.0));
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "seg_003_tone_6.000_7.000.wav"
        );
    }

    #[test]
    fn materializes_each_segment_in_order() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.wav");
        fs::write(&input, "audio").unwrap();
        let work = dir.path().join("work");
        fs::create_dir(&work).unwrap();

        let engine = FakeEngine::with_duration(10.0);
        let materializer = Materializer::new(&engine, ToneGenerator::default(), &work);
        let segments = scenario();

        let clips = materializer.materialize_all(&input, &segments, 10.0).unwrap();

        assert_eq!(clips.len(), 5);
        for (clip, segment) in clips.iter().zip(&segments) {
            assert_eq!(&clip.segment, segment);
            assert!(clip.path().exists());
            assert!(clip.path().starts_with(&work));
        }

        let calls = engine.calls();
        assert_eq!(calls.len(), 5);
        assert!(matches!(
            calls[0],
            Call::Extract { start, duration: Some(d), .. } if start == 0.0 && d == 2.0
        ));
        assert!(matches!(&calls[1], Call::Tone { spec, .. } if spec.duration == 2.0));
        assert!(matches!(
            calls[2],
            Call::Extract { start, duration: Some(d), .. } if start == 4.0 && d == 2.0
        ));
        assert!(matches!(&calls[3], Call::Tone { spec, .. } if spec.duration == 1.0));
        // trailing segment runs to end of input
        assert!(matches!(
            calls[4],
            Call::Extract { start, duration: None, .. } if start == 7.0
        ));
    }

    #[test]
    fn never_touches_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.wav");
        fs::write(&input, "audio").unwrap();
        let work = dir.path().join("work");
        fs::create_dir(&work).unwrap();

        let engine = FakeEngine::with_duration(10.0);
        Materializer::new(&engine, ToneGenerator::default(), &work)
            .materialize_all(&input, &scenario(), 10.0)
            .unwrap();

        assert_eq!(fs::read_to_string(&input).unwrap(), "audio");
    }

    #[test]
    fn extraction_failure_removes_partial_and_prior_clips() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.wav");
        fs::write(&input, "audio").unwrap();
        let work = dir.path().join("work");
        fs::create_dir(&work).unwrap();

        // second extract is segment index 2
        let engine = FakeEngine::with_duration(10.0).failing(FailOn::Extract(1));
        let err = Materializer::new(&engine, ToneGenerator::default(), &work)
            .materialize_all(&input, &scenario(), 10.0)
            .unwrap_err();

        match err {
            RedactError::Extraction { segment, .. } => {
                assert_eq!(segment, Segment::original(4.0, 6.0));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(dir_entries(&work).is_empty());
        assert_eq!(engine.calls().len(), 3);
    }

    #[test]
    fn tone_failure_aborts_and_cleans_up() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.wav");
        fs::write(&input, "audio").unwrap();
        let work = dir.path().join("work");
        fs::create_dir(&work).unwrap();

        let engine = FakeEngine::with_duration(10.0).failing(FailOn::Tone);
        let err = Materializer::new(&engine, ToneGenerator::default(), &work)
            .materialize_all(&input, &scenario(), 10.0)
            .unwrap_err();

        assert!(matches!(err, RedactError::ToneGeneration { .. }));
        assert!(dir_entries(&work).is_empty());
    }
}
