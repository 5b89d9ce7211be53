//! Clip concatenation and intermediate cleanup.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::{RedactError, RedactResult};
use super::types::MaterializedClip;
use crate::config::OutputSettings;
use crate::media::MediaEngine;

/// Joins materialized clips into the final output.
pub struct Concatenator<'a> {
    engine: &'a dyn MediaEngine,
    encoding: &'a OutputSettings,
}

impl<'a> Concatenator<'a> {
    pub fn new(engine: &'a dyn MediaEngine, encoding: &'a OutputSettings) -> Self {
        Self { engine, encoding }
    }

    /// Write `clips`, in the given order, to `output`.
    ///
    /// - one clip: copied/transcoded straight to `output` (container follows
    ///   the output file name)
    /// - several clips: joined and re-encoded with the configured codec and
    ///   format
    /// - no clips: precondition violation, reported as a concatenation error
    ///
    /// Every clip is deleted afterwards, whether or not the join succeeded.
    pub fn concatenate(&self, clips: &[MaterializedClip], output: &Path) -> RedactResult<()> {
        let result = self.join(clips, output);
        cleanup_clips(clips);
        result
    }

    fn join(&self, clips: &[MaterializedClip], output: &Path) -> RedactResult<()> {
        match clips {
            [] => Err(RedactError::concatenation_precondition(
                output,
                0,
                "no clips to join",
            )),
            [single] => {
                tracing::info!(
                    stage = "concatenate",
                    clips = 1,
                    "Single segment, copying {} to {}",
                    single.path().display(),
                    output.display()
                );
                self.engine
                    .transcode(single.path(), output, None)
                    .map_err(|e| RedactError::concatenation(output, 1, e))
            }
            _ => {
                let paths: Vec<PathBuf> = clips.iter().map(|c| c.path.clone()).collect();
                tracing::info!(
                    stage = "concatenate",
                    clips = paths.len(),
                    codec = %self.encoding.codec,
                    format = %self.encoding.format,
                    "Joining {} clips into {}",
                    paths.len(),
                    output.display()
                );
                self.engine
                    .concat(&paths, output, self.encoding)
                    .map_err(|e| RedactError::concatenation(output, paths.len(), e))
            }
        }
    }
}

/// Delete every clip file, best effort. Returns how many were removed.
pub fn cleanup_clips(clips: &[MaterializedClip]) -> usize {
    let removed = clips
        .iter()
        .filter(|clip| remove_clip_file(clip.path()))
        .count();

    tracing::debug!(
        stage = "cleanup",
        removed,
        total = clips.len(),
        "Removed {} intermediate clip(s)",
        removed
    );

    removed
}

/// Delete one intermediate file. A file that is already gone is fine;
/// any other failure is logged and swallowed.
pub(crate) fn remove_clip_file(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            tracing::warn!(
                stage = "cleanup",
                "Could not remove {}: {}",
                path.display(),
                e
            );
            false
        }
    }
}
