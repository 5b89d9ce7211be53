//! In-memory media engine for tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::engine::MediaEngine;
use super::types::{AudioInfo, MediaError, MediaResult, ToneSpec};
use crate::config::OutputSettings;

/// One recorded engine call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Probe(PathBuf),
    Extract {
        start: f64,
        duration: Option<f64>,
        output: PathBuf,
    },
    Tone {
        spec: ToneSpec,
        output: PathBuf,
    },
    Concat {
        clips: Vec<PathBuf>,
        output: PathBuf,
        codec: String,
    },
    Transcode {
        input: PathBuf,
        output: PathBuf,
        format: Option<String>,
    },
}

/// Which operation should fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailOn {
    Probe,
    /// Fail the n-th (0-based) extract call.
    Extract(usize),
    Tone,
    Concat,
    Transcode,
}

/// Fake engine that writes small placeholder files and records every call.
///
/// Failing operations leave a partial file behind, like a real encoder
/// killed mid-write.
pub struct FakeEngine {
    info: Option<AudioInfo>,
    fail_on: Option<FailOn>,
    calls: Mutex<Vec<Call>>,
}

impl FakeEngine {
    /// Engine whose inputs all have an audio stream of `duration` seconds.
    pub fn with_duration(duration: f64) -> Self {
        Self {
            info: Some(AudioInfo {
                duration,
                sample_rate: 48000,
                channels: 2,
                codec_name: "pcm_s16le".to_string(),
                bit_rate: None,
            }),
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Engine whose inputs have no audio stream.
    pub fn without_audio() -> Self {
        Self {
            info: None,
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(mut self, fail_on: FailOn) -> Self {
        self.fail_on = Some(fail_on);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn extract_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, Call::Extract { .. }))
            .count()
    }

    fn write(&self, output: &Path, body: &str, fail: bool) -> MediaResult<()> {
        if fail {
            let _ = fs::write(output, "partial");
            return Err(MediaError::command_failed("fake", 1, "injected failure"));
        }
        fs::write(output, body).map_err(|e| MediaError::tool_execution("fake", e))
    }
}

impl MediaEngine for FakeEngine {
    fn name(&self) -> &str {
        "fake"
    }

    fn probe(&self, input: &Path) -> MediaResult<Option<AudioInfo>> {
        self.record(Call::Probe(input.to_path_buf()));
        if self.fail_on == Some(FailOn::Probe) {
            return Err(MediaError::command_failed("fake", 1, "unreadable input"));
        }
        if !input.exists() {
            return Err(MediaError::FileNotFound(input.to_path_buf()));
        }
        Ok(self.info.clone())
    }

    fn extract(
        &self,
        input: &Path,
        start: f64,
        duration: Option<f64>,
        output: &Path,
    ) -> MediaResult<()> {
        let index = self.extract_count();
        self.record(Call::Extract {
            start,
            duration,
            output: output.to_path_buf(),
        });
        if !input.exists() {
            return Err(MediaError::FileNotFound(input.to_path_buf()));
        }
        let fail = self.fail_on == Some(FailOn::Extract(index));
        self.write(output, &format!("original {} {:?}", start, duration), fail)
    }

    fn synthesize_tone(&self, tone: &ToneSpec, output: &Path) -> MediaResult<()> {
        self.record(Call::Tone {
            spec: *tone,
            output: output.to_path_buf(),
        });
        let fail = self.fail_on == Some(FailOn::Tone);
        self.write(output, &format!("tone {}", tone.duration), fail)
    }

    fn concat(
        &self,
        clips: &[PathBuf],
        output: &Path,
        encoding: &OutputSettings,
    ) -> MediaResult<()> {
        self.record(Call::Concat {
            clips: clips.to_vec(),
            output: output.to_path_buf(),
            codec: encoding.codec.clone(),
        });
        let fail = self.fail_on == Some(FailOn::Concat);
        self.write(output, &format!("concat of {}", clips.len()), fail)
    }

    fn transcode(&self, input: &Path, output: &Path, format: Option<&str>) -> MediaResult<()> {
        self.record(Call::Transcode {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            format: format.map(str::to_string),
        });
        if !input.exists() {
            return Err(MediaError::FileNotFound(input.to_path_buf()));
        }
        let fail = self.fail_on == Some(FailOn::Transcode);
        self.write(output, "copy", fail)
    }
}
