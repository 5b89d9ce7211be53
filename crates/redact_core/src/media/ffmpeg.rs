//! FFmpeg-backed media engine.
//!
//! Each operation is a single blocking `ffmpeg` / `ffprobe` invocation.
//! Outputs are always overwritten (`-y`); stdin is closed so a prompt can
//! never hang the process.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde_json::Value;

use super::engine::MediaEngine;
use super::probe::parse_ffprobe_json;
use super::types::{AudioInfo, MediaError, MediaResult, ToneSpec};
use crate::config::{OutputSettings, ToolSettings};

/// PCM codec used for every intermediate clip.
const INTERMEDIATE_CODEC: &str = "pcm_s16le";

/// Lines of stderr kept in error messages.
const STDERR_TAIL_LINES: usize = 20;

/// [`MediaEngine`] implementation that shells out to FFmpeg.
#[derive(Debug, Clone)]
pub struct FfmpegEngine {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl FfmpegEngine {
    /// Engine using `ffmpeg` / `ffprobe` from PATH.
    pub fn new() -> Self {
        Self::from_settings(&ToolSettings::default())
    }

    /// Engine using the configured tool locations.
    pub fn from_settings(tools: &ToolSettings) -> Self {
        Self {
            ffmpeg: tools.ffmpeg.clone(),
            ffprobe: tools.ffprobe.clone(),
        }
    }

    /// Check that both tools can be executed.
    pub fn check_available(&self) -> MediaResult<()> {
        for tool in [&self.ffmpeg, &self.ffprobe] {
            let mut cmd = Command::new(tool);
            cmd.arg("-version");
            run(cmd, &tool.display().to_string())?;
        }
        Ok(())
    }

    fn ffmpeg_command(&self) -> Command {
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(["-hide_banner", "-nostdin", "-loglevel", "error", "-y"]);
        cmd
    }

    fn run_ffmpeg(&self, cmd: Command) -> MediaResult<Output> {
        run(cmd, "ffmpeg")
    }
}

impl Default for FfmpegEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaEngine for FfmpegEngine {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn probe(&self, input: &Path) -> MediaResult<Option<AudioInfo>> {
        require_exists(input)?;

        let mut cmd = Command::new(&self.ffprobe);
        cmd.args(["-v", "error", "-show_streams", "-show_format", "-of", "json"])
            .arg(input);
        let output = run(cmd, "ffprobe")?;

        let json: Value = serde_json::from_slice(&output.stdout)?;
        parse_ffprobe_json(&json)
    }

    fn extract(
        &self,
        input: &Path,
        start: f64,
        duration: Option<f64>,
        output: &Path,
    ) -> MediaResult<()> {
        require_exists(input)?;

        let mut cmd = self.ffmpeg_command();
        cmd.arg("-ss").arg(seconds_arg(start));
        if let Some(duration) = duration {
            cmd.arg("-t").arg(length_arg("extract length", duration)?);
        }
        cmd.arg("-i")
            .arg(input)
            .arg("-vn")
            .arg("-acodec")
            .arg(INTERMEDIATE_CODEC)
            .arg(output);

        self.run_ffmpeg(cmd)?;
        Ok(())
    }

    fn synthesize_tone(&self, tone: &ToneSpec, output: &Path) -> MediaResult<()> {
        let mut cmd = self.ffmpeg_command();
        cmd.arg("-f")
            .arg("lavfi")
            .arg("-i")
            .arg(sine_source(tone)?);
        if let Some(filter) = fade_filter(tone) {
            cmd.arg("-af").arg(filter);
        }
        cmd.arg("-ac")
            .arg("1")
            .arg("-acodec")
            .arg(INTERMEDIATE_CODEC)
            .arg(output);

        self.run_ffmpeg(cmd)?;
        Ok(())
    }

    fn concat(
        &self,
        clips: &[PathBuf],
        output: &Path,
        encoding: &OutputSettings,
    ) -> MediaResult<()> {
        let mut cmd = self.ffmpeg_command();
        for clip in clips {
            cmd.arg("-i").arg(clip);
        }
        cmd.arg("-filter_complex")
            .arg(concat_filter(clips.len()))
            .arg("-map")
            .arg("[out]")
            .arg("-acodec")
            .arg(&encoding.codec);
        if let Some(bitrate) = &encoding.bitrate {
            cmd.arg("-b:a").arg(bitrate);
        }
        cmd.arg("-f").arg(&encoding.format).arg(output);

        self.run_ffmpeg(cmd)?;
        Ok(())
    }

    fn transcode(&self, input: &Path, output: &Path, format: Option<&str>) -> MediaResult<()> {
        require_exists(input)?;

        let mut cmd = self.ffmpeg_command();
        cmd.arg("-i").arg(input);
        if let Some(format) = format {
            cmd.arg("-f").arg(format);
        }
        cmd.arg(output);

        self.run_ffmpeg(cmd)?;
        Ok(())
    }
}

/// Run a prepared command, mapping spawn failures and non-zero exits.
fn run(mut cmd: Command, tool: &str) -> MediaResult<Output> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    tracing::trace!("Running: {:?}", cmd);

    let output = cmd
        .output()
        .map_err(|e| MediaError::tool_execution(tool, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MediaError::command_failed(
            tool,
            output.status.code().unwrap_or(-1),
            stderr_tail(&stderr),
        ));
    }

    Ok(output)
}

fn require_exists(path: &Path) -> MediaResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(MediaError::FileNotFound(path.to_path_buf()))
    }
}

/// Microsecond precision keeps segment boundaries well below one sample.
fn seconds_arg(seconds: f64) -> String {
    format!("{:.6}", seconds)
}

/// A length argument that must not render as zero: both `-t 0` and
/// `sine=duration=0` make FFmpeg produce output without end.
fn length_arg(what: &str, seconds: f64) -> MediaResult<String> {
    let arg = seconds_arg(seconds);
    match arg.parse::<f64>() {
        Ok(rendered) if rendered > 0.0 => Ok(arg),
        _ => Err(MediaError::invalid_argument(
            what,
            format!("{}s rounds to {}", seconds, arg),
        )),
    }
}

fn sine_source(tone: &ToneSpec) -> MediaResult<String> {
    Ok(format!(
        "sine=frequency={}:sample_rate={}:duration={}",
        tone.frequency,
        tone.sample_rate,
        length_arg("tone duration", tone.duration)?
    ))
}

fn fade_filter(tone: &ToneSpec) -> Option<String> {
    let fade = tone.fade?;
    Some(format!(
        "afade=t=in:st=0:d={fade},afade=t=out:st={out}:d={fade}",
        fade = seconds_arg(fade),
        out = seconds_arg(tone.duration - fade),
    ))
}

fn concat_filter(inputs: usize) -> String {
    let mut filter: String = (0..inputs).map(|i| format!("[{}:a]", i)).collect();
    filter.push_str(&format!("concat=n={}:v=0:a=1[out]", inputs));
    filter
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.trim().lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
