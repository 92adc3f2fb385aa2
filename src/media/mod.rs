//! Adapter around the external ffmpeg / ffprobe binaries
//!
//! Every operation spawns one subprocess with an explicit argument list
//! and translates a non-zero exit status into [`ReelError::MediaTool`]
//! carrying the captured output verbatim. There are no retries; callers
//! decide which failures are fatal.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ReelError, ReelResult};

/// Structured report produced by ffprobe with `-show_format -show_streams`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeReport {
    #[serde(default)]
    pub format: FormatInfo,
    #[serde(default)]
    pub streams: Vec<StreamInfo>,
}

/// Container-level metadata from the `format` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatInfo {
    pub format_name: Option<String>,
    /// Duration in seconds; ffprobe reports it as a decimal string.
    pub duration: Option<String>,
    pub size: Option<String>,
}

/// Per-stream descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamInfo {
    pub index: Option<u32>,
    pub codec_type: Option<String>,
    pub codec_name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ProbeReport {
    /// Duration in seconds, 0.0 when ffprobe did not report one. A
    /// missing field is not an error; only probe failure is.
    pub fn duration(&self) -> f64 {
        self.format
            .duration
            .as_deref()
            .and_then(|d| d.parse().ok())
            .unwrap_or(0.0)
    }
}

/// Explicitly constructed adapter holding resolved binary locations.
/// Consumers receive it by reference instead of doing their own
/// process-wide lookup.
#[derive(Debug, Clone)]
pub struct MediaTool {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl MediaTool {
    /// Build an adapter from explicit binary locations.
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// Resolve both binaries from `REELCUT_FFMPEG` / `REELCUT_FFPROBE`
    /// or the `PATH`, falling back to the bare names so the lookup
    /// happens at spawn time.
    pub fn locate() -> Self {
        Self {
            ffmpeg: resolve_binary("REELCUT_FFMPEG", "ffmpeg"),
            ffprobe: resolve_binary("REELCUT_FFPROBE", "ffprobe"),
        }
    }

    /// Inspect a media file without writing anything.
    pub fn probe(&self, path: &Path) -> ReelResult<ProbeReport> {
        info!(path = %path.display(), "probing media file");
        let mut cmd = Command::new(&self.ffprobe);
        cmd.args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path);
        let output = self.run(cmd)?;
        let report = serde_json::from_slice(&output.stdout)?;
        Ok(report)
    }

    /// Source duration in seconds, 0.0 when the probe report omits it.
    pub fn duration(&self, path: &Path) -> ReelResult<f64> {
        Ok(self.probe(path)?.duration())
    }

    /// Grab a single frame at `at` seconds, scaled to `width` pixels
    /// wide preserving aspect ratio. Best-effort; callers may treat a
    /// failure as non-fatal.
    pub fn extract_thumbnail(
        &self,
        input: &Path,
        output: &Path,
        at: f64,
        width: u32,
    ) -> ReelResult<()> {
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(["-y", "-ss", &at.to_string(), "-i"])
            .arg(input)
            .args(["-vframes", "1", "-vf", &format!("scale={width}:-1")])
            .arg(output);
        self.run(cmd)?;
        Ok(())
    }

    /// Cut `[start, start + duration)` out of `input`, re-encoding with
    /// fixed quality presets. `audio_only` drops the video track and
    /// re-encodes audio alone; otherwise the optional video filter
    /// graph is applied.
    pub fn extract_clip(
        &self,
        input: &Path,
        output: &Path,
        start: f64,
        duration: f64,
        filter: Option<&str>,
        audio_only: bool,
    ) -> ReelResult<()> {
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(["-y", "-ss", &start.to_string(), "-i"])
            .arg(input)
            .args(["-t", &duration.to_string()]);
        if audio_only {
            cmd.args(["-vn", "-c:a", "aac", "-b:a", "192k"]);
        } else {
            if let Some(filter) = filter {
                cmd.args(["-vf", filter]);
            }
            cmd.args([
                "-c:v", "libx264", "-preset", "fast", "-crf", "18", "-c:a", "aac", "-b:a", "192k",
            ]);
        }
        cmd.arg(output);
        self.run(cmd)?;
        Ok(())
    }

    /// Cut a clip while mixing a second audio input into the output.
    /// `audio_mix` is a filter_complex graph labeling its result
    /// `[aout]`; the original video and the mixed audio are mapped to
    /// the output.
    #[allow(clippy::too_many_arguments)]
    pub fn extract_clip_mixed(
        &self,
        input: &Path,
        music: &Path,
        output: &Path,
        start: f64,
        duration: f64,
        video_filter: &str,
        audio_mix: &str,
    ) -> ReelResult<()> {
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(["-y", "-ss", &start.to_string(), "-i"])
            .arg(input)
            .arg("-i")
            .arg(music)
            .args(["-t", &duration.to_string()])
            .args(["-filter_complex", audio_mix])
            .args(["-map", "0:v", "-map", "[aout]"])
            .args(["-vf", video_filter])
            .args([
                "-c:v",
                "libx264",
                "-preset",
                "fast",
                "-crf",
                "18",
                "-c:a",
                "aac",
                "-b:a",
                "192k",
                "-pix_fmt",
                "yuv420p",
                "-movflags",
                "+faststart",
            ])
            .arg(output);
        self.run(cmd)?;
        Ok(())
    }

    /// Re-encode to a delivery-friendly mp4 (h264 + aac) with fast-start
    /// metadata placement.
    pub fn convert_container(&self, input: &Path, output: &Path) -> ReelResult<()> {
        info!(input = %input.display(), output = %output.display(), "converting container");
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(["-y", "-i"])
            .arg(input)
            .args([
                "-c:v",
                "libx264",
                "-preset",
                "slow",
                "-crf",
                "18",
                "-c:a",
                "aac",
                "-b:a",
                "192k",
                "-movflags",
                "+faststart",
            ])
            .arg(output);
        self.run(cmd)?;
        Ok(())
    }

    /// Spawn the tool and capture its output. A non-zero exit becomes
    /// [`ReelError::MediaTool`] with stdout and stderr joined verbatim.
    fn run(&self, mut cmd: Command) -> ReelResult<Output> {
        debug!(command = ?cmd, "invoking media tool");
        let output = cmd.output()?;
        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(stderr.trim_end());
            }
            return Err(ReelError::MediaTool { code, output: text });
        }
        Ok(output)
    }
}

/// Resolve an external binary: env override first, then a `PATH`
/// lookup, then the bare name so the OS lookup happens at spawn time.
pub(crate) fn resolve_binary(env_key: &str, name: &str) -> PathBuf {
    if let Some(path) = std::env::var_os(env_key) {
        return PathBuf::from(path);
    }
    which::which(name).unwrap_or_else(|_| PathBuf::from(name))
}
