//! Adapter around the external yt-dlp binary
//!
//! Metadata queries and downloads both shell out to yt-dlp; its errors
//! are surfaced opaquely as [`ReelError::Download`]. Downloads are
//! normalized to mp4 on request, with container conversion delegated to
//! the media tool and conversion failure deliberately swallowed.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ReelError, ReelResult};
use crate::media::{resolve_binary, MediaTool};
use crate::utils::naming::{ensure_dir, sanitize};

/// Remote video metadata, the subset of the extractor's JSON report the
/// tool cares about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchInfo {
    pub title: Option<String>,
    pub ext: Option<String>,
    pub duration: Option<f64>,
    pub uploader: Option<String>,
    pub webpage_url: Option<String>,
}

/// Fetch adapter holding the resolved extractor binary and the download
/// destination.
#[derive(Debug, Clone)]
pub struct Fetcher {
    ytdlp: PathBuf,
    out_dir: PathBuf,
    force_mp4: bool,
}

impl Fetcher {
    /// Create a fetcher writing into `out_dir`. With `force_mp4` the
    /// best mp4/m4a combination is requested and mismatching containers
    /// are converted after download.
    pub fn new(out_dir: impl Into<PathBuf>, force_mp4: bool) -> Self {
        Self {
            ytdlp: resolve_binary("REELCUT_YTDLP", "yt-dlp"),
            out_dir: out_dir.into(),
            force_mp4,
        }
    }

    /// Override the extractor binary location.
    pub fn with_binary(mut self, ytdlp: impl Into<PathBuf>) -> Self {
        self.ytdlp = ytdlp.into();
        self
    }

    /// Query remote metadata without downloading any payload.
    pub fn fetch_metadata(&self, url: &str) -> ReelResult<FetchInfo> {
        info!(url, "fetching remote metadata");
        let output = Command::new(&self.ytdlp)
            .args(["-J", "--skip-download", "--no-playlist", "--no-warnings"])
            .arg(url)
            .output()?;
        if !output.status.success() {
            return Err(ReelError::Download {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(serde_json::from_slice(&output.stdout)?)
    }

    /// Download the best available audio+video combination, merging to
    /// mp4. Returns the local path of the saved file. When `force_mp4`
    /// is set and the saved container is not mp4, conversion is
    /// attempted through the media tool; on conversion failure the
    /// original un-normalized path is returned instead of an error.
    pub fn download_best(
        &self,
        url: &str,
        title_hint: Option<&str>,
        media: &MediaTool,
    ) -> ReelResult<PathBuf> {
        ensure_dir(&self.out_dir)?;
        let format = if self.force_mp4 {
            "bestvideo[ext=mp4]+bestaudio[ext=m4a]/mp4"
        } else {
            "bestvideo+bestaudio/best"
        };
        let template = self.out_dir.join("%(title)s.%(ext)s");
        info!(url, format, "downloading best audio+video");

        let output = Command::new(&self.ytdlp)
            .args(["--no-playlist", "--no-warnings", "-f", format])
            .args(["--merge-output-format", "mp4"])
            .args(["--no-simulate", "--print", "after_move:filepath", "-o"])
            .arg(&template)
            .arg(url)
            .output()?;
        if !output.status.success() {
            return Err(ReelError::Download {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let printed = String::from_utf8_lossy(&output.stdout);
        let path = match printed.lines().rev().find(|line| !line.trim().is_empty()) {
            Some(line) => PathBuf::from(line.trim()),
            None => self.guess_saved_path(url, title_hint),
        };
        info!(path = %path.display(), "download finished");

        if self.force_mp4 && !is_mp4(&path) {
            let target = path.with_extension("mp4");
            match media.convert_container(&path, &target) {
                Ok(()) => return Ok(target),
                Err(err) => {
                    // Best-effort normalization: keep the original file.
                    warn!(%err, "container conversion failed, keeping original download");
                }
            }
        }
        Ok(path)
    }

    /// Reconstruct the saved filename from metadata when the extractor
    /// did not report one.
    fn guess_saved_path(&self, url: &str, title_hint: Option<&str>) -> PathBuf {
        let info = self.fetch_metadata(url).unwrap_or_default();
        let title = info
            .title
            .as_deref()
            .or(title_hint)
            .map(sanitize)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "video".to_string());
        let ext = info.ext.as_deref().unwrap_or("mp4");
        self.out_dir.join(format!("{title}.{ext}"))
    }
}

fn is_mp4(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
}
