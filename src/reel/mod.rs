//! Clip lifecycle: render drafts into per-source scratch areas, split
//! whole sources into draft sequences, and promote or delete drafts

pub mod filter;
pub mod plan;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::{ReelError, ReelResult};
use crate::media::MediaTool;
use crate::utils::naming::{ensure_dir, sanitize, timestamped_name};
use crate::workspace::Workspace;

pub use plan::{plan_windows, ClipWindow};

/// Offset and width used for draft thumbnails.
const THUMB_AT: f64 = 0.5;
const THUMB_WIDTH: u32 = 360;

/// A rendered clip in the scratch area, not yet promoted to durable
/// output.
#[derive(Debug, Clone, Serialize)]
pub struct ClipDraft {
    /// Rendered clip file.
    pub path: PathBuf,
    /// Sibling thumbnail, absent when generation failed.
    pub thumbnail: Option<PathBuf>,
    /// Start offset within the source, seconds.
    pub start: f64,
    /// Clip length, seconds.
    pub duration: f64,
    /// Sanitized grouping token derived from the source filename.
    pub source_key: String,
}

impl ClipDraft {
    /// Rehydrate a draft record from a clip file already on disk, for
    /// example one picked from [`ReelEditor::list_drafts`] output. The
    /// window is unknown for such drafts and reported as zero.
    pub fn existing(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let thumb = thumbnail_path(&path);
        Self {
            thumbnail: thumb.exists().then_some(thumb),
            start: 0.0,
            duration: 0.0,
            source_key: String::new(),
            path,
        }
    }
}

/// Styling applied to every generated clip.
#[derive(Debug, Clone)]
pub struct ClipStyle {
    /// Target frame width.
    pub width: u32,
    /// Target frame height.
    pub height: u32,
    /// Optional lower-third text overlay.
    pub overlay_text: Option<String>,
    /// Optional background music track mixed under the original audio.
    pub music: Option<PathBuf>,
}

impl Default for ClipStyle {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            overlay_text: None,
            music: None,
        }
    }
}

/// Parameters for splitting a whole source into drafts.
#[derive(Debug, Clone)]
pub struct SplitSettings {
    /// Target length of each clip, seconds.
    pub clip_duration: f64,
    /// Overlap between consecutive clips, seconds.
    pub overlap: f64,
    /// Optional cap on the number of clips.
    pub max_clips: Option<usize>,
    /// Styling applied to every clip.
    pub style: ClipStyle,
}

/// High-level reel operations over a workspace and a media tool, both
/// held by reference so one instance of each serves the whole program.
pub struct ReelEditor<'a> {
    workspace: &'a Workspace,
    media: &'a MediaTool,
}

impl<'a> ReelEditor<'a> {
    pub fn new(workspace: &'a Workspace, media: &'a MediaTool) -> Self {
        Self { workspace, media }
    }

    /// Render one clip of `[start, start + duration)` from `source`
    /// into the per-source scratch area and return its draft record.
    ///
    /// Extraction failure is fatal and partially written output is not
    /// rolled back. Thumbnail failure is not: the draft is returned
    /// with `thumbnail: None`.
    pub fn create_clip(
        &self,
        source: &Path,
        start: f64,
        duration: f64,
        style: &ClipStyle,
        source_key: Option<&str>,
    ) -> ReelResult<ClipDraft> {
        let key = derive_key(source, source_key);
        let scratch = self.workspace.scratch_dir(&key)?;
        let out_path = scratch.join(timestamped_name(&format!("{key}_reel"), "mp4"));

        let vf = filter::reel_video_filter(style.width, style.height, style.overlay_text.as_deref());
        info!(
            source = %source.display(),
            start,
            duration,
            out = %out_path.display(),
            "rendering clip"
        );

        match &style.music {
            Some(music) => self.media.extract_clip_mixed(
                source,
                music,
                &out_path,
                start,
                duration,
                &vf,
                filter::music_mix(),
            )?,
            None => self
                .media
                .extract_clip(source, &out_path, start, duration, Some(&vf), false)?,
        }

        let thumb = thumbnail_path(&out_path);
        let thumbnail = match self
            .media
            .extract_thumbnail(&out_path, &thumb, THUMB_AT, THUMB_WIDTH)
        {
            Ok(()) => Some(thumb),
            Err(err) => {
                warn!(%err, "thumbnail generation failed, keeping clip without one");
                None
            }
        };

        Ok(ClipDraft {
            path: out_path,
            thumbnail,
            start,
            duration,
            source_key: key,
        })
    }

    /// Split `source` into a sequence of drafts. Windows are planned
    /// from the probed duration and rendered in order; the first
    /// failure aborts the whole sequence. A non-positive clip duration
    /// is rejected before anything is probed or rendered.
    pub fn split_source(
        &self,
        source: &Path,
        settings: &SplitSettings,
        source_key: Option<&str>,
    ) -> ReelResult<Vec<ClipDraft>> {
        if settings.clip_duration <= 0.0 {
            return Err(ReelError::InvalidSource {
                message: format!(
                    "clip duration must be positive, got {}",
                    settings.clip_duration
                ),
            });
        }
        let key = derive_key(source, source_key);
        let source_duration = self.media.duration(source)?;
        if source_duration <= 0.0 {
            return Err(ReelError::InvalidSource {
                message: format!("could not obtain duration of {}", source.display()),
            });
        }

        let windows = plan_windows(
            source_duration,
            settings.clip_duration,
            settings.overlap,
            settings.max_clips,
        );
        info!(
            source = %source.display(),
            source_duration,
            count = windows.len(),
            "splitting source into clips"
        );

        let mut drafts = Vec::with_capacity(windows.len());
        for window in windows {
            drafts.push(self.create_clip(
                source,
                window.start,
                window.duration,
                &settings.style,
                Some(&key),
            )?);
        }
        Ok(drafts)
    }

    /// Copy a draft (and its thumbnail, when present) into `dest` or
    /// the workspace output directory. Thumbnail copy failure is
    /// swallowed; a missing draft file is `NotFound`.
    pub fn promote(&self, draft: &ClipDraft, dest: Option<&Path>) -> ReelResult<PathBuf> {
        if !draft.path.exists() {
            return Err(ReelError::NotFound {
                path: draft.path.display().to_string(),
            });
        }
        let dest_dir = match dest {
            Some(dir) => {
                ensure_dir(dir)?;
                dir.to_path_buf()
            }
            None => self.workspace.output_dir()?,
        };
        let file_name = draft.path.file_name().ok_or_else(|| ReelError::NotFound {
            path: draft.path.display().to_string(),
        })?;
        let target = dest_dir.join(file_name);
        fs::copy(&draft.path, &target)?;

        if let Some(thumb) = &draft.thumbnail {
            if thumb.exists() {
                if let Err(err) = fs::copy(thumb, thumbnail_path(&target)) {
                    warn!(%err, "thumbnail copy failed, promoted clip without one");
                }
            }
        }
        info!(from = %draft.path.display(), to = %target.display(), "promoted draft");
        Ok(target)
    }

    /// Enumerate the drafts in a source key's scratch area, sorted by
    /// filename (which orders them by generation timestamp).
    pub fn list_drafts(&self, source_key: &str) -> ReelResult<Vec<ClipDraft>> {
        let scratch = self.workspace.scratch_path(source_key);
        if !scratch.exists() {
            return Ok(Vec::new());
        }
        let mut paths: Vec<PathBuf> = WalkDir::new(&scratch)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
            })
            .collect();
        paths.sort();

        let key = sanitize(source_key);
        Ok(paths
            .into_iter()
            .map(|path| {
                let mut draft = ClipDraft::existing(path);
                draft.source_key = key.clone();
                draft
            })
            .collect())
    }

    /// Remove a draft file and its thumbnail from the scratch area.
    pub fn delete_draft(&self, draft: &ClipDraft) -> ReelResult<()> {
        if !draft.path.exists() {
            return Err(ReelError::NotFound {
                path: draft.path.display().to_string(),
            });
        }
        fs::remove_file(&draft.path)?;
        let thumb = thumbnail_path(&draft.path);
        if thumb.exists() {
            fs::remove_file(&thumb)?;
        }
        info!(path = %draft.path.display(), "deleted draft");
        Ok(())
    }
}

/// Source key: the explicit key when given, otherwise the sanitized
/// file stem of the source path.
fn derive_key(source: &Path, explicit: Option<&str>) -> String {
    match explicit {
        Some(key) => sanitize(key),
        None => sanitize(
            &source
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
        ),
    }
}

/// A clip's thumbnail lives next to it as `<file>.thumb.jpg`.
fn thumbnail_path(clip: &Path) -> PathBuf {
    let mut name = clip.as_os_str().to_os_string();
    name.push(".thumb.jpg");
    PathBuf::from(name)
}
