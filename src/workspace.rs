//! On-disk layout for downloaded sources, clip drafts and promoted output

use std::path::{Path, PathBuf};

use crate::error::ReelResult;
use crate::utils::naming::{ensure_dir, sanitize};

/// Directory layout rooted at a single base folder: `downloads/` for
/// fetched sources, `output/` for promoted clips and `temp/<source key>/`
/// for per-source scratch areas. Directories are created lazily.
#[derive(Debug, Clone)]
pub struct Workspace {
    base: PathBuf,
}

impl Workspace {
    /// Default base folder, relative to the working directory.
    pub const DEFAULT_BASE: &'static str = "ReelShortMaker";

    /// Create a workspace rooted at `base` without touching the disk.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Base folder of this workspace.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Download destination, created on first use.
    pub fn downloads_dir(&self) -> ReelResult<PathBuf> {
        let dir = self.base.join("downloads");
        ensure_dir(&dir)?;
        Ok(dir)
    }

    /// Durable output destination for promoted drafts, created on first use.
    pub fn output_dir(&self) -> ReelResult<PathBuf> {
        let dir = self.base.join("output");
        ensure_dir(&dir)?;
        Ok(dir)
    }

    /// Scratch directory for one source key, created on first use.
    pub fn scratch_dir(&self, source_key: &str) -> ReelResult<PathBuf> {
        let dir = self.scratch_path(source_key);
        ensure_dir(&dir)?;
        Ok(dir)
    }

    /// Scratch location for one source key without creating it, for
    /// read-only listing.
    pub fn scratch_path(&self, source_key: &str) -> PathBuf {
        self.base.join("temp").join(sanitize(source_key))
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE)
    }
}
