//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Remote video URL
    pub url: String,

    /// Output the full metadata report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the download command
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Remote video URL
    pub url: String,

    /// Fallback title used when the extractor reports none
    #[arg(long)]
    pub title: Option<String>,

    /// Keep whatever container the extractor produces instead of
    /// normalizing to mp4
    #[arg(long)]
    pub no_mp4: bool,
}

/// Arguments for the clip command
#[derive(Args, Debug)]
pub struct ClipArgs {
    /// Source video file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Start offset in seconds
    #[arg(short, long, default_value_t = 0.0)]
    pub start: f64,

    /// Clip length in seconds
    #[arg(short, long, default_value_t = 15.0)]
    pub duration: f64,

    /// Target frame width
    #[arg(long, default_value_t = 1080)]
    pub width: u32,

    /// Target frame height
    #[arg(long, default_value_t = 1920)]
    pub height: u32,

    /// Text overlaid on the lower third of the clip
    #[arg(long)]
    pub text: Option<String>,

    /// Background music track mixed under the original audio
    #[arg(long)]
    pub music: Option<PathBuf>,

    /// Override the source key used to group drafts
    #[arg(long)]
    pub key: Option<String>,
}

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Source video file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target length of each clip in seconds
    #[arg(short, long, default_value_t = 15.0)]
    pub duration: f64,

    /// Overlap between consecutive clips in seconds
    #[arg(long, default_value_t = 0.0)]
    pub overlap: f64,

    /// Maximum number of clips to produce
    #[arg(long)]
    pub max: Option<usize>,

    /// Target frame width
    #[arg(long, default_value_t = 1080)]
    pub width: u32,

    /// Target frame height
    #[arg(long, default_value_t = 1920)]
    pub height: u32,

    /// Text overlaid on the lower third of every clip
    #[arg(long)]
    pub text: Option<String>,

    /// Background music track mixed under the original audio
    #[arg(long)]
    pub music: Option<PathBuf>,

    /// Override the source key used to group drafts
    #[arg(long)]
    pub key: Option<String>,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Source key of the scratch area to list
    #[arg(long, conflicts_with = "source")]
    pub key: Option<String>,

    /// Source video file; its key is derived from the filename
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Output the draft list as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Draft clip file to promote
    #[arg(long)]
    pub draft: PathBuf,

    /// Destination folder (default: the workspace output folder)
    #[arg(long)]
    pub dest: Option<PathBuf>,
}

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Draft clip file to delete
    #[arg(long)]
    pub draft: PathBuf,
}
