//! reelcut library
//!
//! Downloads online videos, cuts them into vertical "reel" clips with
//! optional text overlay and background music, and manages the
//! resulting drafts in a per-source scratch area. All processing is
//! delegated to the external ffmpeg/ffprobe binaries; downloading is
//! delegated to yt-dlp.

pub mod cli;
pub mod error;
pub mod fetch;
pub mod media;
pub mod reel;
pub mod utils;
pub mod workspace;

// Re-export commonly used types
pub use error::{ReelError, ReelResult};
pub use fetch::{FetchInfo, Fetcher};
pub use media::{MediaTool, ProbeReport};
pub use reel::{ClipDraft, ClipStyle, ClipWindow, ReelEditor, SplitSettings};
pub use workspace::Workspace;
