//! CLI module for reelcut
//!
//! This module handles command-line argument parsing and command
//! execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// reelcut — download videos and cut them into vertical reel clips
#[derive(Parser)]
#[command(name = "reelcut")]
#[command(about = "Download videos and cut them into vertical reel clips")]
#[command(version)]
pub struct Cli {
    /// Workspace base folder holding downloads/, output/ and temp/
    #[arg(long, global = true, env = "REELCUT_WORKDIR", default_value = crate::workspace::Workspace::DEFAULT_BASE)]
    pub workdir: PathBuf,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show remote video metadata without downloading
    Info(args::InfoArgs),
    /// Download the best audio+video combination of a remote video
    Download(args::DownloadArgs),
    /// Cut one vertical clip out of a local source video
    Clip(args::ClipArgs),
    /// Split a source video into a sequence of clips
    Split(args::SplitArgs),
    /// List the drafts in a source's scratch area
    List(args::ListArgs),
    /// Promote a draft into the durable output folder
    Export(args::ExportArgs),
    /// Delete a draft and its thumbnail
    Delete(args::DeleteArgs),
}
