//! reelcut — download videos and cut them into vertical reel clips
//!
//! # Usage
//!
//! ```bash
//! reelcut download "https://example.com/watch?v=abc"
//! reelcut clip --input video.mp4 --start 30 --duration 15 --text "part one"
//! reelcut split --input video.mp4 --duration 30 --overlap 5
//! reelcut export --draft ReelShortMaker/temp/video/video_reel_20250101_120000.mp4
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use reelcut::cli::{commands, Cli, Commands};
use reelcut::workspace::Workspace;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let workspace = Workspace::new(&cli.workdir);
    info!(workdir = %workspace.base().display(), "starting reelcut");

    match cli.command {
        Commands::Info(args) => commands::info(args, &workspace)?,
        Commands::Download(args) => commands::download(args, &workspace)?,
        Commands::Clip(args) => commands::clip(args, &workspace)?,
        Commands::Split(args) => commands::split(args, &workspace)?,
        Commands::List(args) => commands::list(args, &workspace)?,
        Commands::Export(args) => commands::export(args, &workspace)?,
        Commands::Delete(args) => commands::delete(args, &workspace)?,
    }

    Ok(())
}
