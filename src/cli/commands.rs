//! Command implementations

use std::fs;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::cli::args::{
    ClipArgs, DeleteArgs, DownloadArgs, ExportArgs, InfoArgs, ListArgs, SplitArgs,
};
use crate::fetch::Fetcher;
use crate::media::MediaTool;
use crate::reel::{ClipDraft, ClipStyle, ReelEditor, SplitSettings};
use crate::utils::naming::{human_size, sanitize};
use crate::workspace::Workspace;

/// Show remote metadata without downloading payload.
pub fn info(args: InfoArgs, workspace: &Workspace) -> Result<()> {
    let fetcher = Fetcher::new(workspace.base().join("downloads"), true);
    let info = fetcher
        .fetch_metadata(&args.url)
        .context("failed to fetch metadata")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }
    println!("title:    {}", info.title.as_deref().unwrap_or("(unknown)"));
    if let Some(uploader) = &info.uploader {
        println!("uploader: {uploader}");
    }
    if let Some(duration) = info.duration {
        println!("duration: {duration:.1}s");
    }
    println!("ext:      {}", info.ext.as_deref().unwrap_or("(unknown)"));
    Ok(())
}

/// Download the best audio+video combination into the workspace.
pub fn download(args: DownloadArgs, workspace: &Workspace) -> Result<()> {
    let media = MediaTool::locate();
    let fetcher = Fetcher::new(workspace.downloads_dir()?, !args.no_mp4);
    let path = fetcher
        .download_best(&args.url, args.title.as_deref(), &media)
        .context("download failed")?;

    let size = fs::metadata(&path)
        .map(|m| human_size(m.len()))
        .unwrap_or_else(|_| "?".to_string());
    println!("{} ({size})", path.display());
    Ok(())
}

/// Cut a single clip into the scratch area.
pub fn clip(args: ClipArgs, workspace: &Workspace) -> Result<()> {
    let media = MediaTool::locate();
    let editor = ReelEditor::new(workspace, &media);
    let style = ClipStyle {
        width: args.width,
        height: args.height,
        overlay_text: args.text,
        music: args.music,
    };
    let draft = editor
        .create_clip(&args.input, args.start, args.duration, &style, args.key.as_deref())
        .context("clip creation failed")?;

    println!("{}", draft.path.display());
    if let Some(thumb) = &draft.thumbnail {
        println!("thumbnail: {}", thumb.display());
    }
    Ok(())
}

/// Split a source into a sequence of drafts.
pub fn split(args: SplitArgs, workspace: &Workspace) -> Result<()> {
    let media = MediaTool::locate();
    let editor = ReelEditor::new(workspace, &media);
    let settings = SplitSettings {
        clip_duration: args.duration,
        overlap: args.overlap,
        max_clips: args.max,
        style: ClipStyle {
            width: args.width,
            height: args.height,
            overlay_text: args.text,
            music: args.music,
        },
    };
    let drafts = editor
        .split_source(&args.input, &settings, args.key.as_deref())
        .context("split failed")?;

    info!(count = drafts.len(), "split finished");
    for draft in &drafts {
        println!(
            "{} [{:.1}s +{:.1}s]",
            draft.path.display(),
            draft.start,
            draft.duration
        );
    }
    Ok(())
}

/// List the drafts in a source's scratch area.
pub fn list(args: ListArgs, workspace: &Workspace) -> Result<()> {
    let key = match (args.key, args.source) {
        (Some(key), _) => key,
        (None, Some(source)) => source
            .file_stem()
            .map(|stem| sanitize(&stem.to_string_lossy()))
            .unwrap_or_default(),
        (None, None) => bail!("provide --key or --source to pick a scratch area"),
    };

    let media = MediaTool::locate();
    let editor = ReelEditor::new(workspace, &media);
    let drafts = editor.list_drafts(&key)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&drafts)?);
        return Ok(());
    }
    for draft in &drafts {
        let size = fs::metadata(&draft.path)
            .map(|m| human_size(m.len()))
            .unwrap_or_else(|_| "?".to_string());
        let thumb = if draft.thumbnail.is_some() { " [thumb]" } else { "" };
        println!("{} ({size}){thumb}", draft.path.display());
    }
    Ok(())
}

/// Promote a draft to the durable output folder.
pub fn export(args: ExportArgs, workspace: &Workspace) -> Result<()> {
    let media = MediaTool::locate();
    let editor = ReelEditor::new(workspace, &media);
    let draft = ClipDraft::existing(&args.draft);
    let target = editor
        .promote(&draft, args.dest.as_deref())
        .context("export failed")?;
    println!("{}", target.display());
    Ok(())
}

/// Delete a draft and its thumbnail.
pub fn delete(args: DeleteArgs, workspace: &Workspace) -> Result<()> {
    let media = MediaTool::locate();
    let editor = ReelEditor::new(workspace, &media);
    let draft = ClipDraft::existing(&args.draft);
    editor.delete_draft(&draft).context("delete failed")?;
    println!("deleted {}", draft.path.display());
    Ok(())
}
