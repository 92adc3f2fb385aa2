//! Integration tests for the clip lifecycle: promote/list/delete on a
//! real scratch area, and rendering against a stub media tool that
//! records its argument lists.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use reelcut::error::ReelError;
use reelcut::media::MediaTool;
use reelcut::reel::{ClipDraft, ClipStyle, ReelEditor, SplitSettings};
use reelcut::workspace::Workspace;

/// Drop a fake draft (and optionally its thumbnail) into a scratch area.
fn seed_draft(scratch: &Path, name: &str, with_thumb: bool) -> PathBuf {
    let clip = scratch.join(name);
    fs::write(&clip, b"fake clip data").unwrap();
    if with_thumb {
        fs::write(scratch.join(format!("{name}.thumb.jpg")), b"fake thumb").unwrap();
    }
    clip
}

#[test]
fn test_promote_copies_draft_and_thumbnail() {
    let dir = TempDir::new().unwrap();
    let workspace = Workspace::new(dir.path());
    let media = MediaTool::new("ffmpeg", "ffprobe");
    let editor = ReelEditor::new(&workspace, &media);

    let scratch = workspace.scratch_dir("vid").unwrap();
    let clip = seed_draft(&scratch, "vid_reel_20250101_120000.mp4", true);

    let draft = ClipDraft::existing(&clip);
    assert!(draft.thumbnail.is_some());

    let target = editor.promote(&draft, None).unwrap();
    assert_eq!(target, dir.path().join("output").join("vid_reel_20250101_120000.mp4"));
    assert!(target.exists());
    // thumbnail convention is `.thumb.jpg` appended to the full filename
    let mut promoted_thumb = target.clone().into_os_string();
    promoted_thumb.push(".thumb.jpg");
    assert!(PathBuf::from(promoted_thumb).exists());
    // the draft itself stays in the scratch area
    assert!(clip.exists());
}

#[test]
fn test_promote_to_explicit_destination() {
    let dir = TempDir::new().unwrap();
    let workspace = Workspace::new(dir.path());
    let media = MediaTool::new("ffmpeg", "ffprobe");
    let editor = ReelEditor::new(&workspace, &media);

    let scratch = workspace.scratch_dir("vid").unwrap();
    let clip = seed_draft(&scratch, "vid_reel_20250101_120000.mp4", false);

    let dest = dir.path().join("elsewhere");
    let target = editor
        .promote(&ClipDraft::existing(&clip), Some(&dest))
        .unwrap();
    assert_eq!(target, dest.join("vid_reel_20250101_120000.mp4"));
    assert!(target.exists());
}

#[test]
fn test_promote_missing_draft_is_not_found() {
    let dir = TempDir::new().unwrap();
    let workspace = Workspace::new(dir.path());
    let media = MediaTool::new("ffmpeg", "ffprobe");
    let editor = ReelEditor::new(&workspace, &media);

    let draft = ClipDraft::existing(dir.path().join("gone.mp4"));
    match editor.promote(&draft, None) {
        Err(ReelError::NotFound { .. }) => {}
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_list_and_delete_round_trip() {
    let dir = TempDir::new().unwrap();
    let workspace = Workspace::new(dir.path());
    let media = MediaTool::new("ffmpeg", "ffprobe");
    let editor = ReelEditor::new(&workspace, &media);

    let scratch = workspace.scratch_dir("vid").unwrap();
    seed_draft(&scratch, "vid_reel_20250101_120000.mp4", true);
    seed_draft(&scratch, "vid_reel_20250101_120001.mp4", false);
    // non-clip files are not drafts
    fs::write(scratch.join("notes.txt"), b"x").unwrap();

    let drafts = editor.list_drafts("vid").unwrap();
    assert_eq!(drafts.len(), 2);
    assert!(drafts[0].path < drafts[1].path);
    assert!(drafts[0].thumbnail.is_some());
    assert!(drafts[1].thumbnail.is_none());
    assert_eq!(drafts[0].source_key, "vid");

    editor.delete_draft(&drafts[0]).unwrap();
    assert!(!drafts[0].path.exists());
    let thumb = drafts[0].thumbnail.as_ref().unwrap();
    assert!(!thumb.exists());

    let remaining = editor.list_drafts("vid").unwrap();
    assert_eq!(remaining.len(), 1);
}

#[test]
fn test_split_rejects_non_positive_clip_duration() {
    let dir = TempDir::new().unwrap();
    let workspace = Workspace::new(dir.path());
    // validated before any tool is spawned, so real binaries are not needed
    let media = MediaTool::new("ffmpeg", "ffprobe");
    let editor = ReelEditor::new(&workspace, &media);

    let settings = SplitSettings {
        clip_duration: 0.0,
        overlap: 0.0,
        max_clips: None,
        style: ClipStyle::default(),
    };
    match editor.split_source(Path::new("whatever.mp4"), &settings, None) {
        Err(ReelError::InvalidSource { .. }) => {}
        other => panic!("expected InvalidSource, got {other:?}"),
    }
}

#[test]
fn test_list_drafts_of_unknown_key_is_empty() {
    let dir = TempDir::new().unwrap();
    let workspace = Workspace::new(dir.path());
    let media = MediaTool::new("ffmpeg", "ffprobe");
    let editor = ReelEditor::new(&workspace, &media);
    assert!(editor.list_drafts("never-seen").unwrap().is_empty());
}

// Rendering tests against a stub media tool. The stub is a shell script
// that records every argument list, answers probes with a fixed
// 100-second duration and touches the output file of encode calls.
#[cfg(unix)]
mod stub_tool {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Write a stub ffmpeg/ffprobe script. With `fail_thumbs` every
    /// `-vframes` invocation exits non-zero.
    fn write_stub(dir: &Path, fail_thumbs: bool) -> PathBuf {
        let thumb_case = if fail_thumbs {
            "case \" $* \" in *\" -vframes \"*) echo 'thumbnail grab rejected' >&2; exit 1;; esac\n"
        } else {
            ""
        };
        let script = format!(
            "#!/bin/sh\n\
             printf '%s\\n' \"$*\" >> \"$0.log\"\n\
             case \" $* \" in *\" -show_format \"*) printf '%s' '{{\"format\":{{\"duration\":\"100.0\"}},\"streams\":[]}}'; exit 0;; esac\n\
             {thumb_case}\
             for out; do :; done\n\
             : > \"$out\"\n\
             exit 0\n"
        );
        let path = dir.join("stub-ffmpeg");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn read_log(stub: &Path) -> String {
        fs::read_to_string(format!("{}.log", stub.display())).unwrap_or_default()
    }

    #[test]
    fn test_create_clip_plain_issues_single_input_cut() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().join("ws"));
        let stub = write_stub(dir.path(), false);
        let media = MediaTool::new(stub.clone(), stub.clone());
        let editor = ReelEditor::new(&workspace, &media);

        let source = dir.path().join("source.mp4");
        fs::write(&source, b"fake source").unwrap();

        let draft = editor
            .create_clip(&source, 2.0, 10.0, &ClipStyle::default(), None)
            .unwrap();
        assert!(draft.path.exists());
        assert_eq!(draft.source_key, "source");
        assert!(draft.thumbnail.is_some());

        let log = read_log(&stub);
        assert!(log.contains("crop=1080:1920"));
        assert!(!log.contains("-filter_complex"));
        assert!(!log.contains("amix"));
        assert!(!log.contains("drawtext"));
    }

    #[test]
    fn test_create_clip_with_music_mixes_audio() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().join("ws"));
        let stub = write_stub(dir.path(), false);
        let media = MediaTool::new(stub.clone(), stub.clone());
        let editor = ReelEditor::new(&workspace, &media);

        let source = dir.path().join("source.mp4");
        fs::write(&source, b"fake source").unwrap();
        let music = dir.path().join("track.mp3");
        fs::write(&music, b"fake music").unwrap();

        let style = ClipStyle {
            music: Some(music),
            ..ClipStyle::default()
        };
        let draft = editor.create_clip(&source, 0.0, 15.0, &style, None).unwrap();
        assert!(draft.path.exists());

        let log = read_log(&stub);
        assert!(log.contains("-filter_complex"));
        assert!(log.contains("amix=inputs=2:duration=first"));
        assert!(log.contains("-map 0:v -map [aout]"));
    }

    #[test]
    fn test_thumbnail_failure_still_yields_draft() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().join("ws"));
        let stub = write_stub(dir.path(), true);
        let media = MediaTool::new(stub.clone(), stub);
        let editor = ReelEditor::new(&workspace, &media);

        let source = dir.path().join("source.mp4");
        fs::write(&source, b"fake source").unwrap();

        let draft = editor
            .create_clip(&source, 0.0, 5.0, &ClipStyle::default(), Some("key"))
            .unwrap();
        assert!(draft.path.exists());
        assert!(draft.thumbnail.is_none());
    }

    #[test]
    fn test_split_source_renders_planned_windows() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().join("ws"));
        let stub = write_stub(dir.path(), false);
        let media = MediaTool::new(stub.clone(), stub.clone());
        let editor = ReelEditor::new(&workspace, &media);

        let source = dir.path().join("long video.mp4");
        fs::write(&source, b"fake source").unwrap();

        // probe reports 100s; 30s clips with 5s overlap step by 25s
        let settings = SplitSettings {
            clip_duration: 30.0,
            overlap: 5.0,
            max_clips: None,
            style: ClipStyle::default(),
        };
        let drafts = editor.split_source(&source, &settings, None).unwrap();

        let starts: Vec<f64> = drafts.iter().map(|d| d.start).collect();
        assert_eq!(starts, vec![0.0, 25.0, 50.0, 75.0]);
        assert_eq!(drafts[3].duration, 25.0);
        for draft in &drafts {
            assert!(draft.path.exists());
            assert_eq!(draft.source_key, "long_video");
        }

        let log = read_log(&stub);
        assert_eq!(log.matches("-show_format").count(), 1);
    }
}
