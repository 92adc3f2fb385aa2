//! Window arithmetic for splitting a source into fixed-length clips

/// One `[start, start + duration)` cut window within a source video.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipWindow {
    /// Start offset in seconds.
    pub start: f64,
    /// Window length in seconds.
    pub duration: f64,
}

/// Partition `source_duration` into windows of `clip_duration` seconds
/// with consecutive windows overlapping by `overlap` seconds.
///
/// The step between starts is `clip_duration - overlap`; an overlap at
/// least as long as the clip would stall the walk, so it falls back to
/// the full clip length. The window count is
/// `ceil(source_duration / step)`, capped by `max_clips` when given.
/// Every window satisfies `start < source_duration` and
/// `duration = min(clip_duration, source_duration - start)`; a
/// non-positive clip or source duration cannot produce such a window,
/// so it yields an empty plan.
pub fn plan_windows(
    source_duration: f64,
    clip_duration: f64,
    overlap: f64,
    max_clips: Option<usize>,
) -> Vec<ClipWindow> {
    if clip_duration <= 0.0 || source_duration <= 0.0 {
        return Vec::new();
    }
    let step = if clip_duration > overlap {
        clip_duration - overlap
    } else {
        clip_duration
    };
    let mut count = (source_duration / step).ceil() as usize;
    if let Some(max) = max_clips {
        count = count.min(max);
    }

    let mut windows = Vec::with_capacity(count);
    for i in 0..count {
        let start = i as f64 * step;
        if start >= source_duration {
            break;
        }
        windows.push(ClipWindow {
            start,
            duration: clip_duration.min(source_duration - start),
        });
    }
    windows
}
