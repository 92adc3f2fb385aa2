//! Filesystem-safe naming: sanitized names, timestamped filenames and
//! human-readable sizes

use std::fs;
use std::path::Path;

use chrono::Local;

use crate::error::ReelResult;

/// Characters that are illegal in filenames on at least one supported
/// platform, plus the single quote which breaks filter-graph templating.
const ILLEGAL: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '\''];

/// Create a directory and all missing parents. Succeeds when the
/// directory already exists.
pub fn ensure_dir(path: impl AsRef<Path>) -> ReelResult<()> {
    fs::create_dir_all(path.as_ref())?;
    Ok(())
}

/// Strip illegal characters and collapse whitespace runs to single
/// underscores. Outer whitespace is trimmed; empty input stays empty.
/// Idempotent, so sanitized names can be re-sanitized freely.
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_gap = false;
    for ch in name.trim().chars() {
        if ILLEGAL.contains(&ch) {
            continue;
        }
        if ch.is_whitespace() {
            pending_gap = true;
            continue;
        }
        if pending_gap && !out.is_empty() {
            out.push('_');
        }
        pending_gap = false;
        out.push(ch);
    }
    out
}

/// Build `<base>_<YYYYMMDD_HHMMSS>.<ext>` from a sanitized base name.
/// An all-illegal base falls back to the literal `output` so the name
/// never loses its base segment.
pub fn timestamped_name(base: &str, ext: &str) -> String {
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let base = match sanitize(base) {
        s if s.is_empty() => "output".to_string(),
        s => s,
    };
    let ext = ext.trim_start_matches('.');
    format!("{base}_{ts}.{ext}")
}

/// Format a byte count with the largest fitting unit, one decimal place.
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in ["", "K", "M", "G", "T"] {
        if value < 1024.0 {
            return format!("{value:.1}{unit}B");
        }
        value /= 1024.0;
    }
    format!("{value:.1}PB")
}
