//! Filter-graph templating for the external media tool
//!
//! The graph syntax is a small template language, so user-supplied text
//! is escaped against the characters the drawtext parser treats
//! specially before interpolation.

use std::path::Path;

/// Scale to cover the target frame, picking the scale axis by which
/// side overflows more, then center-crop to exactly `width x height`.
pub fn scale_crop(width: u32, height: u32) -> String {
    format!(
        "scale='if(gt(a,{w}/{h}),{w},-2)':'if(gt(a,{w}/{h}),-2,{h})',crop={w}:{h}",
        w = width,
        h = height
    )
}

/// Escape text for the drawtext mini-language.
pub fn escape_drawtext(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '\'' | ':' | '%' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Lower-third text overlay: white 48pt text on a half-opaque black box.
pub fn drawtext(text: &str, fontfile: &str) -> String {
    format!(
        "drawtext=fontfile='{fontfile}':text='{}':fontsize=48:fontcolor=white:\
         x=(w-text_w)/2:y=h-180:box=1:boxcolor=black@0.5",
        escape_drawtext(text)
    )
}

/// Mix the source audio at full volume with a background track at a
/// fixed reduced volume. `duration=first` truncates the mix to the
/// source audio's length; a shorter background track simply runs out
/// early.
pub fn music_mix() -> &'static str {
    "[0:a]volume=1.0[a0];[1:a]volume=0.4[a1];[a0][a1]amix=inputs=2:duration=first:dropout_transition=2[aout]"
}

/// Best-known font locations per platform. Empty when none exist, which
/// lets the media tool fall back to its default font.
pub fn default_font() -> String {
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:/Windows/Fonts/arial.ttf",
    ];
    CANDIDATES
        .iter()
        .find(|p| Path::new(p).exists())
        .map(|p| (*p).to_string())
        .unwrap_or_default()
}

/// Full video filter for a reel: scale + center-crop plus an optional
/// text overlay stage.
pub fn reel_video_filter(width: u32, height: u32, overlay_text: Option<&str>) -> String {
    let mut vf = scale_crop(width, height);
    if let Some(text) = overlay_text {
        vf.push(',');
        vf.push_str(&drawtext(text, &default_font()));
    }
    vf
}
