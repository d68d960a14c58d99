//! Pure dimension math for the fill transform.
//!
//! All functions here are pure and testable without any I/O or pixel data.

/// Calculate the scaled dimensions needed to fully cover a target rectangle.
///
/// The source is scaled uniformly by `max(target_w/src_w, target_h/src_h)`:
/// one output dimension matches the target exactly, the other meets or
/// exceeds it. The overhang is what [`crop_offset`] later trims away.
///
/// # Examples
/// ```
/// # use emote_forge::imaging::fill_dimensions;
/// // Wide 4:3 source into a square target: height matches, width overhangs.
/// assert_eq!(fill_dimensions((800, 600), (128, 128)), (171, 128));
///
/// // Tall source into a square target: width matches, height overhangs.
/// assert_eq!(fill_dimensions((600, 800), (128, 128)), (128, 171));
///
/// // Same aspect ratio: exact fit, no overhang.
/// assert_eq!(fill_dimensions((256, 256), (64, 64)), (64, 64));
/// ```
pub fn fill_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w as f64 / tgt_h as f64;

    if src_aspect > tgt_aspect {
        // Source is wider: height matches, width overhangs.
        let h = tgt_h;
        let w = (h as f64 * src_aspect).round() as u32;
        (w.max(tgt_w), h)
    } else {
        // Source is taller or equal: width matches, height overhangs.
        let w = tgt_w;
        let h = (w as f64 / src_aspect).round() as u32;
        (w, h.max(tgt_h))
    }
}

/// Top-left corner of a centered crop of `target` out of `scaled`.
///
/// Overhang is discarded symmetrically; an odd leftover pixel goes to the
/// bottom/right edge.
///
/// # Examples
/// ```
/// # use emote_forge::imaging::crop_offset;
/// assert_eq!(crop_offset((171, 128), (128, 128)), (21, 0));
/// assert_eq!(crop_offset((128, 128), (128, 128)), (0, 0));
/// ```
pub fn crop_offset(scaled: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (scaled_w, scaled_h) = scaled;
    let (tgt_w, tgt_h) = target;
    (
        scaled_w.saturating_sub(tgt_w) / 2,
        scaled_h.saturating_sub(tgt_h) / 2,
    )
}
