//! The resize-fill transform: scale to cover, then center-crop.
//!
//! "Fill" is the opposite of "fit": instead of letterboxing, the source is
//! scaled uniformly until it covers the whole target box, and the overhang
//! on the longer axis is cropped away symmetrically. Visual framing is
//! preserved: the center of the source always survives.

use super::calculations::{crop_offset, fill_dimensions};
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Produce a new raster of exactly `width x height` from `source`.
///
/// Lanczos3 resampling on all four channels, so alpha edges stay aligned
/// with color edges. Pure: the source is never mutated and no state is
/// shared between invocations, which is what lets the orchestrator run one
/// call per catalog entry in parallel.
pub fn resize_fill(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if source.dimensions() == (width, height) {
        return source.clone();
    }

    let (fill_w, fill_h) = fill_dimensions(source.dimensions(), (width, height));
    let scaled = imageops::resize(source, fill_w, fill_h, FilterType::Lanczos3);
    let (x, y) = crop_offset((fill_w, fill_h), (width, height));
    imageops::crop_imm(&scaled, x, y, width, height).to_image()
}
