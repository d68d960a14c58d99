//! Shared raster fixtures for the emote-forge test suite.
//!
//! All fixtures are tiny synthetic RGBA images with exactly-known pixel
//! values, so tests can assert on colors and alpha without tolerance
//! gymnastics anywhere except resampling boundaries.

use image::{Rgba, RgbaImage};
use std::path::Path;

/// A single-color raster.
pub fn flat_image(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// Four solid quadrants: top-left red, top-right green, bottom-left blue,
/// bottom-right white. Used to verify that fill cropping keeps the center.
pub fn quadrant_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let right = x >= width / 2;
        let bottom = y >= height / 2;
        match (right, bottom) {
            (false, false) => Rgba([255, 0, 0, 255]),
            (true, false) => Rgba([0, 255, 0, 255]),
            (false, true) => Rgba([0, 0, 255, 255]),
            (true, true) => Rgba([255, 255, 255, 255]),
        }
    })
}

/// Opaque gray core with a fully transparent border of `border` pixels.
pub fn transparent_border_image(width: u32, height: u32, border: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let inside = x >= border && x < width - border && y >= border && y < height - border;
        if inside {
            Rgba([128, 128, 128, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Write a raster to `path` as PNG.
pub fn write_png(path: &Path, raster: &RgbaImage) {
    raster.save(path).unwrap();
}
