//! Source image decoding.
//!
//! Decoding is hint-first: the input path's extension selects a decoder from
//! the supported set, and only an unrecognized extension falls back to
//! content sniffing across the same set. A recognized hint that fails to
//! parse is a hard error: a `.png` file full of garbage is reported as a
//! malformed PNG, not silently retried as something else.
//!
//! Animated inputs (GIF, WebP) decode to their first frame only; every
//! output of this pipeline is a single static raster.

use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {} as {format}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        format: &'static str,
        #[source]
        source: image::ImageError,
    },
}

/// Extensions whose decoders are compiled in and dispatched by hint.
///
/// Anything else (including video containers that slipped past selection)
/// goes through content sniffing and fails there if undecodable.
const FORMAT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("gif", ImageFormat::Gif),
    ("webp", ImageFormat::WebP),
];

fn format_for_extension(ext: &str) -> Option<ImageFormat> {
    FORMAT_CANDIDATES
        .iter()
        .find(|(candidate, _)| ext.eq_ignore_ascii_case(candidate))
        .map(|(_, format)| *format)
}

fn format_label(format: ImageFormat) -> &'static str {
    format.extensions_str().first().copied().unwrap_or("image")
}

/// Decode the file at `path` into an RGBA8 raster.
///
/// The conversion to RGBA8 happens here, once, so every later transform and
/// encode sees an alpha channel regardless of the source format.
pub fn decode_source(path: &Path) -> Result<RgbaImage, DecodeError> {
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let hint = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(format_for_extension);

    let decoded = match hint {
        Some(format) => decode_as(path, &bytes, format)?,
        None => sniff_and_decode(path, &bytes)?,
    };

    Ok(decoded.into_rgba8())
}

fn decode_as(
    path: &Path,
    bytes: &[u8],
    format: ImageFormat,
) -> Result<DynamicImage, DecodeError> {
    ImageReader::with_format(Cursor::new(bytes), format)
        .decode()
        .map_err(|source| DecodeError::Malformed {
            path: path.to_path_buf(),
            format: format_label(format),
            source,
        })
}

fn sniff_and_decode(path: &Path, bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|source| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let format = reader.format().map(format_label).unwrap_or("auto-detected");
    reader.decode().map_err(|source| DecodeError::Malformed {
        path: path.to_path_buf(),
        format,
        source,
    })
}
