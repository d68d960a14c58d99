//! Bundle directory layout and per-emote persistence.
//!
//! A conversion run writes all of its outputs into a sibling directory of
//! the input file, named `<stem>_emote_bundle`. The directory is created
//! once per run and never cleared: re-running on the same input overwrites
//! the same-named files in place.
//!
//! Every output is PNG regardless of the source format, so transparency is
//! always representable.

use crate::catalog::SizeSpec;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Suffix appended to the input's stem to form the bundle directory name.
pub const BUNDLE_SUFFIX: &str = "_emote_bundle";

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("failed to create bundle directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {filename}: {source}")]
    Io {
        filename: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode {filename}: {source}")]
    Encode {
        filename: String,
        #[source]
        source: image::ImageError,
    },
}

/// The input filename without its extension; the base of every output name.
pub fn input_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "emote".to_string())
}

/// Bundle directory for an input: `parent/<stem>_emote_bundle`.
pub fn bundle_dir_for(input: &Path) -> PathBuf {
    let name = format!("{}{BUNDLE_SUFFIX}", input_stem(input));
    match input.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// Create the bundle directory (and missing parents); silent if it exists.
pub fn create_bundle_dir(input: &Path) -> Result<PathBuf, WriteError> {
    let dir = bundle_dir_for(input);
    std::fs::create_dir_all(&dir).map_err(|source| WriteError::CreateDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Output filename for one catalog entry:
/// `"<stem>-<platform>-<variant>-<width>x<height>.png"`.
pub fn emote_filename(stem: &str, spec: &SizeSpec) -> String {
    format!("{stem}-{}.png", spec.file_tag())
}

/// Encode `raster` as PNG into `dir/filename`, overwriting if present.
pub fn write_emote(dir: &Path, filename: &str, raster: &RgbaImage) -> Result<PathBuf, WriteError> {
    let path = dir.join(filename);
    let file = File::create(&path).map_err(|source| WriteError::Io {
        filename: filename.to_string(),
        source,
    })?;
    let writer = BufWriter::new(file);
    PngEncoder::new(writer)
        .write_image(
            raster.as_raw(),
            raster.width(),
            raster.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|source| WriteError::Encode {
            filename: filename.to_string(),
            source,
        })?;
    Ok(path)
}
