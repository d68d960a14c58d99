//! The emote size catalog: which outputs a conversion run must produce.
//!
//! Each chat platform publishes its own set of required emote dimensions.
//! A [`SizeSpec`] names one required output: platform, variant label, and
//! exact pixel dimensions. A [`Catalog`] is an ordered, validated, read-only
//! sequence of specs; the orchestrator produces exactly one file per entry.
//!
//! The catalog is an explicit value passed into the converter, not a global:
//! tests inject a minimal catalog, and users can replace the built-in table
//! entirely via `[[sizes]]` entries in `config.toml`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog must contain at least one size")]
    Empty,
    #[error("size {platform}/{variant} has zero width or height")]
    ZeroDimension { platform: String, variant: String },
    #[error("duplicate size entry {platform}/{variant}")]
    Duplicate { platform: String, variant: String },
    #[error("two sizes produce the same output filename tag '{tag}'")]
    FilenameCollision { tag: String },
}

/// One required emote output: platform, variant label, exact dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeSpec {
    /// Platform the size belongs to (e.g. "Discord"). Only echoed into
    /// filenames and display output; nothing dispatches on it.
    pub platform: String,
    /// Variant label within the platform (e.g. "Small", "2.0", "4x").
    pub variant: String,
    pub width: u32,
    pub height: u32,
}

impl SizeSpec {
    /// The unique filename fragment for this spec:
    /// `"<platform>-<variant>-<width>x<height>"`.
    ///
    /// Output files are named `<stem>-<tag>.png`, so tag uniqueness across
    /// the catalog is what guarantees no two sizes overwrite each other.
    pub fn file_tag(&self) -> String {
        format!(
            "{}-{}-{}x{}",
            self.platform, self.variant, self.width, self.height
        )
    }
}

/// Ordered, validated set of [`SizeSpec`] entries.
///
/// Order defines output enumeration order. Construction rejects empty
/// catalogs, zero dimensions, duplicate `(platform, variant)` pairs, and
/// filename-tag collisions, so the rest of the pipeline never has to
/// re-check those invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    specs: Vec<SizeSpec>,
}

impl Catalog {
    /// Validate and build a catalog from explicit entries.
    pub fn new(specs: Vec<SizeSpec>) -> Result<Self, CatalogError> {
        if specs.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut keys = std::collections::HashSet::new();
        let mut tags = std::collections::HashSet::new();
        for spec in &specs {
            if spec.width == 0 || spec.height == 0 {
                return Err(CatalogError::ZeroDimension {
                    platform: spec.platform.clone(),
                    variant: spec.variant.clone(),
                });
            }
            if !keys.insert((spec.platform.clone(), spec.variant.clone())) {
                return Err(CatalogError::Duplicate {
                    platform: spec.platform.clone(),
                    variant: spec.variant.clone(),
                });
            }
            let tag = spec.file_tag();
            if !tags.insert(tag.clone()) {
                return Err(CatalogError::FilenameCollision { tag });
            }
        }
        Ok(Self { specs })
    }

    /// The built-in platform table: 4 Discord + 3 Twitch + 4 7TV sizes.
    pub fn builtin() -> Self {
        let entries = [
            ("Discord", "Small", 28, 28),
            ("Discord", "Medium", 32, 32),
            ("Discord", "Large", 48, 48),
            ("Discord", "Animated", 128, 128),
            ("Twitch", "1.0", 28, 28),
            ("Twitch", "2.0", 56, 56),
            ("Twitch", "3.0", 112, 112),
            ("7TV", "1x", 32, 32),
            ("7TV", "2x", 64, 64),
            ("7TV", "3x", 96, 96),
            ("7TV", "4x", 128, 128),
        ];
        let specs = entries
            .into_iter()
            .map(|(platform, variant, width, height)| SizeSpec {
                platform: platform.to_string(),
                variant: variant.to_string(),
                width,
                height,
            })
            .collect();
        // The built-in table satisfies every construction invariant.
        Self { specs }
    }

    pub fn specs(&self) -> &[SizeSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SizeSpec> {
        self.specs.iter()
    }
}
