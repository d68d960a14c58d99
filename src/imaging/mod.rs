//! Image processing, pure Rust with no system dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** (JPEG, PNG, GIF, WebP) | `image` crate, hint-first with sniffing fallback |
//! | **Resize-fill** | Lanczos3 resample + centered crop |
//! | **Fill math** | pure functions in [`calculations`] |
//!
//! The module is split into:
//! - **Calculations**: pure dimension math (unit testable without pixels)
//! - **Decode**: bytes → RGBA8 raster, first frame only
//! - **Fill**: raster + target box → exact-size raster

mod calculations;
pub mod decode;
mod fill;

pub use calculations::{crop_offset, fill_dimensions};
pub use decode::{DecodeError, decode_source};
pub use fill::resize_fill;
