//! # Emote Forge
//!
//! Convert one source image into the full set of emote sizes that Discord,
//! Twitch, and 7TV require, written as a bundle of standalone PNG files
//! next to the input.
//!
//! # Architecture: One-Way Pipeline
//!
//! ```text
//! input path → decode (once) → fan-out over size catalog → PNG per entry
//!                                  transform + write
//! ```
//!
//! The decode stage produces a single RGBA raster; every catalog entry is
//! then an independent transform-and-write, which is why the fan-out can run
//! on a thread pool without any shared mutable state.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | `SizeSpec` and the validated, injectable size catalog |
//! | [`imaging`] | decode, pure fill math, and the Lanczos3 resize-fill transform |
//! | [`bundle`] | bundle directory naming, output filename scheme, PNG persistence |
//! | [`convert`] | the orchestrator: request validation, run sequencing, progress events |
//! | [`config`] | optional `config.toml`: format policy, worker cap, catalog override |
//! | [`output`] | CLI display formatting: pure `format_*` functions + `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## PNG-Only Output
//!
//! Every output is PNG regardless of the source format. Emotes need
//! transparency, PNG is the one format in the set that always carries it,
//! and the platforms accept it everywhere. Animated sources contribute only
//! their first frame; there is no animated output.
//!
//! ## Fill, Not Fit
//!
//! Targets are mostly square and sources mostly are not. Letterboxing a
//! 28x28 emote wastes pixels, so the transform scales the source to cover
//! the target box and center-crops the overhang, so the subject in the middle
//! of the frame survives at every size.
//!
//! ## Decode Before Directory Creation
//!
//! The bundle directory is created only after the source decodes. Selecting
//! a corrupt file fails cleanly without littering the input's directory
//! with an empty bundle.
//!
//! ## Abort-On-First Failure
//!
//! A run stops at its first failure (in catalog order) and leaves
//! already-written files in place. Reruns overwrite in place, so recovery
//! is "fix the cause and convert again" rather than rollback machinery.
//!
//! ## No Video Input
//!
//! Only decodable image extensions are accepted. `.webm` in particular is
//! rejected at selection: accepting a container the pipeline cannot decode
//! would just defer the same failure to a worse place.

pub mod bundle;
pub mod catalog;
pub mod config;
pub mod convert;
pub mod imaging;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
