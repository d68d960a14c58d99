//! CLI output formatting.
//!
//! Each surface has a `format_*` function (returns strings) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.
//!
//! ```text
//! Discord
//!     Small       28x28
//!     Medium      32x32
//!
//! Converting 11 emote sizes
//! Decoded source 640x480
//!     Discord Small 28x28 → cat-Discord-Small-28x28.png
//! Bundle: cat_emote_bundle (11 files)
//! ```

use crate::catalog::Catalog;
use crate::convert::{ConversionOutcome, ConvertEvent};
use std::path::Path;

/// Filename portion of a path for display; falls back to the full path.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Render the catalog grouped by platform, preserving catalog order.
pub fn format_catalog(catalog: &Catalog) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_platform: Option<&str> = None;
    for spec in catalog.iter() {
        if current_platform != Some(spec.platform.as_str()) {
            if current_platform.is_some() {
                lines.push(String::new());
            }
            lines.push(spec.platform.clone());
            current_platform = Some(spec.platform.as_str());
        }
        lines.push(format!(
            "    {:<10} {}x{}",
            spec.variant, spec.width, spec.height
        ));
    }
    lines
}

/// One line per progress event.
pub fn format_event(event: &ConvertEvent) -> String {
    match event {
        ConvertEvent::Started { total } => format!("Converting {total} emote sizes"),
        ConvertEvent::Decoded { width, height } => format!("Decoded source {width}x{height}"),
        ConvertEvent::EmoteWritten { spec, path, .. } => format!(
            "    {} {} {}x{} → {}",
            spec.platform,
            spec.variant,
            spec.width,
            spec.height,
            display_name(path)
        ),
        ConvertEvent::Finished { bundle_dir } => {
            format!("Bundle written to {}", bundle_dir.display())
        }
    }
}

/// Summary of a finished run: bundle location plus every file written.
pub fn format_outcome(outcome: &ConversionOutcome) -> Vec<String> {
    let mut lines = vec![format!(
        "Bundle: {} ({} files)",
        outcome.bundle_dir.display(),
        outcome.written.len()
    )];
    for path in &outcome.written {
        lines.push(format!("    {}", display_name(path)));
    }
    lines
}

pub fn print_catalog(catalog: &Catalog) {
    for line in format_catalog(catalog) {
        println!("{line}");
    }
}

pub fn print_outcome(outcome: &ConversionOutcome) {
    for line in format_outcome(outcome) {
        println!("{line}");
    }
}
