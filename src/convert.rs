//! The conversion orchestrator.
//!
//! Sequences one run: validate the selection, decode the source once, create
//! the bundle directory, then fan out over the catalog (transform + write
//! per entry) and aggregate the outcome. Decode happens before directory
//! creation, so a file that fails to decode leaves no trace on disk.
//!
//! ## Failure policy
//!
//! Abort-on-first: the first failure in catalog order is the one reported,
//! and entries that have not started yet are skipped. Files already written
//! stay in place; a rerun after fixing the cause overwrites them.
//!
//! ## Progress reporting
//!
//! Callers that want progress pass an `mpsc::Sender<ConvertEvent>`; the CLI
//! drains it from a printer thread. The returned `Result` is the single
//! authoritative completion signal: exactly one per run, success or
//! failure, never both.

use crate::bundle::{WriteError, create_bundle_dir, emote_filename, input_stem, write_emote};
use crate::catalog::{Catalog, SizeSpec};
use crate::config::FormatsConfig;
use crate::imaging::{DecodeError, decode_source, resize_fill};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("{} has no file extension", path.display())]
    MissingExtension { path: PathBuf },
    #[error("unsupported file type .{extension} (accepted: {accepted})")]
    UnsupportedExtension { extension: String, accepted: String },
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Check a path against the extension allow-list.
///
/// Pure extension check, not a content check: a malformed file with an
/// accepted extension passes here and fails later at decode.
pub fn validate_selection(path: &Path, formats: &FormatsConfig) -> Result<(), SelectionError> {
    let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
        return Err(SelectionError::MissingExtension {
            path: path.to_path_buf(),
        });
    };
    if formats.accepts(extension) {
        Ok(())
    } else {
        Err(SelectionError::UnsupportedExtension {
            extension: extension.to_lowercase(),
            accepted: formats.allowed_extensions().join(", "),
        })
    }
}

/// A validated input selection. Construction is the request boundary: only
/// paths that pass [`validate_selection`] become requests.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    path: PathBuf,
}

impl ConversionRequest {
    pub fn new(
        path: impl Into<PathBuf>,
        formats: &FormatsConfig,
    ) -> Result<Self, SelectionError> {
        let path = path.into();
        validate_selection(&path, formats)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Progress signals emitted during a run.
#[derive(Debug, Clone)]
pub enum ConvertEvent {
    /// The run has begun; `total` emotes will be attempted.
    Started { total: usize },
    /// The source decoded successfully.
    Decoded { width: u32, height: u32 },
    /// One catalog entry was transformed and written.
    /// `index` is the entry's catalog position; arrival order follows
    /// completion, not the catalog.
    EmoteWritten {
        index: usize,
        spec: SizeSpec,
        path: PathBuf,
    },
    /// Every entry was written. Sent only on success; failures surface
    /// through the returned `Result` instead.
    Finished { bundle_dir: PathBuf },
}

/// What a successful run produced. `written` is in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutcome {
    pub bundle_dir: PathBuf,
    pub written: Vec<PathBuf>,
}

/// Runs conversions against a fixed catalog.
pub struct Converter {
    catalog: Catalog,
}

impl Converter {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Convert without progress reporting.
    pub fn convert(&self, request: &ConversionRequest) -> Result<ConversionOutcome, ConvertError> {
        self.convert_with_events(request, None)
    }

    /// Convert, sending [`ConvertEvent`]s as the run progresses.
    ///
    /// The per-entry fan-out runs on the rayon pool. Guarantees:
    /// - `written` preserves catalog order regardless of completion order;
    /// - the first failure in catalog order is the one reported;
    /// - the bundle directory exists before any write starts.
    pub fn convert_with_events(
        &self,
        request: &ConversionRequest,
        events: Option<Sender<ConvertEvent>>,
    ) -> Result<ConversionOutcome, ConvertError> {
        emit(
            &events,
            ConvertEvent::Started {
                total: self.catalog.len(),
            },
        );

        let source = decode_source(request.path())?;
        emit(
            &events,
            ConvertEvent::Decoded {
                width: source.width(),
                height: source.height(),
            },
        );

        let bundle_dir = create_bundle_dir(request.path())?;
        let stem = input_stem(request.path());

        let failed = AtomicBool::new(false);
        let results: Vec<Option<Result<PathBuf, WriteError>>> = self
            .catalog
            .specs()
            .par_iter()
            .enumerate()
            .map_with(events.clone(), |tx, (index, spec)| {
                if failed.load(Ordering::Relaxed) {
                    return None;
                }
                let raster = resize_fill(&source, spec.width, spec.height);
                let filename = emote_filename(&stem, spec);
                let result = write_emote(&bundle_dir, &filename, &raster);
                match &result {
                    Ok(path) => emit(
                        tx,
                        ConvertEvent::EmoteWritten {
                            index,
                            spec: spec.clone(),
                            path: path.clone(),
                        },
                    ),
                    Err(_) => failed.store(true, Ordering::Relaxed),
                }
                Some(result)
            })
            .collect();

        let mut written = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Some(Ok(path)) => written.push(path),
                Some(Err(error)) => return Err(ConvertError::Write(error)),
                // Skipped after a failure elsewhere; that failure surfaces
                // from its own slot.
                None => {}
            }
        }
        debug_assert_eq!(written.len(), self.catalog.len());

        emit(
            &events,
            ConvertEvent::Finished {
                bundle_dir: bundle_dir.clone(),
            },
        );
        Ok(ConversionOutcome {
            bundle_dir,
            written,
        })
    }
}

fn emit(events: &Option<Sender<ConvertEvent>>, event: ConvertEvent) {
    if let Some(tx) = events {
        // A caller that dropped its receiver just stops getting progress.
        let _ = tx.send(event);
    }
}
