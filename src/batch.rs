//! Batch driver: expand inputs, stub every page, hand the scratch tree to
//! the external renderer, relocate its output.
//!
//! The pipeline is a single-threaded batch transform. Each document is read,
//! stubbed, and written before the next begins; documents share no state, so
//! processing order only affects stub file numbering. Content-level problems
//! (unrecognized pages, malformed declarations) never abort the batch; only
//! filesystem and renderer-process failures do.

use crate::config::BatchConfig;
use crate::error::StubgenError;
use crate::page::generate_stub;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Marker line the downstream renderer expects at the top of every stub.
const ENCODING_MARKER: &str = "# -*- coding: utf-8 -*-\n";

/// The label the renderer prints for the top-level module listing; the
/// retitle utility replaces it with a caller-supplied title.
static MODULE_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*Module:").unwrap());

/// Outcome counters for one batch run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BatchStats {
    /// Input files found after directory expansion.
    pub total_inputs: usize,
    /// Stub files written into the scratch directory.
    pub written: usize,
    /// Documents that yielded no stub.
    pub skipped: usize,
}

/// Run one batch: stub every input page, then render and relocate the
/// docset unless [`BatchConfig::stubs_only`] is set.
pub fn run_batch(config: &BatchConfig) -> Result<BatchStats, StubgenError> {
    let inputs = expand_inputs(&config.inputs)?;
    info!("Processing {} input files", inputs.len());

    reset_scratch_dir(&config.scratch_dir)?;

    if let Some(cb) = &config.progress_callback {
        cb.on_batch_start(inputs.len());
    }

    let mut written = 0usize;
    let mut skipped = 0usize;
    for input in &inputs {
        let html = fs::read_to_string(input).map_err(|source| StubgenError::ReadInput {
            path: input.clone(),
            source,
        })?;

        match generate_stub(&html) {
            Some(stub) => {
                let path = config.scratch_dir.join(format!("t{written}.rb"));
                let mut contents = String::with_capacity(ENCODING_MARKER.len() + stub.len());
                contents.push_str(ENCODING_MARKER);
                contents.push_str(&stub);
                fs::write(&path, &contents).map_err(|source| StubgenError::WriteStub {
                    path: path.clone(),
                    source,
                })?;
                written += 1;
                if let Some(cb) = &config.progress_callback {
                    cb.on_page_done(input, stub.len());
                }
            }
            None => {
                debug!("no stub produced for {}", input.display());
                skipped += 1;
                if let Some(cb) = &config.progress_callback {
                    cb.on_page_skipped(input);
                }
            }
        }
    }

    if let Some(cb) = &config.progress_callback {
        cb.on_batch_complete(written, skipped);
    }
    info!("Wrote {written} stub files, skipped {skipped} documents");

    if !config.stubs_only {
        invoke_renderer(config)?;
    }

    Ok(BatchStats {
        total_inputs: inputs.len(),
        written,
        skipped,
    })
}

/// Expand the configured inputs: directories recurse to every `.html` file
/// under them, plain files pass through untouched.
fn expand_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, StubgenError> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            let pattern = path.join("**/*.html");
            let matches = glob::glob(&pattern.to_string_lossy()).map_err(|source| {
                StubgenError::InputPattern {
                    path: path.clone(),
                    source,
                }
            })?;
            for entry in matches {
                match entry {
                    Ok(file) => out.push(file),
                    Err(e) => warn!("skipping unreadable path under {}: {e}", path.display()),
                }
            }
        } else {
            out.push(path.clone());
        }
    }
    Ok(out)
}

/// Clear and recreate the scratch directory. Runs once per batch so stale
/// stubs from a previous run never leak into the renderer's input.
fn reset_scratch_dir(dir: &Path) -> Result<(), StubgenError> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|source| StubgenError::ScratchDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    fs::create_dir_all(dir).map_err(|source| StubgenError::ScratchDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Run the external renderer over the scratch tree, then move its `doc`
/// output directory to the configured destination.
fn invoke_renderer(config: &BatchConfig) -> Result<(), StubgenError> {
    info!("Running renderer: {} doc {}", config.renderer, config.scratch_dir.display());
    let status = Command::new(&config.renderer)
        .arg("doc")
        .arg(&config.scratch_dir)
        .status()
        .map_err(|source| StubgenError::RendererSpawn {
            renderer: config.renderer.clone(),
            source,
        })?;
    if !status.success() {
        return Err(StubgenError::RendererFailed {
            renderer: config.renderer.clone(),
            status,
        });
    }

    // The renderer writes into ./doc relative to the working directory.
    let rendered = PathBuf::from("doc");
    fs::rename(&rendered, &config.output).map_err(|source| StubgenError::RelocateOutput {
        from: rendered,
        to: config.output.clone(),
        source,
    })
}

/// Rewrite the renderer's "Module:" label in an already-rendered file to a
/// caller-supplied title. A missing target file is a warning and a no-op,
/// never an error; returns whether the file was rewritten.
pub fn rewrite_module_title(path: &Path, new_title: &str) -> Result<bool, StubgenError> {
    if !path.exists() {
        warn!("File does not exist: {}", path.display());
        return Ok(false);
    }
    let data = fs::read_to_string(path).map_err(|source| StubgenError::RewriteFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let replaced = MODULE_LABEL.replace_all(&data, NoExpand(&format!("{new_title}:")));
    fs::write(path, replaced.as_bytes()).map_err(|source| StubgenError::RewriteFailed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}
