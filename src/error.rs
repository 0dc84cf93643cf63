//! Error types for the apiref2stub library.
//!
//! Per-page degradation is not an error: a page with an unrecognized title,
//! a missing superclass row, or a malformed declaration simply yields no
//! stub (or drops the one member), and the batch moves on. [`StubgenError`]
//! covers only the failures that stop a batch from making sense at all,
//! which are filesystem and renderer-process failures.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// All fatal errors returned by the apiref2stub library.
///
/// Malformed page content never surfaces here; see the module docs.
#[derive(Debug, Error)]
pub enum StubgenError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// An input HTML file could not be read.
    #[error("Failed to read input file '{path}': {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory input expanded into an invalid glob pattern
    /// (a path containing glob metacharacters the pattern parser rejects).
    #[error("Failed to expand input directory '{path}': {source}")]
    InputPattern {
        path: PathBuf,
        #[source]
        source: glob::PatternError,
    },

    // ── Scratch / output errors ───────────────────────────────────────────
    /// The scratch stub directory could not be cleared and recreated.
    #[error("Failed to reset scratch directory '{path}': {source}")]
    ScratchDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stub file could not be written into the scratch directory.
    #[error("Failed to write stub file '{path}': {source}")]
    WriteStub {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rendered docset could not be moved to its destination.
    #[error("Failed to move rendered output '{from}' to '{to}': {source}")]
    RelocateOutput {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Renderer errors ───────────────────────────────────────────────────
    /// The external documentation renderer could not be started.
    #[error("Failed to run renderer '{renderer}': {source}\nCheck it is installed and on PATH.")]
    RendererSpawn {
        renderer: String,
        #[source]
        source: std::io::Error,
    },

    /// The external documentation renderer ran but exited non-zero.
    #[error("Renderer '{renderer}' failed with {status}")]
    RendererFailed {
        renderer: String,
        status: ExitStatus,
    },

    // ── Title-rewrite errors ──────────────────────────────────────────────
    /// A rendered file could not be rewritten in place during the
    /// title-relabel utility. A *missing* file is a warning, not this.
    #[error("Failed to rewrite '{path}': {source}")]
    RewriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
