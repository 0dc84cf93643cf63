//! Progress-callback trait for per-document batch events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::BatchConfig::progress_callback`] to receive events as
//! the batch driver walks its input files. The callback approach keeps the
//! library ignorant of how the host reports progress: the bundled CLI
//! forwards events to an `indicatif` bar, a server could forward them to a
//! channel, a test can count them.
//!
//! The batch driver itself is single-threaded, but the trait is
//! `Send + Sync` so one callback can be shared with other threads that
//! observe the run.

use std::path::Path;
use std::sync::Arc;

/// Called by the batch driver as it processes each input document.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once before any document is read.
    ///
    /// # Arguments
    /// * `total_inputs` — number of input files that will be processed
    fn on_batch_start(&self, total_inputs: usize) {
        let _ = total_inputs;
    }

    /// Called when a document produced a stub file.
    ///
    /// # Arguments
    /// * `input`    — path of the source HTML file
    /// * `stub_len` — byte length of the emitted stub
    fn on_page_done(&self, input: &Path, stub_len: usize) {
        let _ = (input, stub_len);
    }

    /// Called when a document was skipped (unrecognized title, missing
    /// superclass, missing protocol abstract, or the reserved root protocol).
    fn on_page_skipped(&self, input: &Path) {
        let _ = input;
    }

    /// Called once after every input has been attempted, before the external
    /// renderer runs.
    ///
    /// # Arguments
    /// * `written` — stub files produced
    /// * `skipped` — documents that yielded no stub
    fn on_batch_complete(&self, written: usize, skipped: usize) {
        let _ = (written, skipped);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopBatchProgress;

impl BatchProgressCallback for NoopBatchProgress {}

/// Convenience alias matching the type stored in [`crate::config::BatchConfig`].
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;
