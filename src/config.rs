//! Configuration for a batch run.
//!
//! All batch behaviour is controlled through [`BatchConfig`]. The struct is
//! small enough that chainable setters on the value itself beat a separate
//! builder type; there is nothing to validate until the filesystem is
//! touched, and those failures belong to [`crate::batch::run_batch`].

use crate::progress::ProgressCallback;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for one batch run: inputs in, rendered docset out.
///
/// # Example
/// ```rust
/// use apiref2stub::BatchConfig;
///
/// let config = BatchConfig::new("build/docset", ["doc/html"])
///     .renderer("yard")
///     .stubs_only(true);
/// ```
#[derive(Clone)]
pub struct BatchConfig {
    /// Destination directory for the rendered docset. The renderer's output
    /// directory is moved here after a successful run.
    pub output: PathBuf,

    /// Input paths. Directories are expanded recursively to every `.html`
    /// file under them; plain files are used as-is.
    pub inputs: Vec<PathBuf>,

    /// Scratch directory for the intermediate stub files. Cleared and
    /// recreated at the start of every run. Default: `apiref2stub` under
    /// the system temp directory.
    pub scratch_dir: PathBuf,

    /// External documentation renderer command. Default: `yard`.
    pub renderer: String,

    /// Stop after writing the stub files, skipping the renderer entirely.
    /// Default: false.
    pub stubs_only: bool,

    /// Optional per-document progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl BatchConfig {
    /// Create a config for the given destination and inputs, with defaults
    /// for everything else.
    pub fn new(
        output: impl Into<PathBuf>,
        inputs: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> Self {
        Self {
            output: output.into(),
            inputs: inputs.into_iter().map(Into::into).collect(),
            scratch_dir: env::temp_dir().join("apiref2stub"),
            renderer: "yard".to_string(),
            stubs_only: false,
            progress_callback: None,
        }
    }

    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    pub fn renderer(mut self, renderer: impl Into<String>) -> Self {
        self.renderer = renderer.into();
        self
    }

    pub fn stubs_only(mut self, v: bool) -> Self {
        self.stubs_only = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.progress_callback = Some(cb);
        self
    }
}

impl fmt::Debug for BatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchConfig")
            .field("output", &self.output)
            .field("inputs", &self.inputs)
            .field("scratch_dir", &self.scratch_dir)
            .field("renderer", &self.renderer)
            .field("stubs_only", &self.stubs_only)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}
