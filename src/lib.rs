//! # apiref2stub
//!
//! Extract API symbols from vendor-style HTML API-reference pages and emit
//! documentation-comment-annotated stub files for a docset renderer.
//!
//! ## Why this crate?
//!
//! Framework reference pages carry everything a docset needs (property,
//! method, constant, struct, and function declarations with their prose)
//! but locked inside presentational HTML. This crate walks each parsed
//! page, recognizes one of the known page shapes (class, protocol,
//! functions/data-types reference), and rewrites the declarations as
//! compact symbolic stubs the external renderer can cross-reference. The
//! stubs are scaffolding only; they are never executed.
//!
//! ## Pipeline Overview
//!
//! ```text
//! HTML page
//!  │
//!  ├─ 1. Classify   title suffix → Class / Protocol / Reference / Unrecognized
//!  ├─ 2. Extract    properties, methods, constants, structs, functions
//!  ├─ 3. Normalize  declared native types → binding-level categories
//!  ├─ 4. Render     typed symbol model → annotated stub text
//!  └─ 5. Batch      stub files → external renderer → relocated docset
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use apiref2stub::{run_batch, BatchConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BatchConfig::new("build/docset", ["doc/html"]);
//!     let stats = run_batch(&config)?;
//!     eprintln!("{} stubs written, {} pages skipped", stats.written, stats.skipped);
//!     Ok(())
//! }
//! ```
//!
//! Single pages are available without the batch machinery:
//!
//! ```rust
//! use apiref2stub::generate_stub;
//!
//! let html = r#"<html><head><title>Foo Class Reference</title></head><body>
//!   <table class="specbox"><tr><td>Inherits from</td><td>Bar</td></tr></table>
//!   <p class="abstract">A foo.</p></body></html>"#;
//! let stub = generate_stub(html).unwrap();
//! assert!(stub.contains("class Foo < Bar"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `apiref2stub` binary (clap + anyhow + tracing-subscriber + indicatif + serde_json) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! apiref2stub = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod batch;
pub mod config;
pub mod error;
pub mod page;
pub mod pipeline;
pub mod progress;
pub mod render;
pub mod symbol;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use batch::{rewrite_module_title, run_batch, BatchStats};
pub use config::BatchConfig;
pub use error::StubgenError;
pub use page::{classify, extract_page, generate_stub};
pub use progress::{BatchProgressCallback, NoopBatchProgress, ProgressCallback};
pub use render::render_page;
pub use symbol::{PageBody, PageKind, PageStub, TypeCategory};
