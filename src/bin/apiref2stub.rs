//! CLI binary for apiref2stub.
//!
//! A thin shim over the library crate that maps CLI flags to `BatchConfig`
//! and prints results.

use anyhow::{Context, Result};
use apiref2stub::{
    rewrite_module_title, run_batch, BatchConfig, BatchProgressCallback, ProgressCallback,
};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar across the whole batch plus a log
/// line per stubbed document.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Create a callback whose progress-bar length is set by
    /// `on_batch_start` once the inputs have been expanded.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>4}/{len} pages",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        bar.set_prefix("Stubbing");
        Arc::new(Self { bar })
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_inputs: usize) {
        self.bar.set_length(total_inputs as u64);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Processing {total_inputs} pages…"))
        ));
    }

    fn on_page_done(&self, input: &Path, stub_len: usize) {
        self.bar.println(format!(
            "  {} {}  {}",
            green("✓"),
            input.display(),
            dim(&format!("{stub_len} bytes")),
        ));
        self.bar.inc(1);
    }

    fn on_page_skipped(&self, input: &Path) {
        self.bar
            .println(format!("  {} {}", dim("–"), dim(&input.display().to_string())));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, written: usize, skipped: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} stubs written  {}",
            green("✔"),
            bold(&written.to_string()),
            dim(&format!("({skipped} pages skipped)")),
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Stub every HTML page under doc/html and render the docset to build/docset
  apiref2stub generate build/docset doc/html

  # Explicit files, keeping the intermediate stubs for inspection
  apiref2stub generate --stubs-only build/docset NSArray.html NSString.html

  # Use a different renderer command and scratch directory
  apiref2stub generate --renderer yardoc --scratch-dir /tmp/stubs build/docset doc/html

  # Machine-readable run summary
  apiref2stub generate --json --stubs-only build/docset doc/html

  # Relabel the "Module:" heading in a rendered index page
  apiref2stub retitle build/docset/index.html Foundation

PAGE HANDLING:
  Class pages      need an "Inherits from" spec row; pages without one are skipped
  Protocol pages   need an abstract paragraph; the NSObject protocol is always skipped
  Reference pages  route their Functions / Data Types sections to the matching extractor
  Anything else    is skipped silently; skipping is not an error

ENVIRONMENT VARIABLES:
  APIREF2STUB_RENDERER     Override the renderer command (default: yard)
  APIREF2STUB_SCRATCH_DIR  Override the scratch stub directory
  RUST_LOG                 Tracing filter, e.g. apiref2stub=debug
"#;

/// Generate docset stubs from HTML API-reference pages.
#[derive(Parser, Debug)]
#[command(
    name = "apiref2stub",
    version,
    about = "Generate docset stubs from HTML API-reference pages",
    long_about = "Extract API symbols (classes, protocols, properties, methods, constants, \
structs, free functions) from vendor-style HTML reference pages and emit annotated stub \
files, then hand them to an external documentation renderer.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stub every input page and render the docset.
    Generate {
        /// Destination directory for the rendered docset.
        output: PathBuf,

        /// Input HTML files, or directories searched recursively for `.html`.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Scratch directory for intermediate stub files.
        #[arg(long, env = "APIREF2STUB_SCRATCH_DIR")]
        scratch_dir: Option<PathBuf>,

        /// External renderer command to run over the stub directory.
        #[arg(long, env = "APIREF2STUB_RENDERER", default_value = "yard")]
        renderer: String,

        /// Stop after writing stubs; do not run the renderer.
        #[arg(long)]
        stubs_only: bool,

        /// Print the run summary as JSON on stdout.
        #[arg(long)]
        json: bool,

        /// Disable the progress bar.
        #[arg(long)]
        no_progress: bool,
    },

    /// Rewrite the "Module:" label of a rendered file to a new title.
    Retitle {
        /// The rendered HTML file to edit in place.
        path: PathBuf,

        /// Replacement title.
        title: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Suppress INFO-level library logs when the progress bar is active; the
    // bar provides all the feedback that matters to the user.
    let show_progress = matches!(
        cli.command,
        Command::Generate {
            json: false,
            no_progress: false,
            ..
        }
    ) && !cli.quiet;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Generate {
            output,
            inputs,
            scratch_dir,
            renderer,
            stubs_only,
            json,
            ..
        } => {
            let mut config = BatchConfig::new(output, inputs)
                .renderer(renderer)
                .stubs_only(stubs_only);
            if let Some(dir) = scratch_dir {
                config = config.scratch_dir(dir);
            }
            if show_progress {
                let cb = CliProgressCallback::new_dynamic();
                config = config.progress_callback(cb as ProgressCallback);
            }

            let stats = run_batch(&config).context("Batch run failed")?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
                );
            } else if !cli.quiet && !show_progress {
                eprintln!(
                    "Wrote {}/{} stubs ({} skipped)",
                    stats.written, stats.total_inputs, stats.skipped
                );
            }
        }
        Command::Retitle { path, title } => {
            let rewritten = rewrite_module_title(&path, &title)
                .with_context(|| format!("Failed to retitle {}", path.display()))?;
            if rewritten && !cli.quiet {
                eprintln!("{} {}", green("✔"), bold(&path.display().to_string()));
            }
        }
    }

    Ok(())
}
