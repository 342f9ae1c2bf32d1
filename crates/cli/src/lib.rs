//! Vibration Analyzer Command Line
//!
//! Batch analysis of CSV vibration captures and generation of synthetic
//! sample data. Reports go to stdout, logs to stderr, optional SVG plots
//! to a directory.

pub mod batch;
pub mod config;
pub mod plot;
pub mod render;

pub use batch::{analyze_files, collect_inputs, generate_samples, AnalyzeOptions, FileOutcome};
pub use config::{load_config, Profile};
pub use plot::{plot_path, render_plot, write_plot};
pub use render::{render_json, render_report, render_summary, OutputFormat};

use anyhow::Context;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging. `RUST_LOG` overrides the default level.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}
