//! Batch analysis and sample generation

use crate::plot::{capture_stem, plot_path, write_plot};
use anyhow::{bail, Context};
use diagnostics::{AnalysisConfig, DiagnosticReport, VibrationAnalyzer};
use signal_synth::{generate, MachineCondition, SynthConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Per-run analysis settings shared by every file
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Shaft running frequency (Hz); the extraction default when `None`
    pub running_freq: Option<f64>,
    /// Sampling frequency for captures without usable timestamps
    pub fallback_fs: Option<f64>,
    /// Write a `<stem>_analysis.svg` plot per capture here
    pub plot_dir: Option<PathBuf>,
}

/// Result of analyzing one capture file
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: anyhow::Result<DiagnosticReport>,
}

/// Expand directories into their `.csv` files, sorted by name.
/// Explicit file arguments are kept as given.
pub fn collect_inputs(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = std::fs::read_dir(path)
                .with_context(|| format!("Failed to read directory {}", path.display()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| {
                    p.is_file()
                        && p.extension()
                            .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"))
                })
                .collect();
            found.sort();
            debug!("Found {} capture(s) in {}", found.len(), path.display());
            inputs.extend(found);
        } else {
            inputs.push(path.clone());
        }
    }

    if inputs.is_empty() {
        bail!("No CSV captures found");
    }
    Ok(inputs)
}

fn analyze_file(
    path: &Path,
    config: &AnalysisConfig,
    options: &AnalyzeOptions,
) -> anyhow::Result<DiagnosticReport> {
    let signal = signal_io::load_csv(path)?.into_signal(options.fallback_fs)?;
    let mut analyzer = VibrationAnalyzer::new(config)?;
    let report = analyzer.analyze(&signal, options.running_freq)?;

    if let Some(dir) = &options.plot_dir {
        let title = format!("Vibration analysis: {}", capture_stem(path).to_uppercase());
        write_plot(
            &plot_path(dir, path),
            &title,
            &signal,
            &report,
            config.extraction.hf_cutoff_hz,
        )?;
    }

    Ok(report)
}

/// Analyze every file on the blocking pool. Outcomes come back in input
/// order; a failed file does not stop the others.
pub async fn analyze_files(
    paths: Vec<PathBuf>,
    config: Arc<AnalysisConfig>,
    options: &AnalyzeOptions,
) -> Vec<FileOutcome> {
    let total = paths.len();
    let mut tasks = JoinSet::new();

    for (index, path) in paths.iter().cloned().enumerate() {
        let config = Arc::clone(&config);
        let options = options.clone();
        tasks.spawn_blocking(move || {
            let result = analyze_file(&path, &config, &options)
                .with_context(|| format!("Failed to analyze {}", path.display()));
            (index, FileOutcome { path, result })
        });
    }

    let mut slots: Vec<Option<FileOutcome>> = (0..total).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => {
                if let Err(e) = &outcome.result {
                    error!("{:#}", e);
                }
                slots[index] = Some(outcome);
            }
            Err(e) => error!("Analysis task failed: {}", e),
        }
    }

    // A panicked task leaves its slot empty; report it as a failure
    let outcomes: Vec<FileOutcome> = slots
        .into_iter()
        .zip(paths)
        .map(|(slot, path)| {
            slot.unwrap_or_else(|| FileOutcome {
                result: Err(anyhow::anyhow!("Analysis of {} aborted", path.display())),
                path,
            })
        })
        .collect();

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!("Analyzed {} file(s), {} failed", total, failed);
    outcomes
}

/// Write one synthetic capture per machine condition into `out_dir`.
///
/// Condition `i` of `MachineCondition::ALL` is seeded with `base.seed + i`,
/// so a base seed of 1 gives normal=1, imbalance=2, misalignment=3, bearing=4.
pub fn generate_samples(out_dir: &Path, base: &SynthConfig) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(MachineCondition::ALL.len());

    for (offset, condition) in (0u64..).zip(MachineCondition::ALL) {
        let config = SynthConfig {
            seed: base.seed.wrapping_add(offset),
            ..base.clone()
        };
        let capture = generate(&config, condition.injection())
            .with_context(|| format!("Failed to generate {} capture", condition.name()))?;

        let path = out_dir.join(format!("{}.csv", condition.name()));
        signal_io::write_csv(&path, &capture.time, &capture.samples)?;
        written.push(path);
    }

    info!("Generated {} sample captures in {}", written.len(), out_dir.display());
    Ok(written)
}
