//! Vibration Analyzer - Main Entry Point

use anyhow::bail;
use clap::{Parser, Subcommand};
use signal_synth::SynthConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use vibration_cli::{
    analyze_files, collect_inputs, generate_samples, init_logging, load_config, render_json,
    render_report, render_summary, AnalyzeOptions, OutputFormat, Profile,
};

#[derive(Parser, Debug)]
#[command(name = "vibration-analyzer")]
#[command(about = "Rule-based vibration fault diagnosis for rotating machinery")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze CSV captures (files or directories of *.csv)
    Analyze {
        #[arg(default_value = "sample_data")]
        paths: Vec<PathBuf>,

        /// Shaft running frequency (Hz)
        #[arg(long, env = "VIBRATION_RUNNING_FREQ")]
        running_freq: Option<f64>,

        /// Sampling frequency for files without a time column (Hz)
        #[arg(long)]
        sampling_freq: Option<f64>,

        /// TOML configuration file
        #[arg(short, long, env = "VIBRATION_CONFIG")]
        config: Option<PathBuf>,

        /// Threshold profile applied before the configuration file
        #[arg(long, value_enum, default_value_t = Profile::Default)]
        profile: Profile,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write a time-domain and spectrum plot per capture into this directory
        #[arg(long)]
        plot_dir: Option<PathBuf>,
    },

    /// Write synthetic captures for each machine condition
    Generate {
        #[arg(long, default_value = "sample_data")]
        out_dir: PathBuf,

        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Capture length (s)
        #[arg(long, default_value_t = 3.0)]
        duration: f64,

        /// Samples per second
        #[arg(long, default_value_t = 2000.0)]
        sampling_freq: f64,

        /// Shaft running frequency (Hz)
        #[arg(long, default_value_t = 30.0)]
        running_freq: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    info!("=== Vibration Analyzer v{} ===", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Analyze {
            paths,
            running_freq,
            sampling_freq,
            config,
            profile,
            format,
            plot_dir,
        } => {
            let config = Arc::new(load_config(config.as_deref(), profile)?);
            let inputs = collect_inputs(&paths)?;
            let options = AnalyzeOptions {
                running_freq,
                fallback_fs: sampling_freq,
                plot_dir,
            };
            let outcomes = analyze_files(inputs, config, &options).await;

            match format {
                OutputFormat::Text => {
                    for outcome in &outcomes {
                        if let Ok(report) = &outcome.result {
                            println!("{}", render_report(&outcome.path, report));
                        }
                    }
                    if outcomes.len() > 1 {
                        print!("{}", render_summary(&outcomes));
                    }
                }
                OutputFormat::Json => println!("{}", render_json(&outcomes)?),
            }

            let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
            if failed > 0 {
                bail!("{} of {} file(s) could not be analyzed", failed, outcomes.len());
            }
        }

        Command::Generate {
            out_dir,
            seed,
            duration,
            sampling_freq,
            running_freq,
        } => {
            let base = SynthConfig {
                sampling_freq,
                duration_secs: duration,
                running_freq,
                seed,
                ..Default::default()
            };
            for path in generate_samples(&out_dir, &base)? {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
