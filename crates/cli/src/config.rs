//! Configuration loading
//!
//! Layers, lowest precedence first: the selected profile, an optional TOML
//! file, then `VIBRATION__SECTION__KEY` environment variables.

use anyhow::Context;
use clap::ValueEnum;
use config::{Config, Environment, File};
use diagnostics::{AnalysisConfig, DiagnosticConfig};
use std::path::Path;
use tracing::debug;

const ENV_PREFIX: &str = "VIBRATION";

/// Built-in threshold profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    #[default]
    Default,
    /// Lower thresholds, flags faults earlier
    Sensitive,
    /// Higher thresholds, fewer false alarms
    Tolerant,
}

impl Profile {
    pub fn diagnostics(self) -> DiagnosticConfig {
        match self {
            Profile::Default => DiagnosticConfig::default(),
            Profile::Sensitive => DiagnosticConfig::sensitive(),
            Profile::Tolerant => DiagnosticConfig::tolerant(),
        }
    }
}

/// Build and validate the analysis configuration
pub fn load_config(path: Option<&Path>, profile: Profile) -> anyhow::Result<AnalysisConfig> {
    build_config(path, profile, env_layer())
}

fn env_layer() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn build_config(
    path: Option<&Path>,
    profile: Profile,
    env: Environment,
) -> anyhow::Result<AnalysisConfig> {
    let base = AnalysisConfig {
        diagnostics: profile.diagnostics(),
        ..Default::default()
    };

    let mut builder = Config::builder().add_source(
        Config::try_from(&base).context("Failed to serialize base configuration")?,
    );
    if let Some(path) = path {
        builder = builder.add_source(File::from(path));
    }

    let config: AnalysisConfig = builder
        .add_source(env)
        .build()
        .context("Failed to load configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;
    config.validate()?;

    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}
