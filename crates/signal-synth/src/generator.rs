//! Signal Generator

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use signal_validator::{Signal, SignalError};
use std::f64::consts::PI;
use thiserror::Error;
use tracing::debug;

/// Extra 1× amplitude for an unbalanced rotor
const IMBALANCE_AMPLITUDE: f64 = 0.6;
/// 2× amplitude for a misaligned shaft
const MISALIGNMENT_AMPLITUDE: f64 = 0.45;
/// Bearing resonance line (Hz) and its amplitude
const BEARING_RESONANCE_HZ: f64 = 350.0;
const BEARING_RESONANCE_AMPLITUDE: f64 = 0.12;
/// Impulse magnitude range for bearing spikes
const SPIKE_MIN: f64 = 1.5;
const SPIKE_MAX: f64 = 2.5;
/// One spike per this many samples, never fewer than `MIN_SPIKES`
const SAMPLES_PER_SPIKE: usize = 250;
const MIN_SPIKES: usize = 8;

/// Errors from bad generator parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    #[error("Invalid synthesis parameter {field} = {value}")]
    InvalidParameter { field: &'static str, value: f64 },
}

/// Generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Samples per second
    pub sampling_freq: f64,
    /// Capture length (s)
    pub duration_secs: f64,
    /// Shaft running frequency (Hz)
    pub running_freq: f64,
    /// Baseline 1× amplitude
    pub base_amplitude: f64,
    /// Standard deviation of additive Gaussian noise
    pub noise_std: f64,
    /// RNG seed
    pub seed: u64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sampling_freq: 2000.0,
            duration_secs: 3.0,
            running_freq: 30.0,
            base_amplitude: 0.2,
            noise_std: 0.05,
            seed: 42,
        }
    }
}

/// Which fault signatures to superimpose
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultInjection {
    pub imbalance: bool,
    pub misalignment: bool,
    pub bearing: bool,
}

/// Canonical machine conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineCondition {
    Normal,
    Imbalance,
    Misalignment,
    Bearing,
}

impl MachineCondition {
    pub const ALL: [MachineCondition; 4] = [
        MachineCondition::Normal,
        MachineCondition::Imbalance,
        MachineCondition::Misalignment,
        MachineCondition::Bearing,
    ];

    /// Fault signatures for this condition
    pub fn injection(&self) -> FaultInjection {
        match self {
            MachineCondition::Normal => FaultInjection::default(),
            MachineCondition::Imbalance => FaultInjection {
                imbalance: true,
                ..Default::default()
            },
            MachineCondition::Misalignment => FaultInjection {
                misalignment: true,
                ..Default::default()
            },
            MachineCondition::Bearing => FaultInjection {
                bearing: true,
                ..Default::default()
            },
        }
    }

    /// File name stem for sample data
    pub fn name(&self) -> &'static str {
        match self {
            MachineCondition::Normal => "normal",
            MachineCondition::Imbalance => "imbalance",
            MachineCondition::Misalignment => "misalignment",
            MachineCondition::Bearing => "bearing",
        }
    }
}

/// A generated capture with its time axis
#[derive(Debug, Clone, PartialEq)]
pub struct SynthSignal {
    pub time: Vec<f64>,
    pub samples: Vec<f64>,
    pub sampling_freq: f64,
}

impl SynthSignal {
    /// Validate into a pipeline `Signal`
    pub fn to_signal(&self) -> Result<Signal, SignalError> {
        Signal::new(self.samples.clone(), self.sampling_freq)
    }
}

fn check(field: &'static str, value: f64, valid: bool) -> Result<(), SynthError> {
    if valid && value.is_finite() {
        Ok(())
    } else {
        Err(SynthError::InvalidParameter { field, value })
    }
}

/// Generate one capture
pub fn generate(config: &SynthConfig, faults: FaultInjection) -> Result<SynthSignal, SynthError> {
    check("sampling_freq", config.sampling_freq, config.sampling_freq > 0.0)?;
    check("duration_secs", config.duration_secs, config.duration_secs > 0.0)?;
    check("running_freq", config.running_freq, config.running_freq > 0.0)?;
    check("base_amplitude", config.base_amplitude, config.base_amplitude >= 0.0)?;
    check("noise_std", config.noise_std, config.noise_std >= 0.0)?;

    let n = ((config.sampling_freq * config.duration_secs).round() as usize).max(1);
    let fs = config.sampling_freq;
    let f1 = config.running_freq;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, config.noise_std).map_err(|_| SynthError::InvalidParameter {
        field: "noise_std",
        value: config.noise_std,
    })?;

    let time: Vec<f64> = (0..n).map(|i| i as f64 / fs).collect();

    let mut samples: Vec<f64> = time
        .iter()
        .map(|&t| {
            let mut x = config.base_amplitude * (2.0 * PI * f1 * t).sin();
            if faults.imbalance {
                x += IMBALANCE_AMPLITUDE * (2.0 * PI * f1 * t).sin();
            }
            if faults.misalignment {
                x += MISALIGNMENT_AMPLITUDE * (2.0 * PI * 2.0 * f1 * t).sin();
            }
            if faults.bearing {
                x += BEARING_RESONANCE_AMPLITUDE * (2.0 * PI * BEARING_RESONANCE_HZ * t).sin();
            }
            x
        })
        .collect();

    if faults.bearing {
        let spikes = (n / SAMPLES_PER_SPIKE).max(MIN_SPIKES).min(n);
        for idx in rand::seq::index::sample(&mut rng, n, spikes).iter() {
            let magnitude = rng.gen_range(SPIKE_MIN..SPIKE_MAX);
            let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            samples[idx] += sign * magnitude;
        }
    }

    for x in samples.iter_mut() {
        *x += noise.sample(&mut rng);
    }

    debug!(
        "Generated {} samples @ {} Hz with {:?} (seed {})",
        n, fs, faults, config.seed
    );

    Ok(SynthSignal {
        time,
        samples,
        sampling_freq: fs,
    })
}
