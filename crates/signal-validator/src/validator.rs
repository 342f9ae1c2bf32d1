//! Signal Validation

use crate::error::SignalError;
use serde::Serialize;
use tracing::debug;

/// A uniformly sampled, single-channel vibration signal.
///
/// Construction goes through [`Signal::new`], so every `Signal` in the
/// pipeline has at least one sample, only finite samples, and a finite
/// positive sampling frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    samples: Vec<f64>,
    sampling_freq: f64,
}

impl Signal {
    /// Validate and wrap a sample sequence
    pub fn new(samples: Vec<f64>, sampling_freq: f64) -> Result<Self, SignalError> {
        validate_sampling_frequency(sampling_freq)?;
        validate_samples(&samples)?;

        debug!(
            "Accepted signal: {} samples at {} Hz",
            samples.len(),
            sampling_freq
        );

        Ok(Self {
            samples,
            sampling_freq,
        })
    }

    /// Raw amplitude samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sampling frequency (Hz)
    pub fn sampling_freq(&self) -> f64 {
        self.sampling_freq
    }

    /// Nyquist frequency (Hz)
    pub fn nyquist(&self) -> f64 {
        self.sampling_freq / 2.0
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed signal
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Capture length in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sampling_freq
    }

    /// Give the samples back to the caller
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

fn validate_sampling_frequency(sampling_freq: f64) -> Result<(), SignalError> {
    if !sampling_freq.is_finite() || sampling_freq <= 0.0 {
        return Err(SignalError::InvalidSamplingFrequency {
            value: sampling_freq,
        });
    }
    Ok(())
}

fn validate_samples(samples: &[f64]) -> Result<(), SignalError> {
    if samples.is_empty() {
        return Err(SignalError::Empty);
    }

    match samples.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(SignalError::NonFiniteSample {
            index,
            value: samples[index],
        }),
        None => Ok(()),
    }
}

/// Check a caller-supplied running (1×) frequency
pub fn validate_running_frequency(running_freq: f64) -> Result<(), SignalError> {
    if !running_freq.is_finite() || running_freq <= 0.0 {
        return Err(SignalError::InvalidRunningFrequency {
            value: running_freq,
        });
    }
    Ok(())
}
