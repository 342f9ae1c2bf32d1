//! Signal Error Types

use thiserror::Error;

/// Errors raised when a signal cannot be analyzed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    /// No samples at all
    #[error("Signal is empty: at least one sample is required")]
    Empty,

    /// Sampling frequency is zero, negative, or not finite
    #[error("Sampling frequency {value} Hz is invalid: must be finite and > 0")]
    InvalidSamplingFrequency { value: f64 },

    /// A sample is NaN or infinite
    #[error("Sample {index} has non-finite value {value}")]
    NonFiniteSample { index: usize, value: f64 },

    /// Running frequency is zero, negative, or not finite
    #[error("Running frequency {value} Hz is invalid: must be finite and > 0")]
    InvalidRunningFrequency { value: f64 },

    /// A feature is NaN or infinite, either supplied that way or overflowed
    /// during extraction
    #[error("Feature {name} has non-finite value {value}")]
    NonFiniteFeature { name: &'static str, value: f64 },
}
