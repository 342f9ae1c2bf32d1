//! Feature Extraction Error Types

use signal_validator::SignalError;
use thiserror::Error;

/// Errors during feature extraction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// The input signal failed validation
    #[error("Invalid signal: {0}")]
    InvalidSignal(#[from] SignalError),

    /// An extraction setting is outside its sane range
    #[error("Invalid extraction setting {field} = {value}: {reason}")]
    Configuration {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}
